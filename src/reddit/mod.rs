//! Reddit support: the HTTP client and the pagination/aggregation engine.

pub mod client;
pub mod listing;

pub use client::RedditClient;
pub use listing::{collect_titles, count_words, top_titles};
