//! JSONPlaceholder support: the HTTP client and task summaries.

pub mod client;
pub mod tasks;

pub use client::TodoClient;
pub use tasks::TaskSummary;
