//! File exports for the todo reports.

pub mod writer;

pub use writer::*;
