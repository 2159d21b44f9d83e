//! Core traits defined in `precinct-core` and implemented by other crates.

pub mod file_sink;

pub use file_sink::{FileSink, StoredFile};
