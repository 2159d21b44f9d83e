//! Core type definitions used across the Precinct workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
