//! Inventory and resource allocation requests.

pub mod request;
pub mod service;

pub use request::CreateResourceRequest;
pub use service::{AddResourceRequest, Attachment, ResourceManager};
