//! Inventory and allocation request entities.

pub mod model;
pub mod request;

pub use model::{NewResource, Resource, ResourceFilter};
pub use request::{NewResourceRequest, RequestFilter, RequestStatus, ResourceRequest, Urgency};
