//! # precinct-storage
//!
//! Upload sink for resource attachments. [`LocalFileSink`] writes accepted
//! files under a configured directory; [`UploadPolicy`] decides what is
//! accepted.

pub mod local;
pub mod policy;

pub use local::LocalFileSink;
pub use policy::UploadPolicy;
