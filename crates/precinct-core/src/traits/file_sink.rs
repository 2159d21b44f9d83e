//! Upload sink trait: "store this file, return a path".

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// Where an accepted upload ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    /// Path (relative to the sink root) recorded against the owning row.
    pub path: String,
    /// Stored size in bytes.
    pub size_bytes: u64,
    /// MIME type the upload was accepted as.
    pub content_type: String,
}

/// Persists uploaded attachments.
///
/// Implementations enforce their own acceptance policy (type allow-list,
/// size cap) and reject with a validation error before writing anything.
#[async_trait]
pub trait FileSink: Send + Sync + std::fmt::Debug + 'static {
    /// Store `data` under a name derived from `file_name`.
    async fn store(&self, file_name: &str, content_type: &str, data: Bytes)
    -> AppResult<StoredFile>;

    /// Remove a previously stored file. Missing files are not an error.
    async fn remove(&self, path: &str) -> AppResult<()>;
}
