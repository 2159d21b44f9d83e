//! Local filesystem upload sink.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use precinct_core::config::UploadConfig;
use precinct_core::error::{AppError, ErrorKind};
use precinct_core::result::AppResult;
use precinct_core::traits::{FileSink, StoredFile};

use crate::policy::UploadPolicy;

/// Writes accepted uploads under a root directory with generated names.
#[derive(Debug, Clone)]
pub struct LocalFileSink {
    root: PathBuf,
    policy: UploadPolicy,
}

impl LocalFileSink {
    /// Create the sink, creating the root directory if needed.
    pub async fn new(config: &UploadConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.directory);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create upload directory: {}", root.display()),
                e,
            )
        })?;
        info!(root = %root.display(), "Upload sink ready");
        Ok(Self {
            root,
            policy: UploadPolicy::from_config(config),
        })
    }

    /// Resolve a stored path inside the root. Rejects anything that would
    /// escape it.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            return Err(AppError::validation(format!("Invalid stored path: {path}")));
        }
        Ok(self.root.join(relative))
    }
}

/// Lower-case alphanumeric extension of `file_name`, if any.
fn extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > 8 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[async_trait]
impl FileSink for LocalFileSink {
    async fn store(
        &self,
        file_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> AppResult<StoredFile> {
        let size_bytes = data.len() as u64;
        self.policy.check(content_type, size_bytes)?;

        let stored_name = match extension(file_name) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };
        let full_path = self.root.join(&stored_name);

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write upload: {stored_name}"),
                e,
            )
        })?;

        debug!(path = %stored_name, bytes = size_bytes, "Stored upload");
        Ok(StoredFile {
            path: stored_name,
            size_bytes,
            content_type: content_type.to_string(),
        })
    }

    async fn remove(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to remove upload: {path}"),
                e,
            )),
        }
    }
}
