//! Resource attachment upload policy.

use serde::{Deserialize, Serialize};

/// 5 MiB.
const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Where attachments are written and what the sink accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory that receives stored files.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Maximum accepted file size in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
    /// MIME types accepted by the sink.
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            max_bytes: default_max_bytes(),
            allowed_mime_types: default_allowed_mime_types(),
        }
    }
}

fn default_directory() -> String {
    "data/uploads/resources".to_string()
}

fn default_max_bytes() -> u64 {
    DEFAULT_MAX_BYTES
}

fn default_allowed_mime_types() -> Vec<String> {
    [
        "image/jpeg",
        "image/png",
        "image/gif",
        "application/pdf",
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ]
    .iter()
    .map(|m| m.to_string())
    .collect()
}
