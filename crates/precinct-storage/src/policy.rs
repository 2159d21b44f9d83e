//! Attachment acceptance rules.

use precinct_core::config::UploadConfig;
use precinct_core::error::AppError;
use precinct_core::result::AppResult;

/// MIME allow-list plus size cap.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_bytes: u64,
    allowed_mime_types: Vec<String>,
}

impl UploadPolicy {
    /// Build the policy from configuration.
    pub fn from_config(config: &UploadConfig) -> Self {
        Self {
            max_bytes: config.max_bytes,
            allowed_mime_types: config
                .allowed_mime_types
                .iter()
                .map(|m| m.to_ascii_lowercase())
                .collect(),
        }
    }

    /// Largest accepted upload in bytes.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Reject empty, oversized or disallowed uploads.
    pub fn check(&self, content_type: &str, size_bytes: u64) -> AppResult<()> {
        if size_bytes == 0 {
            return Err(AppError::validation("Uploaded file is empty"));
        }
        if size_bytes > self.max_bytes {
            return Err(AppError::validation(format!(
                "File too large: {size_bytes} bytes (limit {} bytes)",
                self.max_bytes
            )));
        }
        // Parameters such as "; charset=binary" do not change the type.
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if !self.allowed_mime_types.iter().any(|m| *m == essence) {
            return Err(AppError::validation(format!(
                "File type '{essence}' is not allowed"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use precinct_core::error::ErrorKind;

    fn policy() -> UploadPolicy {
        UploadPolicy::from_config(&UploadConfig::default())
    }

    #[test]
    fn test_accepts_pdf_under_cap() {
        assert!(policy().check("application/pdf", 1024).is_ok());
        assert!(policy().check("Image/PNG; charset=binary", 10).is_ok());
    }

    #[test]
    fn test_rejects_oversized_and_unknown_types() {
        let p = policy();
        let err = p.check("application/pdf", p.max_bytes() + 1).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(p.check("application/x-msdownload", 10).is_err());
        assert!(p.check("application/pdf", 0).is_err());
    }
}
