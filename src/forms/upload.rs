//! File upload metadata.

use serde::{Deserialize, Serialize};

use crate::util::ValidationError;

/// Largest accepted upload (10 MB).
pub const MAX_UPLOAD_BYTES: u64 = 10_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    pub filename: String,
    pub content_type: String,
    pub size: u64,
}

impl FileUpload {
    /// Filename must be a bare name (no path separators); size in `1..=10 MB`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.filename.is_empty() {
            return Err(ValidationError::Empty { field: "filename" });
        }
        if self.filename.contains('/') || self.filename.contains('\\') {
            return Err(ValidationError::Invalid {
                field: "filename",
                reason: "must not contain path separators".to_string(),
            });
        }
        if self.size == 0 || self.size > MAX_UPLOAD_BYTES {
            return Err(ValidationError::Invalid {
                field: "size",
                reason: format!("must be between 1 and {} bytes", MAX_UPLOAD_BYTES),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(filename: &str, size: u64) -> FileUpload {
        FileUpload {
            filename: filename.into(),
            content_type: "text/plain".into(),
            size,
        }
    }

    #[test]
    fn test_valid_upload() {
        assert!(upload("notes.txt", 1).validate().is_ok());
        assert!(upload("notes.txt", MAX_UPLOAD_BYTES).validate().is_ok());
    }

    #[test]
    fn test_rejects_paths_and_sizes() {
        assert!(upload("", 10).validate().is_err());
        assert!(upload("../etc/passwd", 10).validate().is_err());
        assert!(upload("dir\\file.txt", 10).validate().is_err());
        assert_eq!(upload("a.txt", 0).validate().unwrap_err().field(), "size");
        assert!(upload("a.txt", MAX_UPLOAD_BYTES + 1).validate().is_err());
    }
}
