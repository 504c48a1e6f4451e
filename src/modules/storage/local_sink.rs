//! Filesystem upload sink
//!
//! Files land directly in the configured directory and are served by the
//! static `/uploads` route. Nothing is ever deleted: removing a cat leaves
//! its image in place.

use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::modules::storage::{UploadError, UploadSink};
use crate::shared::constants::UPLOADS_URL_PREFIX;

/// Strategy for generated upload file names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadNaming {
    /// UUID v7 plus the original extension
    #[default]
    Uuid,
    /// Millisecond timestamp plus the original extension.
    ///
    /// Two uploads in the same millisecond with the same extension end up
    /// with the same name and the last write wins.
    Timestamp,
}

impl UploadNaming {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_lowercase().as_str() {
            "uuid" => Ok(Self::Uuid),
            "timestamp" => Ok(Self::Timestamp),
            other => Err(format!(
                "Invalid UPLOAD_NAMING '{}': expected 'uuid' or 'timestamp'",
                other
            )),
        }
    }

    /// Generate a file name for a new upload
    pub fn file_name(&self, extension: Option<&str>) -> String {
        let stem = match self {
            UploadNaming::Uuid => Uuid::now_v7().to_string(),
            UploadNaming::Timestamp => Utc::now().timestamp_millis().to_string(),
        };

        match extension {
            Some(ext) if !ext.is_empty() => format!("{}.{}", stem, ext),
            _ => stem,
        }
    }
}

/// Upload sink writing to a local directory
pub struct LocalUploadSink {
    dir: PathBuf,
    naming: UploadNaming,
}

impl LocalUploadSink {
    pub fn new(dir: impl Into<PathBuf>, naming: UploadNaming) -> Self {
        Self {
            dir: dir.into(),
            naming,
        }
    }

    /// Make sure the upload directory exists, create if not
    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            warn!(dir = %self.dir.display(), error = %e, "upload: create_dir_all failed");
            e
        })?;
        info!("Upload directory ready: {}", self.dir.display());
        Ok(())
    }
}

#[async_trait]
impl UploadSink for LocalUploadSink {
    async fn store(&self, data: &[u8], extension: Option<&str>) -> Result<String, UploadError> {
        let file_name = self.naming.file_name(extension);
        let full_path = self.dir.join(&file_name);

        debug!(full_path = %full_path.display(), size = data.len(), "upload: write");

        fs::write(&full_path, data).await.map_err(|e| {
            warn!(full_path = %full_path.display(), error = %e, "upload: write failed");
            e
        })?;

        Ok(format!("{}/{}", UPLOADS_URL_PREFIX, file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_naming_parse() {
        assert_eq!(UploadNaming::parse("UUID").unwrap(), UploadNaming::Uuid);
        assert_eq!(
            UploadNaming::parse("timestamp").unwrap(),
            UploadNaming::Timestamp
        );
        assert!(UploadNaming::parse("random").is_err());
    }

    #[test]
    fn test_file_name_keeps_extension() {
        let name = UploadNaming::Uuid.file_name(Some("png"));
        assert!(name.ends_with(".png"));
        assert!(Uuid::parse_str(name.trim_end_matches(".png")).is_ok());

        let name = UploadNaming::Timestamp.file_name(None);
        assert!(name.parse::<i64>().is_ok());
    }

    #[test]
    fn test_uuid_names_do_not_collide() {
        let a = UploadNaming::Uuid.file_name(Some("jpg"));
        let b = UploadNaming::Uuid.file_name(Some("jpg"));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_store_writes_file_and_returns_public_path() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LocalUploadSink::new(dir.path(), UploadNaming::Uuid);

        let path = sink.store(b"meow", Some("gif")).await.unwrap();
        assert!(path.starts_with("/uploads/"));
        assert!(path.ends_with(".gif"));

        let file_name = path.trim_start_matches("/uploads/");
        let written = fs::read(dir.path().join(file_name)).await.unwrap();
        assert_eq!(written, b"meow");
    }

    #[tokio::test]
    async fn test_store_fails_when_directory_missing() {
        let root = tempfile::tempdir().unwrap();
        let sink = LocalUploadSink::new(root.path().join("missing"), UploadNaming::Uuid);

        let result = sink.store(b"meow", Some("png")).await;
        assert!(matches!(result, Err(UploadError::Io(_))));
    }
}
