//! Storage module for uploaded images
//!
//! Provides the upload sink used by cat creation: it writes the uploaded
//! bytes under the public uploads directory and hands back the path the
//! file is served from.

mod local_sink;

pub use local_sink::{LocalUploadSink, UploadNaming};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to write upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable sink for uploaded files
#[async_trait]
pub trait UploadSink: Send + Sync {
    /// Store `data` and return the public path it is served from
    async fn store(&self, data: &[u8], extension: Option<&str>) -> Result<String, UploadError>;
}
