//! S3-backed object storage for marker images.
//!
//! Objects live under `markers/<marker-id>/<filename>`; the durable
//! retrieval URL is the configured public base URL joined with the key, so
//! the bucket (or the CDN in front of it) must be publicly readable.
//! The invariant is one-way: a marker row with an `image_url` always has an
//! object here, but deleting a marker does not delete its objects.

use std::sync::Arc;

use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};
use tokio::sync::OnceCell;
use tracing::{debug, error};

/// Errors from the object store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Missing or invalid configuration.
    #[error("object store configuration error: {0}")]
    Config(String),
    /// The upload itself failed.
    #[error("object store upload failed: {0}")]
    Upload(String),
}

/// Object storage client for marker images.
#[derive(Clone)]
pub struct ObjectStorage {
    client: Arc<S3Client>,
    bucket: String,
    public_base_url: String,
}

static STORAGE: OnceCell<ObjectStorage> = OnceCell::const_new();

/// Get or initialize the storage client from the environment.
///
/// Reads `S3_BUCKET` and `S3_PUBLIC_BASE_URL`; AWS credentials and region
/// come from the standard SDK environment/config chain.
pub async fn get_storage() -> Result<&'static ObjectStorage, StorageError> {
    STORAGE
        .get_or_try_init(|| async {
            dotenvy::dotenv().ok();

            let bucket = std::env::var("S3_BUCKET")
                .map_err(|_| StorageError::Config("S3_BUCKET must be set".into()))?;
            let public_base_url = std::env::var("S3_PUBLIC_BASE_URL")
                .map_err(|_| StorageError::Config("S3_PUBLIC_BASE_URL must be set".into()))?
                .trim_end_matches('/')
                .to_string();

            let sdk_config =
                aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

            Ok(ObjectStorage {
                client: Arc::new(S3Client::new(&sdk_config)),
                bucket,
                public_base_url,
            })
        })
        .await
}

impl ObjectStorage {
    /// Upload image bytes under `key` and return the durable retrieval URL.
    pub async fn put_image(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        debug!("uploading {} bytes to {}", bytes.len(), key);

        let content_type = if content_type.is_empty() {
            "application/octet-stream"
        } else {
            content_type
        };

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| {
                error!("failed to upload {}: {}", key, e);
                StorageError::Upload(e.to_string())
            })?;

        Ok(format!("{}/{}", self.public_base_url, key))
    }
}

/// Object key for a marker image: `markers/<id>/<filename>`, with the
/// filename reduced to a safe character set.
pub fn marker_image_key(marker_id: &str, filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let safe = if safe.trim_matches('-').is_empty() {
        "image".to_string()
    } else {
        safe
    };
    format!("markers/{marker_id}/{safe}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_by_marker_id() {
        assert_eq!(
            marker_image_key("m-1", "photo.jpg"),
            "markers/m-1/photo.jpg"
        );
    }

    #[test]
    fn filenames_are_sanitized() {
        assert_eq!(
            marker_image_key("m-1", "my photo (1).jpg"),
            "markers/m-1/my-photo--1-.jpg"
        );
        assert_eq!(marker_image_key("m-1", "???"), "markers/m-1/image");
        assert_eq!(marker_image_key("m-1", ""), "markers/m-1/image");
    }
}
