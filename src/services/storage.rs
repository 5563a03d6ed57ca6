//! Object storage client
//!
//! Validates and uploads media files to the external object storage service
//! and returns their public URLs. Image and video uploads have separate
//! buckets, content-type allowlists and size caps.

use std::time::Duration;
use reqwest::Client;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::utils::errors::{CampusHubError, Result, StorageError, StorageResult};
use crate::utils::logging::{log_api_error, log_media_upload};

const IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

const VIDEO_TYPES: &[(&str, &str)] = &[
    ("video/mp4", "mp4"),
    ("video/webm", "webm"),
    ("video/quicktime", "mov"),
];

/// Kind of media being uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    fn allowed_types(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            MediaKind::Image => IMAGE_TYPES,
            MediaKind::Video => VIDEO_TYPES,
        }
    }

    /// File extension for an accepted content type
    fn extension_for(&self, content_type: &str) -> Option<&'static str> {
        self.allowed_types()
            .iter()
            .find(|(ty, _)| *ty == content_type)
            .map(|(_, ext)| *ext)
    }
}

/// Validate a pending upload against the allowlist and size cap
pub fn validate_upload(
    kind: MediaKind,
    content_type: &str,
    size: usize,
    limit: usize,
) -> StorageResult<()> {
    if kind.extension_for(content_type).is_none() {
        return Err(StorageError::UnsupportedContentType(content_type.to_string()));
    }

    if size > limit {
        return Err(StorageError::FileTooLarge { size, limit });
    }

    Ok(())
}

/// HTTP client for the object storage service
#[derive(Debug, Clone)]
pub struct StorageClient {
    client: Client,
    config: StorageConfig,
}

impl StorageClient {
    /// Create a new StorageClient instance
    pub fn new(config: StorageConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("CampusHub/1.0")
            .build()
            .map_err(CampusHubError::Http)?;

        Ok(Self { client, config })
    }

    /// Validate and upload a media file, returning its public URL
    pub async fn upload_media(
        &self,
        user_id: i64,
        kind: MediaKind,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let (bucket, limit) = match kind {
            MediaKind::Image => (&self.config.image_bucket, self.config.max_image_bytes),
            MediaKind::Video => (&self.config.video_bucket, self.config.max_video_bytes),
        };

        validate_upload(kind, content_type, bytes.len(), limit)?;

        // Extension presence was just validated
        let extension = kind
            .extension_for(content_type)
            .ok_or_else(|| StorageError::UnsupportedContentType(content_type.to_string()))?;
        let path = format!("{}/{}.{}", user_id, Uuid::new_v4(), extension);
        let size = bytes.len();

        self.upload(bucket, &path, content_type, bytes).await?;

        let url = self.public_url(bucket, &path);
        log_media_upload(user_id, content_type, size, &url);
        Ok(url)
    }

    /// Raw upload of bytes into a bucket path
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<()> {
        let url = format!("{}/object/{}/{}", self.config.api_url, bucket, path);
        debug!(bucket = bucket, path = path, size = bytes.len(), "Uploading object");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CampusHubError::Storage(StorageError::Timeout)
                } else if e.is_connect() {
                    CampusHubError::Storage(StorageError::ServiceUnavailable)
                } else {
                    CampusHubError::Storage(StorageError::UploadFailed(e.to_string()))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log_api_error("storage", &format!("HTTP {}", status), Some(bucket));
            return Err(CampusHubError::Storage(StorageError::UploadFailed(
                format!("HTTP {}: {}", status, body),
            )));
        }

        info!(bucket = bucket, path = path, "Object uploaded");
        Ok(())
    }

    /// Public URL for an uploaded object
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            bucket,
            path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_accepts_known_image_types() {
        assert!(validate_upload(MediaKind::Image, "image/png", 1024, 4096).is_ok());
        assert!(validate_upload(MediaKind::Image, "image/webp", 1024, 4096).is_ok());
    }

    #[test]
    fn test_rejects_video_type_on_image_upload() {
        let result = validate_upload(MediaKind::Image, "video/mp4", 1024, 4096);
        assert_matches!(result, Err(StorageError::UnsupportedContentType(_)));
    }

    #[test]
    fn test_rejects_oversized_upload() {
        let result = validate_upload(MediaKind::Video, "video/mp4", 4097, 4096);
        assert_matches!(result, Err(StorageError::FileTooLarge { size: 4097, limit: 4096 }));
    }

    #[test]
    fn test_size_at_limit_is_accepted() {
        assert!(validate_upload(MediaKind::Video, "video/webm", 4096, 4096).is_ok());
    }

    #[test]
    fn test_public_url_shape() {
        let mut config = crate::config::settings::Settings::default().storage;
        config.public_base_url = "https://cdn.campus.edu/public/".to_string();
        let client = StorageClient::new(config).unwrap();
        assert_eq!(
            client.public_url("event-images", "7/abc.png"),
            "https://cdn.campus.edu/public/event-images/7/abc.png"
        );
    }
}
