//! Signed Cloudinary upload (`POST {base}/{cloud}/image/upload`).
//!
//! The signature is the hex SHA-256 of
//! `folder={folder}&timestamp={ts}{api_secret}`.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use brandkit_core::service::upload::ImageUploader;
use brandkit_types::config::UploadConfig;
use brandkit_types::error::ServiceError;
use brandkit_types::media::{UploadRequest, UploadedAsset};

use crate::http;

const SERVICE: &str = "image upload";

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

/// Cloudinary credentials. Does not derive Debug.
pub struct CloudinaryCredentials {
    pub api_key: SecretString,
    pub api_secret: SecretString,
}

/// Does not derive Debug: holds credentials.
pub struct CloudinaryUploader {
    client: reqwest::Client,
    credentials: Option<CloudinaryCredentials>,
    cloud_name: Option<String>,
    folder: String,
    base_url: String,
}

/// Hex SHA-256 over the signed parameters followed by the secret.
pub fn sign(folder: &str, timestamp: i64, api_secret: &str) -> String {
    let payload = format!("folder={folder}&timestamp={timestamp}{api_secret}");
    format!("{:x}", Sha256::digest(payload.as_bytes()))
}

impl CloudinaryUploader {
    pub fn new(config: &UploadConfig, credentials: Option<CloudinaryCredentials>) -> Self {
        Self {
            client: http::client(Duration::from_secs(60)),
            credentials,
            cloud_name: config.cloud_name.clone(),
            folder: config.folder.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl ImageUploader for CloudinaryUploader {
    #[tracing::instrument(name = "upload.image", skip_all, fields(folder = %self.folder))]
    async fn upload(&self, request: &UploadRequest) -> Result<UploadedAsset, ServiceError> {
        let (Some(credentials), Some(cloud_name)) = (&self.credentials, &self.cloud_name) else {
            return Err(ServiceError::NotConfigured(SERVICE));
        };
        if request.image.trim().is_empty() {
            return Err(ServiceError::InvalidRequest("image is empty".to_string()));
        }

        let timestamp = chrono::Utc::now().timestamp();
        let signature = sign(
            &self.folder,
            timestamp,
            credentials.api_secret.expose_secret(),
        );
        let form = [
            ("file", request.image.clone()),
            ("folder", self.folder.clone()),
            ("timestamp", timestamp.to_string()),
            ("api_key", credentials.api_key.expose_secret().to_string()),
            ("signature", signature),
            ("signature_algorithm", "sha256".to_string()),
        ];

        let response = self
            .client
            .post(format!("{}/{cloud_name}/image/upload", self.base_url))
            .form(&form)
            .send()
            .await
            .map_err(http::transport(SERVICE))?;
        let response = http::ensure_success(SERVICE, response).await?;
        let parsed: UploadResponse = http::read_json(SERVICE, response).await?;

        parsed
            .secure_url
            .map(|url| UploadedAsset { url })
            .ok_or(ServiceError::Empty { service: SERVICE })
    }
}
