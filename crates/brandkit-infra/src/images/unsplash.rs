//! Unsplash photo search (`GET {base}/search/photos`).

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use brandkit_core::service::image::ImageSearch;
use brandkit_types::config::ImageSearchConfig;
use brandkit_types::error::ServiceError;
use brandkit_types::media::{ImageSearchQuery, PhotoRecord};

use crate::http;

const SERVICE: &str = "image search";

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<PhotoRecord>,
}

/// Does not derive Debug: holds the access key.
pub struct UnsplashSearch {
    client: reqwest::Client,
    access_key: Option<SecretString>,
    base_url: String,
}

impl UnsplashSearch {
    pub fn new(config: &ImageSearchConfig, access_key: Option<SecretString>) -> Self {
        Self {
            client: http::client(Duration::from_secs(30)),
            access_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl ImageSearch for UnsplashSearch {
    #[tracing::instrument(name = "images.search", skip_all, fields(query = %query.query))]
    async fn search(&self, query: &ImageSearchQuery) -> Result<Vec<PhotoRecord>, ServiceError> {
        let key = http::require(SERVICE, self.access_key.as_ref())?;
        let per_page = query.per_page.to_string();

        let response = self
            .client
            .get(format!("{}/search/photos", self.base_url))
            .header("Authorization", format!("Client-ID {}", key.expose_secret()))
            .query(&[("query", query.query.as_str()), ("per_page", per_page.as_str())])
            .send()
            .await
            .map_err(http::transport(SERVICE))?;
        let response = http::ensure_success(SERVICE, response).await?;
        let parsed: SearchResponse = http::read_json(SERVICE, response).await?;

        tracing::debug!(results = parsed.results.len(), "photo search returned");
        Ok(parsed.results)
    }
}
