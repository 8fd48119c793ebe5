//! OpenAI image generation (`POST {base}/images/generations`).

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use brandkit_core::service::image::ImageGenerator;
use brandkit_types::config::ImageConfig;
use brandkit_types::error::ServiceError;
use brandkit_types::media::{GeneratedImage, ImageRequest};

use crate::http;

const SERVICE: &str = "image generation";

#[derive(Serialize)]
struct GenerationBody<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
}

#[derive(Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    data: Vec<GeneratedImage>,
}

/// DALL-E style generator. Does not derive Debug: holds the API key.
pub struct DalleImageGenerator {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
}

impl DalleImageGenerator {
    pub fn new(config: &ImageConfig, api_key: Option<SecretString>) -> Self {
        Self {
            client: http::client(Duration::from_secs(120)),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }
}

impl ImageGenerator for DalleImageGenerator {
    #[tracing::instrument(name = "images.generate", skip_all, fields(model = %self.model, size = %request.size))]
    async fn generate(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>, ServiceError> {
        let key = http::require(SERVICE, self.api_key.as_ref())?;
        let body = GenerationBody {
            model: &self.model,
            prompt: &request.prompt,
            n: request.count,
            size: &request.size,
        };

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(http::transport(SERVICE))?;
        let response = http::ensure_success(SERVICE, response).await?;
        let parsed: GenerationResponse = http::read_json(SERVICE, response).await?;

        if parsed.data.is_empty() {
            return Err(ServiceError::Empty { service: SERVICE });
        }
        Ok(parsed.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use crate::test_server;

    fn config(base_url: String) -> ImageConfig {
        ImageConfig {
            base_url,
            ..ImageConfig::default()
        }
    }

    fn request() -> ImageRequest {
        ImageRequest {
            prompt: "a plane over a city".into(),
            count: 1,
            size: "1024x1024".into(),
        }
    }

    #[tokio::test]
    async fn generates_and_reads_urls() {
        let app = Router::new().route(
            "/images/generations",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer sk-test");
                assert_eq!(body["model"], "dall-e-3");
                assert_eq!(body["n"], 1);
                assert_eq!(body["size"], "1024x1024");
                Json(json!({"created": 1, "data": [{"url": "https://images.example/a.png"}]}))
            }),
        );
        let base = test_server::spawn(app).await;
        let generator = DalleImageGenerator::new(&config(base), Some(SecretString::from("sk-test")));

        let images = generator.generate(&request()).await.unwrap();
        assert_eq!(images[0].url, "https://images.example/a.png");
    }

    #[tokio::test]
    async fn rate_limit_maps_to_error() {
        let app = Router::new().route(
            "/images/generations",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let base = test_server::spawn(app).await;
        let generator = DalleImageGenerator::new(&config(base), Some(SecretString::from("sk-test")));

        let err = generator.generate(&request()).await.unwrap_err();
        assert!(matches!(err, ServiceError::RateLimited(SERVICE)));
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let generator = DalleImageGenerator::new(&ImageConfig::default(), None);
        let err = generator.generate(&request()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotConfigured(_)));
    }
}
