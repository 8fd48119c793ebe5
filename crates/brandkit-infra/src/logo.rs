//! HTTP logo service (`POST {endpoint}/generate-logo`).

use std::time::Duration;

use serde::Deserialize;

use brandkit_core::service::logo::LogoGenerator;
use brandkit_types::config::LogoConfig;
use brandkit_types::error::ServiceError;
use brandkit_types::media::LogoRequest;

use crate::http;

const SERVICE: &str = "logo service";

#[derive(Deserialize)]
struct LogoResponse {
    s3_url: Option<String>,
}

#[derive(Debug)]
pub struct HttpLogoGenerator {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl HttpLogoGenerator {
    pub fn new(config: &LogoConfig) -> Self {
        Self {
            client: http::client(Duration::from_secs(120)),
            endpoint: config
                .endpoint
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(|e| e.trim_end_matches('/').to_string()),
        }
    }
}

impl LogoGenerator for HttpLogoGenerator {
    fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    #[tracing::instrument(name = "logo.generate", skip_all, fields(brand = %request.brand_name))]
    async fn generate_logo(&self, request: &LogoRequest) -> Result<String, ServiceError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or(ServiceError::NotConfigured(SERVICE))?;

        let response = self
            .client
            .post(format!("{endpoint}/generate-logo"))
            .json(request)
            .send()
            .await
            .map_err(http::transport(SERVICE))?;
        let response = http::ensure_success(SERVICE, response).await?;
        let parsed: LogoResponse = http::read_json(SERVICE, response).await?;

        parsed
            .s3_url
            .filter(|url| !url.trim().is_empty())
            .ok_or(ServiceError::Empty { service: SERVICE })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use crate::test_server;

    #[test]
    fn blank_endpoint_is_unconfigured() {
        let generator = HttpLogoGenerator::new(&LogoConfig {
            endpoint: Some("  ".into()),
            ..LogoConfig::default()
        });
        assert!(!generator.is_configured());
    }

    #[tokio::test]
    async fn posts_request_and_reads_s3_url() {
        let app = Router::new().route(
            "/generate-logo",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["brand_name"], "Flight Mobile");
                assert_eq!(body["font_family"], "Montserrat");
                Json(json!({"s3_url": "https://bucket.s3.amazonaws.com/flight.png"}))
            }),
        );
        let base = test_server::spawn(app).await;
        let config = LogoConfig {
            endpoint: Some(format!("{base}/")),
            ..LogoConfig::default()
        };
        let generator = HttpLogoGenerator::new(&config);

        let url = generator
            .generate_logo(&config.request_for("Flight Mobile"))
            .await
            .unwrap();
        assert_eq!(url, "https://bucket.s3.amazonaws.com/flight.png");
    }
}
