//! Shared plumbing for the raw-HTTP service adapters.

use std::time::Duration;

use brandkit_types::error::ServiceError;
use secrecy::SecretString;
use serde::de::DeserializeOwned;

/// Build a client with a request timeout. Falls back to reqwest's defaults if
/// the TLS backend cannot be configured.
pub(crate) fn client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}

pub(crate) fn transport(service: &'static str) -> impl Fn(reqwest::Error) -> ServiceError {
    move |e| ServiceError::Transport {
        service,
        message: e.to_string(),
    }
}

/// The key, or `NotConfigured` when it is absent.
pub(crate) fn require<'a>(
    service: &'static str,
    key: Option<&'a SecretString>,
) -> Result<&'a SecretString, ServiceError> {
    key.ok_or(ServiceError::NotConfigured(service))
}

/// Pass 2xx responses through; map everything else onto a `ServiceError`.
pub(crate) async fn ensure_success(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(match status.as_u16() {
        401 => ServiceError::AuthenticationFailed(service),
        429 => ServiceError::RateLimited(service),
        code => ServiceError::Http {
            service,
            status: code,
            body,
        },
    })
}

pub(crate) async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    response: reqwest::Response,
) -> Result<T, ServiceError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ServiceError::Deserialization {
            service,
            message: e.to_string(),
        })
}
