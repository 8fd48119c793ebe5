//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use brandkit_types::error::{
    AssetError, PipelineError, RepositoryError, ServiceError, VoiceError, WizardError,
};
use brandkit_types::llm::LlmError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Wizard(WizardError),
    Asset(AssetError),
    Service(ServiceError),
    Completion(LlmError),
    Repository(RepositoryError),
    /// No wizard session with this id.
    SessionNotFound,
    /// The resource exists but is not in a state that allows the request.
    Conflict(String),
    /// Missing or malformed request input.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<WizardError> for AppError {
    fn from(e: WizardError) -> Self {
        AppError::Wizard(e)
    }
}

impl From<AssetError> for AppError {
    fn from(e: AssetError) -> Self {
        AppError::Asset(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        AppError::Service(e)
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Completion(e)
    }
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Repository(e)
    }
}

impl From<VoiceError> for AppError {
    fn from(e: VoiceError) -> Self {
        match e {
            VoiceError::Synthesis(service) => AppError::Service(service),
            other => AppError::Internal(other.to_string()),
        }
    }
}

fn service_status(e: &ServiceError) -> (StatusCode, &'static str) {
    match e {
        ServiceError::NotConfigured(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_NOT_CONFIGURED"),
        ServiceError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ServiceError::RateLimited(_) => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
        _ => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
    }
}

fn completion_status(e: &LlmError) -> (StatusCode, &'static str) {
    match e {
        LlmError::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
        _ => (StatusCode::BAD_GATEWAY, "COMPLETION_ERROR"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Wizard(WizardError::EmptyInput) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "utterance is required".to_string())
            }
            AppError::Wizard(WizardError::Pipeline(e)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Wizard(e @ WizardError::NotAcceptingInput(_)) => {
                (StatusCode::CONFLICT, "WIZARD_NOT_ACCEPTING_INPUT", e.to_string())
            }
            AppError::Wizard(WizardError::Completion(e)) | AppError::Completion(e) => {
                let (status, code) = completion_status(e);
                (status, code, e.to_string())
            }
            AppError::Asset(AssetError::Rejected(e)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Asset(AssetError::Completion(e)) => {
                let (status, code) = completion_status(e);
                (status, code, e.to_string())
            }
            AppError::Asset(AssetError::Service(e)) | AppError::Service(e) => {
                let (status, code) = service_status(e);
                (status, code, e.to_string())
            }
            AppError::Asset(e @ AssetError::Unparseable(_)) => {
                (StatusCode::BAD_GATEWAY, "UNPARSEABLE_REPLY", e.to_string())
            }
            AppError::Repository(RepositoryError::NotFound) | AppError::SessionNotFound => {
                (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", "Session not found".to_string())
            }
            AppError::Repository(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", e.to_string())
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        };

        if status.is_server_error() {
            tracing::error!(code, %message, "request failed");
        } else {
            tracing::debug!(code, %message, "request rejected");
        }

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_is_a_validation_error() {
        let response = AppError::from(AssetError::Rejected(PipelineError::MissingField("text")))
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::from(PipelineError::MissingField("brandName")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unconfigured_service_is_unavailable() {
        let response = AppError::from(ServiceError::NotConfigured("speech synthesis")).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn upstream_failures_are_bad_gateway() {
        let err = AssetError::Service(ServiceError::Http {
            service: "unsplash",
            status: 500,
            body: "boom".into(),
        });
        assert_eq!(AppError::from(err).into_response().status(), StatusCode::BAD_GATEWAY);

        let err = WizardError::Completion(LlmError::Provider {
            message: "down".into(),
        });
        assert_eq!(AppError::from(err).into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn input_after_done_conflicts() {
        let err = WizardError::NotAcceptingInput(brandkit_types::wizard::WizardStep::Done);
        assert_eq!(AppError::from(err).into_response().status(), StatusCode::CONFLICT);
    }
}
