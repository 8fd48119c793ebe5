//! Domain error types.

use crate::llm::LlmError;

/// Errors from a hosted non-completion service (image, search, speech,
/// upload, logo).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{service} returned HTTP {status}: {body}")]
    Http {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{service} request failed: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },

    #[error("{service} response could not be decoded: {message}")]
    Deserialization {
        service: &'static str,
        message: String,
    },

    #[error("{0} rejected the credentials")]
    AuthenticationFailed(&'static str),

    #[error("{0} rate limited the request")]
    RateLimited(&'static str),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("{service} returned no results")]
    Empty { service: &'static str },
}

/// Errors raised on pipeline entry. Branch failures never surface here.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Errors from a single asset-generation call.
///
/// Inside the pipeline these only ever degrade a bundle field; standalone
/// asset endpoints surface them directly.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("completion failed: {0}")]
    Completion(#[from] LlmError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("reply could not be interpreted: {0}")]
    Unparseable(&'static str),

    #[error(transparent)]
    Rejected(#[from] PipelineError),
}

/// Errors from a wizard turn.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("completion failed: {0}")]
    Completion(#[from] LlmError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("input is empty")]
    EmptyInput,

    #[error("wizard does not accept input in step {0}")]
    NotAcceptingInput(crate::wizard::WizardStep),
}

/// Errors from the voice adapter.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("speech synthesis failed: {0}")]
    Synthesis(#[source] ServiceError),

    #[error("speech recognition failed: {0}")]
    Recognition(String),

    #[error("playback failed: {0}")]
    Playback(String),

    #[error("voice interaction is disabled")]
    Disabled,
}

/// Errors from session and snapshot storage.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_display_names_service() {
        let err = ServiceError::Http {
            service: "unsplash",
            status: 403,
            body: "Rate Limit Exceeded".into(),
        };
        assert_eq!(err.to_string(), "unsplash returned HTTP 403: Rate Limit Exceeded");
        assert_eq!(
            ServiceError::NotConfigured("logo service").to_string(),
            "logo service is not configured"
        );
    }

    #[test]
    fn asset_error_is_transparent_over_service_errors() {
        let err: AssetError = ServiceError::Empty { service: "unsplash" }.into();
        assert_eq!(err.to_string(), "unsplash returned no results");
    }

    #[test]
    fn wizard_error_wraps_pipeline_error() {
        let err: WizardError = PipelineError::MissingField("brandName").into();
        assert_eq!(err.to_string(), "missing required field: brandName");
    }
}
