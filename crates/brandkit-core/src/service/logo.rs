//! Logo rendering port.

use brandkit_types::error::ServiceError;
use brandkit_types::media::LogoRequest;

/// Renders a wordmark logo and returns where it is hosted.
pub trait LogoGenerator: Send + Sync {
    /// Whether a backing service is available. Unconfigured generators are
    /// skipped by the pipeline rather than counted as failures.
    fn is_configured(&self) -> bool {
        true
    }

    fn generate_logo(
        &self,
        request: &LogoRequest,
    ) -> impl std::future::Future<Output = Result<String, ServiceError>> + Send;
}
