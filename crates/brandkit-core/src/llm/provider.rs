//! LlmProvider trait definition.
//!
//! This is the core abstraction every completion backend implements.
//! Uses RPITIT for `complete`; dynamic dispatch goes through
//! [`super::box_provider::BoxLlmProvider`].

use brandkit_types::llm::{CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities};

/// Trait for hosted text-completion backends.
///
/// Implementations live in brandkit-infra (e.g. `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai", "groq").
    fn name(&self) -> &str;

    /// What this provider supports.
    fn capabilities(&self) -> &ProviderCapabilities;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
