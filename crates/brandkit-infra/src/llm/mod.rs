//! Completion provider construction.

pub mod openai_compat;

use brandkit_core::llm::box_provider::BoxLlmProvider;
use brandkit_types::config::CompletionConfig;
use brandkit_types::llm::LlmError;
use secrecy::{ExposeSecret, SecretString};

use self::openai_compat::{OpenAiCompatConfig, OpenAiCompatibleProvider};

/// Build the configured completion provider.
///
/// Every supported host speaks the OpenAI chat-completions protocol, so the
/// provider name only labels spans and logs. Fails when no key is available.
pub fn create_provider(
    config: &CompletionConfig,
    api_key: Option<&SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    let api_key = api_key.ok_or(LlmError::AuthenticationFailed)?;
    let provider = OpenAiCompatibleProvider::new(OpenAiCompatConfig {
        provider_name: config.provider_name.clone(),
        base_url: config.base_url.clone(),
        api_key: SecretString::from(api_key.expose_secret().to_string()),
        model: config.model.clone(),
        capabilities: openai_compat::capabilities_for_model(&config.model),
    });
    Ok(BoxLlmProvider::new(provider))
}
