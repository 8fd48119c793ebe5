//! Completion request construction from configuration.

use brandkit_types::config::CompletionConfig;
use brandkit_types::llm::{CompletionRequest, LlmError, Message};

use super::box_provider::BoxLlmProvider;

/// Build a request using the configured model, token limit and temperature.
pub fn build_request(
    config: &CompletionConfig,
    system: impl Into<String>,
    messages: Vec<Message>,
) -> CompletionRequest {
    CompletionRequest {
        model: config.model.clone(),
        messages,
        system: Some(system.into()),
        max_tokens: config.max_tokens,
        temperature: config.temperature,
        stop_sequences: None,
    }
}

/// Run a completion and return the trimmed text of the reply.
#[tracing::instrument(
    name = "complete_text",
    skip(provider, config, system, messages),
    fields(provider = %provider.name(), model = %config.model)
)]
pub async fn complete_text(
    provider: &BoxLlmProvider,
    config: &CompletionConfig,
    system: &str,
    messages: Vec<Message>,
) -> Result<String, LlmError> {
    let request = build_request(config, system, messages);
    let response = provider.complete(&request).await?;
    tracing::debug!(
        response_id = %response.id,
        stop_reason = %response.stop_reason,
        output_tokens = response.usage.output_tokens,
        "completion received"
    );
    Ok(response.content.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedProvider;

    #[test]
    fn build_request_uses_config() {
        let config = CompletionConfig {
            model: "gpt-4o-mini".into(),
            max_tokens: 300,
            temperature: Some(0.2),
            ..CompletionConfig::default()
        };
        let request = build_request(&config, "be brief", vec![Message::user("hi")]);
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.max_tokens, 300);
        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.system.as_deref(), Some("be brief"));
    }

    #[tokio::test]
    async fn complete_text_trims_reply() {
        let provider = BoxLlmProvider::new(ScriptedProvider::always("  Hello there \n"));
        let text = complete_text(
            &provider,
            &CompletionConfig::default(),
            "system",
            vec![Message::user("hi")],
        )
        .await
        .unwrap();
        assert_eq!(text, "Hello there");
    }
}
