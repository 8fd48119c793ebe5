//! Completion provider decorator that records GenAI span attributes.
//!
//! Every completion made by the binary goes through [`TracedProvider`], so
//! OTel export (`--otel`) sees one `gen_ai.chat` span per call with model,
//! token usage and finish reason attached.

use std::future::Future;

use tracing::field::{Empty, display};
use tracing::{Instrument, Span, info_span};

use brandkit_core::llm::box_provider::BoxLlmProvider;
use brandkit_core::llm::provider::LlmProvider;
use brandkit_observe::genai_attrs::{
    GEN_AI_OPERATION_NAME, GEN_AI_PROVIDER_NAME, GEN_AI_REQUEST_MAX_TOKENS, GEN_AI_REQUEST_MODEL,
    GEN_AI_RESPONSE_FINISH_REASONS, GEN_AI_RESPONSE_ID, GEN_AI_USAGE_INPUT_TOKENS,
    GEN_AI_USAGE_OUTPUT_TOKENS, OP_CHAT,
};
use brandkit_types::llm::{CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities};

pub struct TracedProvider {
    inner: BoxLlmProvider,
}

impl TracedProvider {
    pub fn new(inner: BoxLlmProvider) -> Self {
        Self { inner }
    }
}

impl LlmProvider for TracedProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        self.inner.capabilities()
    }

    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
        let span = info_span!(
            "gen_ai.chat",
            gen_ai.operation.name = Empty,
            gen_ai.provider.name = Empty,
            gen_ai.request.model = Empty,
            gen_ai.request.max_tokens = Empty,
            gen_ai.response.id = Empty,
            gen_ai.response.finish_reasons = Empty,
            gen_ai.usage.input_tokens = Empty,
            gen_ai.usage.output_tokens = Empty,
        );
        span.record(GEN_AI_OPERATION_NAME, OP_CHAT);
        span.record(GEN_AI_PROVIDER_NAME, self.inner.name());
        span.record(GEN_AI_REQUEST_MODEL, request.model.as_str());
        span.record(GEN_AI_REQUEST_MAX_TOKENS, request.max_tokens);

        async move {
            let response = self.inner.complete(request).await?;
            let span = Span::current();
            span.record(GEN_AI_RESPONSE_ID, response.id.as_str());
            span.record(GEN_AI_RESPONSE_FINISH_REASONS, display(&response.stop_reason));
            span.record(GEN_AI_USAGE_INPUT_TOKENS, response.usage.input_tokens);
            span.record(GEN_AI_USAGE_OUTPUT_TOKENS, response.usage.output_tokens);
            Ok(response)
        }
        .instrument(span)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use brandkit_types::llm::{Message, StopReason, Usage};

    /// Replies with a fixed text to every request.
    pub(crate) struct FixedProvider {
        pub reply: String,
        capabilities: ProviderCapabilities,
    }

    impl FixedProvider {
        pub(crate) fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                capabilities: ProviderCapabilities {
                    vision: false,
                    json_mode: false,
                    max_context_tokens: 16_385,
                    max_output_tokens: 4_096,
                },
            }
        }
    }

    impl LlmProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn capabilities(&self) -> &ProviderCapabilities {
            &self.capabilities
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            Ok(CompletionResponse {
                id: "resp-1".into(),
                content: self.reply.clone(),
                model: request.model.clone(),
                stop_reason: StopReason::EndTurn,
                usage: Usage {
                    input_tokens: 12,
                    output_tokens: 5,
                },
            })
        }
    }

    #[tokio::test]
    async fn passes_requests_through() {
        let traced = TracedProvider::new(BoxLlmProvider::new(FixedProvider::new("Acme")));
        assert_eq!(LlmProvider::name(&traced), "fixed");

        let request = CompletionRequest {
            model: "gpt-3.5-turbo".into(),
            messages: vec![Message::user("hi")],
            system: None,
            max_tokens: 64,
            temperature: None,
            stop_sequences: None,
        };
        let response = traced.complete(&request).await.unwrap();
        assert_eq!(response.content, "Acme");
        assert_eq!(response.model, "gpt-3.5-turbo");
        assert_eq!(response.usage.output_tokens, 5);
    }
}
