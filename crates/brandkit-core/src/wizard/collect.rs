//! One completion turn per collection step.
//!
//! Each turn sends the step's system prompt, the whole transcript and the new
//! utterance, then reads the finalize signal out of the reply.

use brandkit_types::brand::Transcript;
use brandkit_types::config::CompletionConfig;
use brandkit_types::llm::LlmError;
use brandkit_types::wizard::WizardEvent;

use crate::extract::read_finalize_signal;
use crate::llm::box_provider::BoxLlmProvider;
use crate::llm::history::conversation_messages;
use crate::llm::request::complete_text;
use crate::prompt::{BRAND_DESCRIPTION_SYSTEM_PROMPT, BRAND_NAME_SYSTEM_PROMPT};

pub const BRAND_NAME_KEY: &str = "brandName";
pub const BRAND_DESCRIPTION_KEY: &str = "brandDescription";

/// What one collection turn produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedTurn {
    /// Message for the user.
    pub display: String,
    pub event: WizardEvent,
}

pub fn name_finalized_message(name: &str) -> String {
    format!("Your perfect brand name is {name}! It's unique, powerful, and ready for success.")
}

pub fn description_finalized_message(description: &str) -> String {
    format!("Your brand description: **{description}**")
}

async fn collect(
    provider: &BoxLlmProvider,
    config: &CompletionConfig,
    system: &str,
    key: &str,
    transcript: &Transcript,
    utterance: &str,
) -> Result<(String, Option<String>), LlmError> {
    let messages = conversation_messages(transcript, utterance);
    let reply = complete_text(provider, config, system, messages).await?;
    let signal = read_finalize_signal(&reply, key);
    let value = signal
        .value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    Ok((signal.display, value))
}

/// Brand-name step. Finalizes when the reply carries `brandName`.
#[tracing::instrument(skip_all)]
pub async fn brand_name_turn(
    provider: &BoxLlmProvider,
    config: &CompletionConfig,
    transcript: &Transcript,
    utterance: &str,
) -> Result<CollectedTurn, LlmError> {
    let (display, value) = collect(
        provider,
        config,
        BRAND_NAME_SYSTEM_PROMPT,
        BRAND_NAME_KEY,
        transcript,
        utterance,
    )
    .await?;

    Ok(match value {
        Some(name) => CollectedTurn {
            display: name_finalized_message(&name),
            event: WizardEvent::NameFinalized(name),
        },
        None => CollectedTurn {
            display,
            event: WizardEvent::Unfinalized,
        },
    })
}

/// Brand-description step. Finalizes when the reply carries `brandDescription`.
#[tracing::instrument(skip_all)]
pub async fn brand_description_turn(
    provider: &BoxLlmProvider,
    config: &CompletionConfig,
    transcript: &Transcript,
    utterance: &str,
) -> Result<CollectedTurn, LlmError> {
    let (display, value) = collect(
        provider,
        config,
        BRAND_DESCRIPTION_SYSTEM_PROMPT,
        BRAND_DESCRIPTION_KEY,
        transcript,
        utterance,
    )
    .await?;

    Ok(match value {
        Some(description) => CollectedTurn {
            display: description_finalized_message(&description),
            event: WizardEvent::DescriptionFinalized(description),
        },
        None => CollectedTurn {
            display,
            event: WizardEvent::Unfinalized,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandkit_types::brand::Speaker;
    use std::sync::Arc;

    use crate::testing::ScriptedProvider;

    #[tokio::test]
    async fn name_turn_finalizes_on_json() {
        let p = BoxLlmProvider::new(ScriptedProvider::always(
            "```json\n{\"brandName\": \"Flight Mobile\"}\n```",
        ));
        let turn = brand_name_turn(&p, &CompletionConfig::default(), &Transcript::new(), "Flight Mobile")
            .await
            .unwrap();
        assert_eq!(turn.event, WizardEvent::NameFinalized("Flight Mobile".into()));
        assert_eq!(
            turn.display,
            "Your perfect brand name is Flight Mobile! It's unique, powerful, and ready for success."
        );
    }

    #[tokio::test]
    async fn name_turn_without_signal_shows_model_text() {
        let p = BoxLlmProvider::new(ScriptedProvider::always(
            "  How about SkyLink or AeroTalk?  ",
        ));
        let turn = brand_name_turn(&p, &CompletionConfig::default(), &Transcript::new(), "ideas?")
            .await
            .unwrap();
        assert_eq!(turn.event, WizardEvent::Unfinalized);
        assert_eq!(turn.display, "How about SkyLink or AeroTalk?");
    }

    #[tokio::test]
    async fn blank_value_does_not_finalize() {
        let p = BoxLlmProvider::new(ScriptedProvider::always(r#"{"brandName": "  "}"#));
        let turn = brand_name_turn(&p, &CompletionConfig::default(), &Transcript::new(), "x")
            .await
            .unwrap();
        assert_eq!(turn.event, WizardEvent::Unfinalized);
    }

    #[tokio::test]
    async fn description_turn_uses_regex_fallback() {
        let p = BoxLlmProvider::new(ScriptedProvider::always(
            r#"Great, locking it in: "brandDescription": "Prepaid plans for frequent flyers" {"#,
        ));
        let turn = brand_description_turn(&p, &CompletionConfig::default(), &Transcript::new(), "yes")
            .await
            .unwrap();
        assert_eq!(
            turn.event,
            WizardEvent::DescriptionFinalized("Prepaid plans for frequent flyers".into())
        );
        assert_eq!(
            turn.display,
            "Your brand description: **Prepaid plans for frequent flyers**"
        );
    }

    #[tokio::test]
    async fn transcript_and_system_prompt_are_sent() {
        let scripted = Arc::new(ScriptedProvider::always("Tell me more."));
        let p = BoxLlmProvider::new(scripted.clone());
        let mut transcript = Transcript::new();
        transcript.push(Speaker::Bot, "What is your brand name?");
        transcript.push(Speaker::User, "Flight Mobile");

        brand_description_turn(&p, &CompletionConfig::default(), &transcript, "We sell eSIMs")
            .await
            .unwrap();

        let request = &scripted.requests()[0];
        assert_eq!(request.system.as_deref(), Some(BRAND_DESCRIPTION_SYSTEM_PROMPT));
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[2].content, "We sell eSIMs");
    }

    #[tokio::test]
    async fn completion_failure_propagates() {
        let p = BoxLlmProvider::new(ScriptedProvider::failing());
        let err = brand_name_turn(&p, &CompletionConfig::default(), &Transcript::new(), "x")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Provider { .. }));
    }
}
