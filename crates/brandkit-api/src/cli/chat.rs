//! Interactive brand wizard in the terminal, with an optional voice mode.
//!
//! Voice mode speaks every bot reply into an audio file (one per reply) and
//! takes each answer as a push-to-talk line from the terminal. If speech
//! fails at any point the session carries on in text mode.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use dialoguer::Input;

use brandkit_core::service::speech::UtteranceSource;
use brandkit_core::voice::{Heard, VoiceAdapter, VoiceState};
use brandkit_core::wizard::session::new_wizard_session;
use brandkit_infra::config::ApiKeys;
use brandkit_infra::snapshot::write_snapshot;
use brandkit_infra::speech::elevenlabs::ElevenLabsSynthesizer;
use brandkit_infra::speech::file_sink::FileAudioSink;
use brandkit_types::error::{VoiceError, WizardError};
use brandkit_types::media::RecognitionEvent;
use brandkit_types::wizard::WizardStep;

use super::output::{print_bot, print_bundle, spinner};
use crate::state::AppState;

type TerminalVoice = VoiceAdapter<ElevenLabsSynthesizer, TerminalUtterances, FileAudioSink>;

/// Push-to-talk over stdin: one line is one utterance, a blank line is no
/// speech, end of input closes the source.
pub struct TerminalUtterances;

impl UtteranceSource for TerminalUtterances {
    async fn next_event(&mut self) -> Result<Option<RecognitionEvent>, VoiceError> {
        let line = tokio::task::spawn_blocking(|| {
            print!("  {} ", style("you (voice)>").cyan().bold());
            std::io::stdout().flush()?;
            let mut line = String::new();
            let read = std::io::stdin().read_line(&mut line)?;
            Ok::<_, std::io::Error>((read > 0).then_some(line))
        })
        .await
        .map_err(|e| VoiceError::Recognition(e.to_string()))?
        .map_err(|e| VoiceError::Recognition(e.to_string()))?;

        Ok(line.map(|line| match line.trim() {
            "" => RecognitionEvent::NoSpeech,
            text => RecognitionEvent::Final(text.to_string()),
        }))
    }
}

async fn voice_adapter(state: &AppState, dir: PathBuf) -> Result<TerminalVoice> {
    let synthesizer = ElevenLabsSynthesizer::new(&state.config.speech, ApiKeys::from_env().elevenlabs);
    let sink = FileAudioSink::create(dir)
        .await
        .context("failed to prepare the voice output directory")?;
    Ok(VoiceAdapter::new(
        synthesizer,
        TerminalUtterances,
        sink,
        state.config.speech.voice(),
    ))
}

/// Next user utterance, by voice while the adapter is healthy and by text
/// otherwise. `reply` is spoken first when present. `None` ends the chat.
async fn next_utterance(
    voice: &mut Option<TerminalVoice>,
    reply: Option<String>,
    step: WizardStep,
) -> Result<Option<String>> {
    if let Some(adapter) = voice.as_mut().filter(|v| v.state() != VoiceState::Disabled) {
        let heard = match reply {
            Some(reply) => adapter
                .reply_and_listen(&reply, step)
                .await
                .map(|heard| heard.unwrap_or(Heard::Closed)),
            None => adapter.listen().await,
        };
        match heard {
            Ok(Heard::Speech(text)) => return Ok(Some(text)),
            Ok(Heard::Silence) => return Ok(Some(String::new())),
            Ok(Heard::Closed) => return Ok(None),
            Err(e) => {
                eprintln!(
                    "  {} Voice disabled ({e}); continuing with text input.",
                    style("!").yellow().bold()
                );
            }
        }
    }

    let text: String = Input::new()
        .with_prompt("you")
        .allow_empty(true)
        .interact_text()?;
    Ok(Some(text))
}

/// Run the wizard until the bundle is ready (or input ends).
pub async fn chat(
    state: &AppState,
    voice_dir: Option<PathBuf>,
    snapshot: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let mut voice = match voice_dir {
        Some(dir) => Some(voice_adapter(state, dir).await?),
        None => None,
    };

    let mut session = new_wizard_session();
    let opening = state.wizard.opening_turn(&mut session);
    tracing::debug!(session_id = %session.id, voice = voice.is_some(), "chat started");

    println!();
    println!(
        "  {} Brandkit wizard {}",
        style("◆").cyan().bold(),
        style("(Ctrl+C to quit)").dim()
    );
    print_bot(&opening.reply);
    let mut unspoken = Some(opening.reply);

    while session.step.accepts_input() {
        let Some(utterance) = next_utterance(&mut voice, unspoken.take(), session.step).await?
        else {
            println!("  {}", style("Input closed.").dim());
            return Ok(());
        };
        if utterance.trim().is_empty() {
            println!("  {}", style("I didn't catch that, please try again.").dim());
            continue;
        }

        let progress = spinner(match session.step {
            WizardStep::AwaitingBrandDescription => {
                "Thinking... (assets are generated once the description is set)"
            }
            _ => "Thinking...",
        });
        let result = state.wizard.handle_utterance(&mut session, &utterance).await;
        progress.finish_and_clear();

        match result {
            Ok(turn) => {
                print_bot(&turn.reply);
                unspoken = Some(turn.reply);
            }
            Err(WizardError::Completion(e)) => {
                eprintln!(
                    "  {} The completion service failed ({e}). Please try again.",
                    style("✗").red().bold()
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    if let (Some(adapter), Some(reply)) = (voice.as_mut(), unspoken.take()) {
        if adapter.state() != VoiceState::Disabled {
            if let Err(e) = adapter.reply_and_listen(&reply, session.step).await {
                tracing::warn!(error = %e, "final reply was not spoken");
            }
        }
    }

    let Some(bundle) = session.bundle.as_ref() else {
        return Ok(());
    };
    print_bundle(bundle, json)?;

    if let Some(path) = snapshot {
        write_snapshot(&path, bundle)
            .await
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
        println!(
            "  {} Landing page written to {}",
            style("✓").green().bold(),
            style(path.display()).cyan()
        );
    }
    if let Some(adapter) = &voice {
        println!(
            "  {} spoken replies in {}",
            style(adapter.sink().written().len()).bold(),
            style(adapter.sink().dir().display()).dim()
        );
    }

    Ok(())
}
