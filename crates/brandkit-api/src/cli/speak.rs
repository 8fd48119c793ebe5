//! Text-to-speech into an audio file.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use brandkit_core::service::speech::SpeechSynthesizer;
use brandkit_infra::config::{ApiKeys, load_app_config, resolve_data_dir};
use brandkit_infra::speech::elevenlabs::ElevenLabsSynthesizer;
use brandkit_types::media::SpeechRequest;

use super::output::spinner;

/// Synthesize `text` and write the clip to `out`.
///
/// Needs only the speech key, so it runs without the full app state.
pub async fn speak(text: &str, out: &Path, json: bool) -> Result<()> {
    let text = text.trim();
    anyhow::ensure!(!text.is_empty(), "nothing to say: text is empty");

    let config = load_app_config(&resolve_data_dir()).await;
    let synthesizer = ElevenLabsSynthesizer::new(&config.speech, ApiKeys::from_env().elevenlabs);

    let progress = spinner("Synthesizing speech...");
    let result = synthesizer
        .synthesize(&SpeechRequest {
            text: text.to_string(),
            voice: config.speech.voice(),
        })
        .await;
    progress.finish_and_clear();
    let clip = result.context("speech synthesis failed")?;

    tokio::fs::write(out, &clip.bytes)
        .await
        .with_context(|| format!("failed to write {}", out.display()))?;

    if json {
        let summary = serde_json::json!({
            "path": out.display().to_string(),
            "mime_type": clip.mime_type,
            "bytes": clip.bytes.len(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "  {} Wrote {} bytes of {} to {}",
            style("✓").green().bold(),
            clip.bytes.len(),
            clip.mime_type,
            style(out.display()).cyan()
        );
    }

    Ok(())
}
