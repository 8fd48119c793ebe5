//! OpenAI-compatible transcription (`POST {base}/audio/transcriptions`).

use std::time::Duration;

use reqwest::multipart;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use brandkit_core::service::speech::SpeechRecognizer;
use brandkit_types::config::SpeechConfig;
use brandkit_types::error::ServiceError;
use brandkit_types::media::AudioClip;

use crate::http;

const SERVICE: &str = "speech recognition";

#[derive(Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

/// Does not derive Debug: holds the API key.
pub struct WhisperRecognizer {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
}

impl WhisperRecognizer {
    pub fn new(config: &SpeechConfig, api_key: Option<SecretString>) -> Self {
        Self {
            client: http::client(Duration::from_secs(120)),
            api_key,
            base_url: config.transcription_base_url.trim_end_matches('/').to_string(),
            model: config.transcription_model.clone(),
        }
    }
}

impl SpeechRecognizer for WhisperRecognizer {
    #[tracing::instrument(name = "speech.transcribe", skip_all, fields(model = %self.model, bytes = clip.bytes.len()))]
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, ServiceError> {
        let key = http::require(SERVICE, self.api_key.as_ref())?;

        let part = multipart::Part::bytes(clip.bytes.clone())
            .file_name(format!("utterance.{}", clip.extension()))
            .mime_str(&clip.mime_type)
            .map_err(|e| ServiceError::InvalidRequest(e.to_string()))?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone());

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(key.expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(http::transport(SERVICE))?;
        let response = http::ensure_success(SERVICE, response).await?;
        let parsed: TranscriptionResponse = http::read_json(SERVICE, response).await?;

        Ok(parsed.text.trim().to_string())
    }
}
