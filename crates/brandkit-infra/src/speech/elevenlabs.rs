//! ElevenLabs text-to-speech (`POST {base}/v1/text-to-speech/{voice_id}`).

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use brandkit_core::service::speech::SpeechSynthesizer;
use brandkit_types::config::SpeechConfig;
use brandkit_types::error::ServiceError;
use brandkit_types::media::{AudioClip, SpeechRequest};

use crate::http;

const SERVICE: &str = "speech synthesis";

#[derive(Serialize)]
struct SynthesisBody<'a> {
    text: &'a str,
    voice_settings: VoiceSettingsBody,
}

#[derive(Serialize)]
struct VoiceSettingsBody {
    stability: f32,
    similarity_boost: f32,
}

/// Does not derive Debug: holds the API key.
pub struct ElevenLabsSynthesizer {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
}

impl ElevenLabsSynthesizer {
    pub fn new(config: &SpeechConfig, api_key: Option<SecretString>) -> Self {
        Self {
            client: http::client(Duration::from_secs(60)),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl SpeechSynthesizer for ElevenLabsSynthesizer {
    #[tracing::instrument(name = "speech.synthesize", skip_all, fields(voice_id = %request.voice.voice_id, chars = request.text.len()))]
    async fn synthesize(&self, request: &SpeechRequest) -> Result<AudioClip, ServiceError> {
        let key = http::require(SERVICE, self.api_key.as_ref())?;
        let body = SynthesisBody {
            text: &request.text,
            voice_settings: VoiceSettingsBody {
                stability: request.voice.stability,
                similarity_boost: request.voice.similarity_boost,
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/v1/text-to-speech/{}",
                self.base_url, request.voice.voice_id
            ))
            .header("xi-api-key", key.expose_secret())
            .header("Accept", "audio/mpeg")
            .json(&body)
            .send()
            .await
            .map_err(http::transport(SERVICE))?;
        let response = http::ensure_success(SERVICE, response).await?;

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .unwrap_or_else(|| "audio/mpeg".to_string());
        let bytes = response.bytes().await.map_err(http::transport(SERVICE))?;
        if bytes.is_empty() {
            return Err(ServiceError::Empty { service: SERVICE });
        }

        Ok(AudioClip {
            bytes: bytes.to_vec(),
            mime_type,
        })
    }
}
