//! Application configuration types.
//!
//! `AppConfig` mirrors `config.toml` in the data directory. Every field has a
//! default, so an empty file (or no file) is a valid configuration. API keys
//! are deliberately absent: they are read from the environment.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::media::{LogoRequest, VoiceSettings};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub images: ImageConfig,
    #[serde(default)]
    pub image_search: ImageSearchConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub logo: LogoConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Text-completion service settings (any OpenAI-compatible host).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_provider_name")]
    pub provider_name: String,
    #[serde(default = "default_openai_base")]
    pub base_url: String,
    #[serde(default = "default_completion_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub temperature: Option<f64>,
}

fn default_provider_name() -> String {
    "openai".to_string()
}

fn default_openai_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_completion_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            provider_name: default_provider_name(),
            base_url: default_openai_base(),
            model: default_completion_model(),
            max_tokens: default_max_tokens(),
            temperature: None,
        }
    }
}

/// Image-generation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(default = "default_openai_base")]
    pub base_url: String,
    #[serde(default = "default_image_model")]
    pub model: String,
    #[serde(default = "default_image_size")]
    pub size: String,
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_image_size() -> String {
    "1024x1024".to_string()
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: default_openai_base(),
            model: default_image_model(),
            size: default_image_size(),
        }
    }
}

/// Stock-photo search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSearchConfig {
    #[serde(default = "default_search_base")]
    pub base_url: String,
    /// Cover, phone compatibility and coverage need three results.
    #[serde(default = "default_per_page")]
    pub per_page: u8,
}

fn default_search_base() -> String {
    "https://api.unsplash.com".to_string()
}

fn default_per_page() -> u8 {
    3
}

impl Default for ImageSearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_base(),
            per_page: default_per_page(),
        }
    }
}

/// Speech synthesis and transcription settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_speech_base")]
    pub base_url: String,
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
    #[serde(default = "default_voice_ratio")]
    pub stability: f32,
    #[serde(default = "default_voice_ratio")]
    pub similarity_boost: f32,
    #[serde(default = "default_openai_base")]
    pub transcription_base_url: String,
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,
}

fn default_speech_base() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_voice_id() -> String {
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

fn default_voice_ratio() -> f32 {
    0.5
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

impl SpeechConfig {
    pub fn voice(&self) -> VoiceSettings {
        VoiceSettings {
            voice_id: self.voice_id.clone(),
            stability: self.stability,
            similarity_boost: self.similarity_boost,
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            base_url: default_speech_base(),
            voice_id: default_voice_id(),
            stability: default_voice_ratio(),
            similarity_boost: default_voice_ratio(),
            transcription_base_url: default_openai_base(),
            transcription_model: default_transcription_model(),
        }
    }
}

/// Image upload (Cloudinary) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default)]
    pub cloud_name: Option<String>,
    #[serde(default = "default_upload_folder")]
    pub folder: String,
    #[serde(default = "default_upload_base")]
    pub base_url: String,
}

fn default_upload_folder() -> String {
    "brandkit_uploads".to_string()
}

fn default_upload_base() -> String {
    "https://api.cloudinary.com/v1_1".to_string()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            cloud_name: None,
            folder: default_upload_folder(),
            base_url: default_upload_base(),
        }
    }
}

/// Logo rendering service settings. The logo branch only runs when
/// `endpoint` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_bg_color")]
    pub bg_color: String,
    #[serde(default = "default_font_color")]
    pub font_color: String,
}

fn default_font_family() -> String {
    "Montserrat".to_string()
}

fn default_bg_color() -> String {
    "#FFFFFF".to_string()
}

fn default_font_color() -> String {
    "#1A1A2E".to_string()
}

impl LogoConfig {
    pub fn request_for(&self, brand_name: &str) -> LogoRequest {
        LogoRequest {
            brand_name: brand_name.to_string(),
            font_family: self.font_family.clone(),
            bg_color: self.bg_color.clone(),
            font_color: self.font_color.clone(),
        }
    }
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            font_family: default_font_family(),
            bg_color: default_bg_color(),
            font_color: default_font_color(),
        }
    }
}

/// How the pipeline schedules its branches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineMode {
    /// Independent branches run together and are joined.
    #[default]
    Concurrent,
    /// Each branch is awaited before the next starts.
    Sequential,
}

impl fmt::Display for PipelineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineMode::Concurrent => write!(f, "concurrent"),
            PipelineMode::Sequential => write!(f, "sequential"),
        }
    }
}

/// Asset pipeline settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub mode: PipelineMode,
    /// Pause between consecutive image-generation calls, in milliseconds.
    #[serde(default)]
    pub image_spacing_ms: u64,
}

/// REST server bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.completion.model, "gpt-3.5-turbo");
        assert_eq!(config.images.model, "dall-e-3");
        assert_eq!(config.images.size, "1024x1024");
        assert_eq!(config.image_search.per_page, 3);
        assert_eq!(config.pipeline.mode, PipelineMode::Concurrent);
        assert!(config.logo.endpoint.is_none());
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let toml_str = r#"
[completion]
model = "gpt-4o-mini"

[pipeline]
mode = "sequential"
image_spacing_ms = 12000

[logo]
endpoint = "http://localhost:8000"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.completion.model, "gpt-4o-mini");
        assert_eq!(config.completion.base_url, "https://api.openai.com/v1");
        assert_eq!(config.pipeline.mode, PipelineMode::Sequential);
        assert_eq!(config.pipeline.image_spacing_ms, 12_000);
        assert_eq!(config.logo.endpoint.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.logo.font_family, "Montserrat");
    }

    #[test]
    fn speech_voice_settings() {
        let voice = SpeechConfig::default().voice();
        assert_eq!(voice.stability, 0.5);
        assert_eq!(voice.similarity_boost, 0.5);
    }

    #[test]
    fn logo_request_uses_configured_styling() {
        let config = LogoConfig {
            font_color: "#FF0000".into(),
            ..LogoConfig::default()
        };
        let request = config.request_for("Acme");
        assert_eq!(request.brand_name, "Acme");
        assert_eq!(request.font_color, "#FF0000");
    }
}
