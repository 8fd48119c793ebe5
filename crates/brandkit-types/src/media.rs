//! Request/response shapes for the non-completion hosted services:
//! image generation, image search, speech, upload and logo rendering.

use serde::{Deserialize, Serialize};

/// Request for generated images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
    pub count: u8,
    /// Dimensions as `WIDTHxHEIGHT`, e.g. `1024x1024`.
    pub size: String,
}

/// A single generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
}

/// Stock-photo search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSearchQuery {
    pub query: String,
    pub per_page: u8,
}

/// One photo record returned by the search service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    pub urls: PhotoUrls,
}

/// Size variants of a photo. Variants may carry query strings already.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUrls {
    #[serde(default)]
    pub raw: String,
    #[serde(default)]
    pub full: String,
    #[serde(default)]
    pub regular: String,
    #[serde(default)]
    pub small: String,
    #[serde(default)]
    pub thumb: String,
}

/// Voice parameters for speech synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub voice_id: String,
    pub stability: f32,
    pub similarity_boost: f32,
}

/// Full text to synthesize plus the voice to use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: VoiceSettings,
}

/// Binary audio plus its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl AudioClip {
    pub fn mpeg(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            mime_type: "audio/mpeg".to_string(),
        }
    }

    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "audio/mpeg" | "audio/mp3" => "mp3",
            "audio/wav" | "audio/x-wav" => "wav",
            "audio/webm" => "webm",
            "audio/ogg" => "ogg",
            _ => "bin",
        }
    }
}

/// An event from a speech recognizer. Only `Final` carries usable input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum RecognitionEvent {
    Interim(String),
    Final(String),
    NoSpeech,
}

/// Inline image data to persist, as a data URI or remote URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRequest {
    pub image: String,
}

/// A stored asset's permanent address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedAsset {
    pub url: String,
}

/// Wordmark rendering request for the logo service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoRequest {
    pub brand_name: String,
    pub font_family: String,
    pub bg_color: String,
    pub font_color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_record_tolerates_missing_variants() {
        let json = r#"{"id":"abc","urls":{"raw":"https://img/raw?ixid=1","small":"https://img/small?ixid=1"}}"#;
        let photo: PhotoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(photo.urls.raw, "https://img/raw?ixid=1");
        assert!(photo.urls.full.is_empty());
        assert!(photo.description.is_none());
    }

    #[test]
    fn recognition_event_tagging() {
        let event = RecognitionEvent::Final("Acme".into());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "final");
        assert_eq!(json["text"], "Acme");
    }

    #[test]
    fn audio_clip_extension() {
        assert_eq!(AudioClip::mpeg(vec![1]).extension(), "mp3");
        let clip = AudioClip {
            bytes: vec![],
            mime_type: "audio/webm".into(),
        };
        assert_eq!(clip.extension(), "webm");
    }
}
