//! Brand draft and conversation transcript types.
//!
//! A [`BrandDraft`] is the name/description pair collected by the wizard. Once
//! both halves are finalized it is frozen into a [`BrandBrief`], the only input
//! the asset pipeline accepts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// The name/description pair being collected during a wizard session.
///
/// A field is finalized when it holds `Some`. Fields are only ever set once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandDraft {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl BrandDraft {
    pub fn name_finalized(&self) -> bool {
        self.name.is_some()
    }

    pub fn description_finalized(&self) -> bool {
        self.description.is_some()
    }

    /// Freeze the draft into a brief. Fails while either half is missing.
    pub fn to_brief(&self) -> Result<BrandBrief, PipelineError> {
        BrandBrief::new(
            self.name.clone().unwrap_or_default(),
            self.description.clone().unwrap_or_default(),
        )
    }
}

/// A validated brand name + description, ready for asset generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandBrief {
    name: String,
    description: String,
}

impl BrandBrief {
    /// Build a brief, rejecting blank fields.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, PipelineError> {
        let name = name.into().trim().to_string();
        let description = description.into().trim().to_string();
        if name.is_empty() {
            return Err(PipelineError::MissingField("brandName"));
        }
        if description.is_empty() {
            return Err(PipelineError::MissingField("brandDescription"));
        }
        Ok(Self { name, description })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Fallback site address: `https://www.{name without whitespace, lowercased}.com`.
    pub fn fallback_website(&self) -> String {
        let compact: String = self
            .name
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        format!("https://www.{compact}.com")
    }
}

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::User => write!(f, "user"),
            Speaker::Bot => write!(f, "bot"),
        }
    }
}

/// A single line of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
}

/// Append-only record of the conversation, sent as rolling context on
/// every completion turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            speaker,
            text: text.into(),
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }
}

impl From<Vec<TranscriptEntry>> for Transcript {
    fn from(entries: Vec<TranscriptEntry>) -> Self {
        Self { entries }
    }
}
