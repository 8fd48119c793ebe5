//! Conversation wizard types.
//!
//! The wizard is a linear, forward-only state machine:
//! `AwaitingBrandName -> AwaitingBrandDescription -> PipelineRunning -> Done`.
//! Transitions are computed in `brandkit-core::wizard::transition`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::asset::AssetBundle;
use crate::brand::{BrandDraft, Transcript};

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    AwaitingBrandName,
    AwaitingBrandDescription,
    PipelineRunning,
    Done,
}

impl WizardStep {
    /// Whether the wizard accepts user utterances in this step.
    pub fn accepts_input(&self) -> bool {
        matches!(
            self,
            WizardStep::AwaitingBrandName | WizardStep::AwaitingBrandDescription
        )
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardStep::AwaitingBrandName => write!(f, "awaiting_brand_name"),
            WizardStep::AwaitingBrandDescription => write!(f, "awaiting_brand_description"),
            WizardStep::PipelineRunning => write!(f, "pipeline_running"),
            WizardStep::Done => write!(f, "done"),
        }
    }
}

/// Input to the wizard's transition function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// The completion reply carried a finalized brand name.
    NameFinalized(String),
    /// The completion reply carried a finalized brand description.
    DescriptionFinalized(String),
    /// The reply carried no finalize signal for the current step.
    Unfinalized,
    /// The asset pipeline settled.
    PipelineSettled,
}

/// Which draft field a turn finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalizedField {
    BrandName,
    BrandDescription,
}

/// A full wizard session: step, draft, transcript and (once done) the bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardSession {
    pub id: Uuid,
    pub step: WizardStep,
    pub draft: BrandDraft,
    pub transcript: Transcript,
    pub bundle: Option<AssetBundle>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The bot's side of one wizard turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardTurn {
    /// Display message for the user (also what gets spoken).
    pub reply: String,
    /// Step after the turn.
    pub step: WizardStep,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalized: Option<FinalizedField>,
    /// Present on the turn that ran the pipeline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<AssetBundle>,
}
