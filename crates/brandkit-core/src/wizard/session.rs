//! WizardSession lifecycle helpers.
//!
//! `WizardSession` lives in `brandkit-types`; the extension trait here adds
//! the behaviour the controller needs without an inherent impl.

use brandkit_types::brand::{BrandBrief, BrandDraft, Speaker, Transcript};
use brandkit_types::error::PipelineError;
use brandkit_types::wizard::{WizardEvent, WizardSession, WizardStep};
use chrono::Utc;
use uuid::Uuid;

use super::transition::transition;

/// A fresh session waiting for the brand name.
pub fn new_wizard_session() -> WizardSession {
    let now = Utc::now();
    WizardSession {
        id: Uuid::now_v7(),
        step: WizardStep::AwaitingBrandName,
        draft: BrandDraft::default(),
        transcript: Transcript::new(),
        bundle: None,
        created_at: now,
        updated_at: now,
    }
}

pub trait WizardSessionExt {
    /// Append a line to the transcript.
    fn record(&mut self, speaker: Speaker, text: impl Into<String>);

    /// Apply an event: write finalized values into the draft and advance the
    /// step. Returns the new step, or `None` if the event was not accepted.
    fn apply(&mut self, event: &WizardEvent) -> Option<WizardStep>;

    /// The brief for the pipeline. Fails until both fields are finalized.
    fn brief(&self) -> Result<BrandBrief, PipelineError>;

    fn is_done(&self) -> bool;
}

impl WizardSessionExt for WizardSession {
    fn record(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.transcript.push(speaker, text);
        self.updated_at = Utc::now();
    }

    fn apply(&mut self, event: &WizardEvent) -> Option<WizardStep> {
        let next = transition(self.step, event)?;
        match event {
            WizardEvent::NameFinalized(name) => self.draft.name = Some(name.clone()),
            WizardEvent::DescriptionFinalized(desc) => self.draft.description = Some(desc.clone()),
            WizardEvent::Unfinalized | WizardEvent::PipelineSettled => {}
        }
        self.step = next;
        self.updated_at = Utc::now();
        Some(next)
    }

    fn brief(&self) -> Result<BrandBrief, PipelineError> {
        self.draft.to_brief()
    }

    fn is_done(&self) -> bool {
        self.step == WizardStep::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_awaits_name() {
        let session = new_wizard_session();
        assert_eq!(session.step, WizardStep::AwaitingBrandName);
        assert!(session.transcript.is_empty());
        assert!(session.brief().is_err());
    }

    #[test]
    fn apply_fills_draft_and_advances() {
        let mut session = new_wizard_session();
        let step = session.apply(&WizardEvent::NameFinalized("Flight Mobile".into()));
        assert_eq!(step, Some(WizardStep::AwaitingBrandDescription));
        assert_eq!(session.draft.name.as_deref(), Some("Flight Mobile"));

        session.apply(&WizardEvent::DescriptionFinalized("Prepaid plans".into()));
        let brief = session.brief().unwrap();
        assert_eq!(brief.name(), "Flight Mobile");
        assert_eq!(session.step, WizardStep::PipelineRunning);
    }

    #[test]
    fn rejected_event_leaves_draft_untouched() {
        let mut session = new_wizard_session();
        session.apply(&WizardEvent::NameFinalized("Flight Mobile".into()));
        assert!(session
            .apply(&WizardEvent::NameFinalized("Other".into()))
            .is_none());
        assert_eq!(session.draft.name.as_deref(), Some("Flight Mobile"));
    }
}
