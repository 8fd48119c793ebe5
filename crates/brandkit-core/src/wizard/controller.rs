//! Drives a wizard session from the first question to a finished bundle.

use std::sync::Arc;

use brandkit_types::brand::Speaker;
use brandkit_types::error::WizardError;
use brandkit_types::wizard::{FinalizedField, WizardEvent, WizardSession, WizardStep, WizardTurn};
use tokio::sync::OwnedMutexGuard;
use tokio::task::JoinHandle;

use super::collect::{self, CollectedTurn};
use super::session::WizardSessionExt;
use crate::assets::pipeline::AssetPipeline;
use crate::service::image::{ImageGenerator, ImageSearch};
use crate::service::logo::LogoGenerator;

pub const OPENING_QUESTION: &str =
    "Welcome. We will be creating your MVNO site. To start, please tell me your brand name.";

pub const DESCRIPTION_QUESTION: &str = "Tell us a bit about your brand.";

/// The step controller.
///
/// Owns the asset pipeline; sessions are passed in per call so the caller
/// decides how they are stored and locked.
pub struct BrandWizard<G, S, L> {
    pipeline: AssetPipeline<G, S, L>,
}

impl<G, S, L> BrandWizard<G, S, L>
where
    G: ImageGenerator,
    S: ImageSearch,
    L: LogoGenerator,
{
    pub fn new(pipeline: AssetPipeline<G, S, L>) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &AssetPipeline<G, S, L> {
        &self.pipeline
    }

    /// Ask the opening question. Only records it on an empty transcript.
    pub fn opening_turn(&self, session: &mut WizardSession) -> WizardTurn {
        if session.transcript.is_empty() {
            session.record(Speaker::Bot, OPENING_QUESTION);
        }
        WizardTurn {
            reply: OPENING_QUESTION.to_string(),
            step: session.step,
            finalized: None,
            bundle: None,
        }
    }

    /// Handle one user utterance.
    ///
    /// A failed completion leaves the session untouched. When the description
    /// is finalized the pipeline runs before this returns, and the session
    /// ends in `Done` with the bundle attached.
    #[tracing::instrument(skip_all, fields(session_id = %session.id, step = %session.step))]
    pub async fn handle_utterance(
        &self,
        session: &mut WizardSession,
        utterance: &str,
    ) -> Result<WizardTurn, WizardError> {
        if !session.step.accepts_input() {
            return Err(WizardError::NotAcceptingInput(session.step));
        }
        let utterance = utterance.trim();
        if utterance.is_empty() {
            return Err(WizardError::EmptyInput);
        }

        let provider = self.pipeline.provider();
        let config = &self.pipeline.settings().completion;
        let CollectedTurn { display, event } = match session.step {
            WizardStep::AwaitingBrandName => {
                collect::brand_name_turn(provider, config, &session.transcript, utterance).await?
            }
            _ => {
                collect::brand_description_turn(provider, config, &session.transcript, utterance)
                    .await?
            }
        };

        session.record(Speaker::User, utterance);
        session.record(Speaker::Bot, display.clone());

        let finalized = match &event {
            WizardEvent::NameFinalized(_) => Some(FinalizedField::BrandName),
            WizardEvent::DescriptionFinalized(_) => Some(FinalizedField::BrandDescription),
            _ => None,
        };
        session.apply(&event);

        let mut turn = WizardTurn {
            reply: display,
            step: session.step,
            finalized,
            bundle: None,
        };

        match session.step {
            WizardStep::AwaitingBrandDescription if finalized.is_some() => {
                session.record(Speaker::Bot, DESCRIPTION_QUESTION);
                turn.reply = format!("{}\n\n{DESCRIPTION_QUESTION}", turn.reply);
            }
            WizardStep::PipelineRunning => {
                let brief = session.brief()?;
                tracing::info!(brand = %brief.name(), "brief finalized, running asset pipeline");
                let bundle = self.pipeline.run(&brief).await;
                session.bundle = Some(bundle.clone());
                session.apply(&WizardEvent::PipelineSettled);
                turn.step = session.step;
                turn.bundle = Some(bundle);
            }
            _ => {}
        }

        Ok(turn)
    }

    /// Run a turn on its own task while holding the session lock.
    ///
    /// The turn settles even if the caller stops awaiting the handle, so a
    /// session never stays in `PipelineRunning` after its caller goes away.
    pub fn spawn_turn(
        self: &Arc<Self>,
        mut session: OwnedMutexGuard<WizardSession>,
        utterance: String,
    ) -> JoinHandle<Result<WizardTurn, WizardError>>
    where
        G: 'static,
        S: 'static,
        L: 'static,
    {
        let wizard = Arc::clone(self);
        tokio::spawn(async move { wizard.handle_utterance(&mut session, &utterance).await })
    }
}
