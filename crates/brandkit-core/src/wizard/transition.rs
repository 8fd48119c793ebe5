//! Wizard step transitions.

use brandkit_types::wizard::{WizardEvent, WizardStep};

/// Next step for `event` in `step`, or `None` when the event does not move
/// the wizard. There are no backward transitions.
pub fn transition(step: WizardStep, event: &WizardEvent) -> Option<WizardStep> {
    use WizardEvent::*;
    use WizardStep::*;

    match (step, event) {
        (AwaitingBrandName, NameFinalized(_)) => Some(AwaitingBrandDescription),
        (AwaitingBrandDescription, DescriptionFinalized(_)) => Some(PipelineRunning),
        (PipelineRunning, PipelineSettled) => Some(Done),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_forward_through_every_step() {
        let mut step = WizardStep::AwaitingBrandName;
        for event in [
            WizardEvent::NameFinalized("Flight Mobile".into()),
            WizardEvent::DescriptionFinalized("Prepaid plans".into()),
            WizardEvent::PipelineSettled,
        ] {
            step = transition(step, &event).unwrap();
        }
        assert_eq!(step, WizardStep::Done);
    }

    #[test]
    fn unfinalized_turns_stay_put() {
        assert_eq!(
            transition(WizardStep::AwaitingBrandName, &WizardEvent::Unfinalized),
            None
        );
        assert_eq!(
            transition(WizardStep::AwaitingBrandDescription, &WizardEvent::Unfinalized),
            None
        );
    }

    #[test]
    fn out_of_order_events_are_ignored() {
        // A description cannot be accepted before the name.
        assert_eq!(
            transition(
                WizardStep::AwaitingBrandName,
                &WizardEvent::DescriptionFinalized("x".into())
            ),
            None
        );
        // A finalized name cannot be replaced.
        assert_eq!(
            transition(
                WizardStep::AwaitingBrandDescription,
                &WizardEvent::NameFinalized("Other".into())
            ),
            None
        );
        assert_eq!(transition(WizardStep::Done, &WizardEvent::PipelineSettled), None);
    }
}
