//! Which page of the wizard is showing.

use crate::domain::WizardStep;

/// Step state machine.
///
/// Moving forward is never gated on the current step's fields; incomplete
/// steps can be skipped and the endpoint decides what to do with missing
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepController {
    current: WizardStep,
}

impl StepController {
    pub fn new() -> Self {
        Self {
            current: WizardStep::BasicInfo,
        }
    }

    pub fn current(&self) -> WizardStep {
        self.current
    }

    /// Advance, clamped at `Review`.
    pub fn next(&mut self) -> WizardStep {
        self.current = self.current.next();
        self.current
    }

    /// Go back, clamped at `BasicInfo`.
    pub fn prev(&mut self) -> WizardStep {
        self.current = self.current.prev();
        self.current
    }

    /// A prediction came back; always land on the result page.
    pub fn submit_succeeded(&mut self) -> WizardStep {
        self.current = WizardStep::Review;
        self.current
    }

    pub fn reset(&mut self) {
        self.current = WizardStep::BasicInfo;
    }
}

impl Default for StepController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_basic_info() {
        assert_eq!(StepController::new().current(), WizardStep::BasicInfo);
    }

    #[test]
    fn next_clamps_at_review() {
        let mut steps = StepController::new();
        steps.next();
        steps.next();
        assert_eq!(steps.current().number(), 3);
        assert_eq!(steps.next(), WizardStep::Review);
        assert_eq!(steps.next(), WizardStep::Review);
    }

    #[test]
    fn prev_clamps_at_basic_info() {
        let mut steps = StepController::new();
        assert_eq!(steps.prev(), WizardStep::BasicInfo);
        steps.next();
        steps.next();
        assert_eq!(steps.prev(), WizardStep::FinancialInfo);
    }

    #[test]
    fn submit_succeeded_jumps_to_review() {
        let mut steps = StepController::new();
        assert_eq!(steps.submit_succeeded(), WizardStep::Review);
        steps.reset();
        assert_eq!(steps.current(), WizardStep::BasicInfo);
    }
}
