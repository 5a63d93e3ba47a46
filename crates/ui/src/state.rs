use greemls_core::{CompletionReason, PlaybackState, Plan, Script};

/// Where the intro is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntroPhase {
    /// Lines are still being typed
    #[default]
    Playing,
    /// Every line is on screen; waiting for the user
    Ready,
}

/// How the user left the intro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroOutcome {
    /// Go on to the toolkit
    Continue,
    /// Leave the program
    Exit,
}

/// State rendered by the intro overlay
#[derive(Debug, Clone)]
pub struct IntroState {
    pub plan: Plan,
    pub playback: PlaybackState,
    pub phase: IntroPhase,
    outcome: Option<IntroOutcome>,
}

impl IntroState {
    pub fn new(plan: Plan, script: Script) -> Self {
        Self { plan, playback: PlaybackState::new(script), phase: IntroPhase::Playing, outcome: None }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == IntroPhase::Playing
    }

    pub fn can_skip(&self) -> bool {
        self.plan.can_skip()
    }

    pub fn outcome(&self) -> Option<IntroOutcome> {
        self.outcome
    }

    pub fn should_exit(&self) -> bool {
        self.outcome.is_some()
    }

    /// Record how the intro ended. The first outcome wins.
    pub fn finish(&mut self, outcome: IntroOutcome) {
        if self.outcome.is_none() {
            self.outcome = Some(outcome);
        }
    }

    /// Apply a completion reported by the typewriter
    pub fn complete(&mut self, reason: CompletionReason) {
        self.phase = IntroPhase::Ready;
        tracing::debug!(?reason, plan = %self.plan, "intro playback complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(plan: Plan) -> IntroState {
        IntroState::new(plan, Script::from_texts(["GREEMLS", "ready"]))
    }

    #[test]
    fn test_new_state_is_playing() {
        let state = state(Plan::Free);
        assert!(state.is_playing());
        assert_eq!(state.outcome(), None);
        assert!(!state.should_exit());
        assert_eq!(state.playback.script().len(), 2);
    }

    #[test]
    fn test_complete_moves_to_ready() {
        let mut state = state(Plan::Premium);
        state.complete(CompletionReason::Finished);
        assert_eq!(state.phase, IntroPhase::Ready);
        assert!(!state.should_exit());
    }

    #[test]
    fn test_first_outcome_wins() {
        let mut state = state(Plan::Free);
        state.finish(IntroOutcome::Exit);
        state.finish(IntroOutcome::Continue);
        assert_eq!(state.outcome(), Some(IntroOutcome::Exit));
        assert!(state.should_exit());
    }

    #[test]
    fn test_can_skip_follows_plan() {
        assert!(!state(Plan::Free).can_skip());
        assert!(state(Plan::Premium).can_skip());
        assert!(state(Plan::PremiumPlus).can_skip());
    }
}
