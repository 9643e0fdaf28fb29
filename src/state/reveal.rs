//! State machine backing the one-time reveal animation.
//!
//! The flow is strictly `idle → spinning → result` and `result` is terminal
//! within a session. A participant who already committed their reveal starts
//! directly in `result`, so the randomized carousel never runs twice.

use thiserror::Error;

/// Stages the reveal flow can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStage {
    /// Waiting for the participant to trigger the draw animation.
    Idle,
    /// Carousel animation in flight; ends only when the spin timer elapses.
    Spinning,
    /// Terminal stage displaying the receiver.
    Result,
}

/// Events that can be applied to the reveal state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealEvent {
    /// The spin timer armed on entering `spinning` has elapsed.
    SpinElapsed,
}

/// Error returned when attempting to apply an invalid transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// The stage the state machine was in when the invalid event was received.
    pub from: RevealStage,
    /// The event that cannot be applied from this stage.
    pub event: RevealEvent,
}

/// Reveal state machine; one instance per participant session.
#[derive(Debug, Clone)]
pub struct RevealStateMachine {
    stage: RevealStage,
}

impl RevealStateMachine {
    /// Initialize the machine from the persisted reveal flag.
    ///
    /// An already-revealed participant starts in `result` and will never
    /// re-enter `spinning`.
    pub fn new(has_revealed: bool) -> Self {
        let stage = if has_revealed {
            RevealStage::Result
        } else {
            RevealStage::Idle
        };
        Self { stage }
    }

    /// Inspect the current stage.
    pub fn stage(&self) -> RevealStage {
        self.stage
    }

    /// Trigger the spin from the idle stage.
    ///
    /// Returns `true` when the transition happened. Re-entrant triggers while
    /// spinning or after the result are no-ops, so a double-click can neither
    /// restart the animation nor arm a second timer.
    pub fn start(&mut self) -> bool {
        if self.stage == RevealStage::Idle {
            self.stage = RevealStage::Spinning;
            true
        } else {
            false
        }
    }

    /// Complete the spin once the timer elapsed, entering the terminal stage.
    pub fn finish_spin(&mut self) -> Result<RevealStage, InvalidTransition> {
        if self.stage != RevealStage::Spinning {
            return Err(InvalidTransition {
                from: self.stage,
                event: RevealEvent::SpinElapsed,
            });
        }
        self.stage = RevealStage::Result;
        Ok(self.stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_starts_idle() {
        let sm = RevealStateMachine::new(false);
        assert_eq!(sm.stage(), RevealStage::Idle);
    }

    #[test]
    fn revealed_session_starts_in_result() {
        let mut sm = RevealStateMachine::new(true);
        assert_eq!(sm.stage(), RevealStage::Result);
        // The start trigger must not restart the animation.
        assert!(!sm.start());
        assert_eq!(sm.stage(), RevealStage::Result);
    }

    #[test]
    fn happy_path_spins_then_rests() {
        let mut sm = RevealStateMachine::new(false);
        assert!(sm.start());
        assert_eq!(sm.stage(), RevealStage::Spinning);
        assert_eq!(sm.finish_spin().unwrap(), RevealStage::Result);
    }

    #[test]
    fn reentrant_start_is_a_noop() {
        let mut sm = RevealStateMachine::new(false);
        assert!(sm.start());
        assert!(!sm.start());
        assert_eq!(sm.stage(), RevealStage::Spinning);
    }

    #[test]
    fn finish_requires_spinning() {
        let mut sm = RevealStateMachine::new(false);
        let err = sm.finish_spin().unwrap_err();
        assert_eq!(err.from, RevealStage::Idle);
        assert_eq!(err.event, RevealEvent::SpinElapsed);

        sm.start();
        sm.finish_spin().unwrap();
        assert!(sm.finish_spin().is_err());
        assert_eq!(sm.stage(), RevealStage::Result);
    }
}
