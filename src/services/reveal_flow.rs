//! Reveal flow driver: the randomized carousel track and the timed
//! idle → spinning → result progression with its one-time commit.

use futures::future::BoxFuture;
use rand::{Rng, seq::SliceRandom};
use tokio::time::Instant;
use tracing::warn;

use crate::{
    config::RevealTiming,
    dao::models::ParticipantEntity,
    error::ServiceError,
    state::reveal::{InvalidTransition, RevealStage, RevealStateMachine},
};

/// How many times the carousel segment repeats in the rendered track.
const TRACK_REPEATS: usize = 3;
/// The deceleration is calibrated to stop on the third card from the end of a
/// segment, so that is where the receiver goes.
const RECEIVER_OFFSET_FROM_END: usize = 3;

/// Build the carousel card sequence for one viewer.
///
/// The viewer never appears in their own track. All other participants are
/// shuffled, the receiver is pinned third from the end of the segment and the
/// whole segment repeats [`TRACK_REPEATS`] times, so the animation can loop
/// past the receiver before settling on its final occurrence.
pub fn build_track<R: Rng + ?Sized>(
    rng: &mut R,
    viewer_id: i64,
    receiver: &ParticipantEntity,
    roster: &[ParticipantEntity],
) -> Vec<ParticipantEntity> {
    let mut others: Vec<ParticipantEntity> = roster
        .iter()
        .filter(|p| p.id != viewer_id && p.id != receiver.id)
        .cloned()
        .collect();
    others.shuffle(rng);

    let insert_at = (others.len() + 1).saturating_sub(RECEIVER_OFFSET_FROM_END);
    others.insert(insert_at, receiver.clone());

    let mut track = Vec::with_capacity(others.len() * TRACK_REPEATS);
    for _ in 0..TRACK_REPEATS {
        track.extend(others.iter().cloned());
    }
    track
}

/// Destination for the one-time reveal commit fired when the spin completes.
pub trait CommitSink: Send + Sync {
    /// Persist the fact that the participant has seen their receiver.
    fn commit(&self) -> BoxFuture<'static, Result<(), ServiceError>>;
}

/// Handle for one armed spin countdown.
///
/// Produced by [`RevealController::start`] exactly once per session; the flow
/// cannot reach the result stage without waiting it out.
#[derive(Debug)]
pub struct SpinTimer {
    deadline: Instant,
}

impl SpinTimer {
    fn arm(timing: &RevealTiming) -> Self {
        Self {
            deadline: Instant::now() + timing.spin_total(),
        }
    }

    /// Wait until the spin duration plus the settle grace has fully elapsed.
    pub async fn elapsed(self) {
        tokio::time::sleep_until(self.deadline).await;
    }
}

/// Drives one participant's reveal session from trigger to committed result.
pub struct RevealController<C: CommitSink> {
    machine: RevealStateMachine,
    timing: RevealTiming,
    sink: C,
    committed: bool,
    commit_failed: bool,
}

impl<C: CommitSink> RevealController<C> {
    /// Create a controller for a session, seeded from the persisted flag.
    ///
    /// An already-revealed participant starts in the result stage and no
    /// commit will ever fire for them again.
    pub fn new(has_revealed: bool, timing: RevealTiming, sink: C) -> Self {
        Self {
            machine: RevealStateMachine::new(has_revealed),
            timing,
            sink,
            // An already-committed session must not commit again.
            committed: has_revealed,
            commit_failed: false,
        }
    }

    /// Current stage of the flow.
    pub fn stage(&self) -> RevealStage {
        self.machine.stage()
    }

    /// Whether the terminal commit failed; the result is still shown.
    pub fn commit_failed(&self) -> bool {
        self.commit_failed
    }

    /// Trigger the spin.
    ///
    /// Arms the countdown only on the idle → spinning transition. Repeat
    /// triggers return `None` so a double-click can never arm a second timer
    /// or restart the animation.
    pub fn start(&mut self) -> Option<SpinTimer> {
        if self.machine.start() {
            Some(SpinTimer::arm(&self.timing))
        } else {
            None
        }
    }

    /// Wait out the spin, enter the result stage and fire the commit.
    ///
    /// The commit fires at most once per session. A commit failure is logged
    /// and remembered but the flow still rests in the result stage: the
    /// participant has already seen their receiver by then.
    pub async fn complete(&mut self, timer: SpinTimer) -> Result<RevealStage, InvalidTransition> {
        timer.elapsed().await;
        let stage = self.machine.finish_spin()?;

        if !self.committed {
            self.committed = true;
            if let Err(err) = self.sink.commit().await {
                warn!(error = %err, "reveal commit failed; result shown regardless");
                self.commit_failed = true;
            }
        }
        Ok(stage)
    }

    /// Convenience wrapper running the whole trigger-to-result flow.
    pub async fn run(&mut self) -> Result<RevealStage, InvalidTransition> {
        match self.start() {
            Some(timer) => self.complete(timer).await,
            None => Ok(self.stage()),
        }
    }
}
