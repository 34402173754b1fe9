//! Sequenced step playback.
//!
//! A [`SequencePlayer`] reveals an ordered list of [`Step`]s one at a time.
//! Before each step it waits that step's delay, and after the last step it
//! waits a fixed settle delay. Then it reports completion exactly once. The
//! host drives it by calling [`SequencePlayer::tick`] with the current clock
//! reading.

use std::time::Duration;

use tracing::debug;

use crate::player::state::{AnimationSession, CancelToken, PlayerStatus};
use crate::sequence::Step;

/// Pause between the last step and the completion callback.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(1000);

/// Receiver for sequence progress.
pub trait SequenceObserver {
    /// Called once per step, in list order.
    fn on_step(&mut self, step: &Step);

    /// Called once after the settle delay that follows the last step.
    fn on_complete(&mut self);

    /// Whether the output surface still exists. Checked at every resume point.
    fn is_attached(&self) -> bool {
        true
    }
}

/// Adapts a pair of closures into a [`SequenceObserver`].
pub struct Callbacks<F, G> {
    on_step: F,
    on_complete: Option<G>,
}

impl<F, G> Callbacks<F, G>
where
    F: FnMut(&Step),
    G: FnOnce(),
{
    pub fn new(on_step: F, on_complete: G) -> Self {
        Self {
            on_step,
            on_complete: Some(on_complete),
        }
    }
}

impl<F, G> SequenceObserver for Callbacks<F, G>
where
    F: FnMut(&Step),
    G: FnOnce(),
{
    fn on_step(&mut self, step: &Step) {
        (self.on_step)(step);
    }

    fn on_complete(&mut self) {
        if let Some(done) = self.on_complete.take() {
            done();
        }
    }
}

/// Plays a fixed step list into an observer.
#[derive(Debug)]
pub struct SequencePlayer {
    steps: Vec<Step>,
    settle: Duration,
    session: Option<AnimationSession>,
    status: PlayerStatus,
}

impl SequencePlayer {
    pub fn new(steps: Vec<Step>, settle: Duration) -> Self {
        Self {
            steps,
            settle,
            session: None,
            status: PlayerStatus::Idle,
        }
    }

    /// Start playback at clock reading `now`.
    ///
    /// Returns the run's cancellation token. A player starts at most once:
    /// later calls return `None`. If the observer's surface is missing, the
    /// player moves straight to [`PlayerStatus::Skipped`] and never calls it.
    pub fn start<O>(&mut self, now: Duration, observer: &O) -> Option<CancelToken>
    where
        O: SequenceObserver + ?Sized,
    {
        if self.status != PlayerStatus::Idle {
            return None;
        }
        if !observer.is_attached() {
            debug!("sequence target missing at start, skipping playback");
            self.status = PlayerStatus::Skipped;
            return None;
        }

        let first_wait = self.steps.first().map_or(self.settle, Step::delay);
        let session = AnimationSession::new(now + first_wait);
        let token = session.token().clone();
        debug!(steps = self.steps.len(), "sequence started");
        self.session = Some(session);
        self.status = PlayerStatus::Running;
        Some(token)
    }

    /// Advance playback to clock reading `now`.
    ///
    /// Fires every step whose deadline has passed, in order, and completion
    /// once the settle delay has elapsed too. Before each of these it checks
    /// the cancellation token and the observer's surface.
    pub fn tick<O>(&mut self, now: Duration, observer: &mut O) -> PlayerStatus
    where
        O: SequenceObserver + ?Sized,
    {
        loop {
            let Some(session) = self.session.as_mut() else {
                return self.status;
            };

            if session.is_cancelled() {
                debug!(index = session.current_index, "sequence cancelled");
                session.is_running = false;
                self.session = None;
                self.status = PlayerStatus::Cancelled;
                return self.status;
            }
            if now < session.next_deadline {
                return self.status;
            }
            if !observer.is_attached() {
                debug!(index = session.current_index, "sequence target detached");
                session.token().cancel();
                continue;
            }

            match self.steps.get(session.current_index) {
                Some(step) => {
                    observer.on_step(step);
                    session.current_index += 1;
                    let wait = self
                        .steps
                        .get(session.current_index)
                        .map_or(self.settle, Step::delay);
                    session.next_deadline += wait;
                }
                None => {
                    session.is_running = false;
                    self.session = None;
                    self.status = PlayerStatus::Completed;
                    debug!("sequence completed");
                    observer.on_complete();
                    return self.status;
                }
            }
        }
    }

    /// Abort the current run. No callback fires after this.
    pub fn cancel(&mut self) {
        match &self.session {
            Some(session) => session.token().cancel(),
            None if self.status == PlayerStatus::Idle => self.status = PlayerStatus::Cancelled,
            None => {}
        }
    }

    /// Clock reading at which the next step or completion is due.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.session
            .as_ref()
            .filter(|s| !s.is_cancelled())
            .map(|s| s.next_deadline)
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn session(&self) -> Option<&AnimationSession> {
        self.session.as_ref()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn settle(&self) -> Duration {
        self.settle
    }
}

/// Build and start a player in one call.
pub fn play<O>(steps: Vec<Step>, settle: Duration, now: Duration, observer: &O) -> SequencePlayer
where
    O: SequenceObserver + ?Sized,
{
    let mut player = SequencePlayer::new(steps, settle);
    player.start(now, observer);
    player
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::StepKind;
    use std::cell::{Cell, RefCell};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Records (virtual time, event) pairs.
    #[derive(Default)]
    struct Recorder {
        now: Duration,
        steps: Vec<(Duration, Step)>,
        completions: Vec<Duration>,
        attached: bool,
    }

    impl Recorder {
        fn attached() -> Self {
            Self {
                attached: true,
                ..Self::default()
            }
        }
    }

    impl SequenceObserver for Recorder {
        fn on_step(&mut self, step: &Step) {
            self.steps.push((self.now, step.clone()));
        }

        fn on_complete(&mut self) {
            self.completions.push(self.now);
        }

        fn is_attached(&self) -> bool {
            self.attached
        }
    }

    /// Tick in 1 ms increments so each event is stamped with its exact deadline.
    fn run_until(player: &mut SequencePlayer, rec: &mut Recorder, until: u64) {
        for t in 0..=until {
            rec.now = ms(t);
            player.tick(ms(t), rec);
        }
    }

    fn two_steps() -> Vec<Step> {
        vec![
            Step::new(StepKind::Prompt, "a$ ", 0),
            Step::new(StepKind::Output, "done", 500),
        ]
    }

    #[test]
    fn steps_fire_at_cumulative_deadlines() {
        let mut rec = Recorder::attached();
        let mut player = play(two_steps(), ms(1000), ms(0), &rec);

        run_until(&mut player, &mut rec, 2000);

        assert_eq!(rec.steps.len(), 2);
        assert_eq!(rec.steps[0], (ms(0), two_steps()[0].clone()));
        assert_eq!(rec.steps[1], (ms(500), two_steps()[1].clone()));
        assert_eq!(rec.completions, vec![ms(1500)]);
        assert_eq!(player.status(), PlayerStatus::Completed);
    }

    #[test]
    fn late_tick_fires_all_due_steps_in_order() {
        let steps = vec![
            Step::new(StepKind::Prompt, "1", 100),
            Step::new(StepKind::Command, "2", 100),
            Step::new(StepKind::Output, "3", 100),
        ];
        let mut rec = Recorder::attached();
        let mut player = play(steps.clone(), ms(50), ms(0), &rec);

        let status = player.tick(ms(10_000), &mut rec);

        let seen: Vec<Step> = rec.steps.iter().map(|(_, s)| s.clone()).collect();
        assert_eq!(seen, steps);
        assert_eq!(rec.completions.len(), 1);
        assert_eq!(status, PlayerStatus::Completed);
    }

    #[test]
    fn empty_sequence_only_completes_after_settle() {
        let mut rec = Recorder::attached();
        let mut player = play(Vec::new(), ms(1000), ms(0), &rec);

        run_until(&mut player, &mut rec, 1500);

        assert!(rec.steps.is_empty());
        assert_eq!(rec.completions, vec![ms(1000)]);
    }

    #[test]
    fn completion_fires_only_once() {
        let mut rec = Recorder::attached();
        let mut player = play(two_steps(), ms(0), ms(0), &rec);

        player.tick(ms(500), &mut rec);
        player.tick(ms(600), &mut rec);
        player.tick(ms(10_000), &mut rec);

        assert_eq!(rec.completions.len(), 1);
    }

    #[test]
    fn cancel_after_step_suppresses_the_rest() {
        let steps = vec![
            Step::new(StepKind::Prompt, "1", 0),
            Step::new(StepKind::Output, "2", 300),
            Step::new(StepKind::Output, "3", 300),
        ];
        let mut rec = Recorder::attached();
        let mut player = SequencePlayer::new(steps, ms(1000));
        let token = player.start(ms(0), &rec).unwrap();

        player.tick(ms(0), &mut rec);
        assert_eq!(rec.steps.len(), 1);

        token.cancel();
        run_until(&mut player, &mut rec, 5000);

        assert_eq!(rec.steps.len(), 1);
        assert!(rec.completions.is_empty());
        assert_eq!(player.status(), PlayerStatus::Cancelled);
        assert!(player.session().is_none());
    }

    #[test]
    fn cancel_from_inside_on_step_stops_same_tick() {
        let token_slot: RefCell<Option<CancelToken>> = RefCell::new(None);
        let seen = Cell::new(0);
        let completed = Cell::new(false);
        let steps = vec![
            Step::new(StepKind::Prompt, "1", 0),
            Step::new(StepKind::Output, "2", 0),
        ];

        let mut callbacks = Callbacks::new(
            |_: &Step| {
                seen.set(seen.get() + 1);
                if let Some(token) = token_slot.borrow().as_ref() {
                    token.cancel();
                }
            },
            || completed.set(true),
        );
        let mut player = SequencePlayer::new(steps, ms(0));
        *token_slot.borrow_mut() = player.start(ms(0), &callbacks);

        let status = player.tick(ms(0), &mut callbacks);

        assert_eq!(seen.get(), 1);
        assert!(!completed.get());
        assert_eq!(status, PlayerStatus::Cancelled);
    }

    #[test]
    fn missing_surface_at_start_is_a_no_op() {
        let mut rec = Recorder::default();
        let mut player = SequencePlayer::new(two_steps(), ms(0));

        assert!(player.start(ms(0), &rec).is_none());
        run_until(&mut player, &mut rec, 1000);

        assert_eq!(player.status(), PlayerStatus::Skipped);
        assert!(rec.steps.is_empty());
        assert!(rec.completions.is_empty());
    }

    #[test]
    fn detached_surface_cancels_silently() {
        let mut rec = Recorder::attached();
        let mut player = play(two_steps(), ms(100), ms(0), &rec);

        player.tick(ms(0), &mut rec);
        rec.attached = false;
        player.tick(ms(10_000), &mut rec);

        assert_eq!(rec.steps.len(), 1);
        assert!(rec.completions.is_empty());
        assert_eq!(player.status(), PlayerStatus::Cancelled);
    }

    #[test]
    fn start_twice_is_rejected() {
        let rec = Recorder::attached();
        let mut player = SequencePlayer::new(two_steps(), ms(0));
        assert!(player.start(ms(0), &rec).is_some());
        assert!(player.start(ms(0), &rec).is_none());
    }

    #[test]
    fn current_index_is_monotonic_and_bounded() {
        let mut rec = Recorder::attached();
        let mut player = play(two_steps(), ms(100), ms(0), &rec);
        let mut last = 0;

        for t in 0..700 {
            player.tick(ms(t), &mut rec);
            if let Some(session) = player.session() {
                assert!(session.current_index >= last);
                assert!(session.current_index <= player.steps().len());
                last = session.current_index;
            }
        }
        assert_eq!(player.status(), PlayerStatus::Completed);
    }

    #[test]
    fn next_deadline_tracks_pending_unit() {
        let mut rec = Recorder::attached();
        let mut player = play(two_steps(), ms(1000), ms(0), &rec);
        assert_eq!(player.next_deadline(), Some(ms(0)));

        player.tick(ms(0), &mut rec);
        assert_eq!(player.next_deadline(), Some(ms(500)));

        player.tick(ms(500), &mut rec);
        assert_eq!(player.next_deadline(), Some(ms(1500)));

        player.tick(ms(1500), &mut rec);
        assert_eq!(player.next_deadline(), None);
    }

    #[test]
    fn cancel_before_start_prevents_run() {
        let mut rec = Recorder::attached();
        let mut player = SequencePlayer::new(two_steps(), ms(0));
        player.cancel();
        assert!(player.start(ms(0), &rec).is_none());
        player.tick(ms(1000), &mut rec);
        assert!(rec.steps.is_empty());
        assert_eq!(player.status(), PlayerStatus::Cancelled);
    }
}
