//! Player state management
//!
//! Shared state types for the animation tasks: the cancellation token,
//! the per-run session record and the fixed-interval cadence that typing
//! and line-reveal tasks step through.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Shared abort flag for one running task.
///
/// Clones observe the same flag. Tasks check it every time they resume,
/// before touching their surface.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort the task. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Lifecycle of a [`SequencePlayer`](super::SequencePlayer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Built but not started
    Idle,
    /// Waiting on a step or on the settle delay
    Running,
    /// All steps rendered and the completion callback fired
    Completed,
    /// Aborted before completion; no callback fires after this
    Cancelled,
    /// Target surface was missing at start; nothing ran
    Skipped,
}

impl PlayerStatus {
    /// Whether the player has reached a final state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Skipped)
    }
}

/// Result of ticking a surface task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Still waiting for its next deadline
    Pending,
    /// Every unit was revealed
    Completed,
    /// Aborted or its surface went away
    Cancelled,
}

impl TaskStatus {
    pub fn is_done(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Transient state of one sequence run.
///
/// Exists from `start` until the run completes or is cancelled.
#[derive(Debug, Clone)]
pub struct AnimationSession {
    /// Index of the next step to render
    pub current_index: usize,
    /// True while steps or the settle delay remain
    pub is_running: bool,
    /// Clock reading at which the next unit is due
    pub next_deadline: Duration,
    token: CancelToken,
}

impl AnimationSession {
    pub fn new(first_deadline: Duration) -> Self {
        Self {
            current_index: 0,
            is_running: true,
            next_deadline: first_deadline,
            token: CancelToken::new(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }
}

/// Fixed-interval reveal schedule: unit `n` is due at `start + n * interval`.
///
/// Deadlines accumulate from the start time, so a host that wakes up late
/// catches up on every overdue unit instead of drifting.
#[derive(Debug, Clone)]
pub struct Cadence {
    interval: Duration,
    next_deadline: Duration,
    total: usize,
    revealed: usize,
}

impl Cadence {
    pub fn new(start: Duration, interval: Duration, total: usize) -> Self {
        Self {
            interval,
            next_deadline: start + interval,
            total,
            revealed: 0,
        }
    }

    /// Reveal the next unit if it is due, returning the new revealed count.
    pub fn poll(&mut self, now: Duration) -> Option<usize> {
        if self.is_finished() || now < self.next_deadline {
            return None;
        }
        self.revealed += 1;
        self.next_deadline += self.interval;
        Some(self.revealed)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        (!self.is_finished()).then_some(self.next_deadline)
    }

    pub fn is_finished(&self) -> bool {
        self.revealed >= self.total
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn total(&self) -> usize {
        self.total
    }
}
