//! Line-by-line reveal of content already on a surface.
//!
//! Used by the contact panel: at start every line is hidden, then one more
//! line becomes visible per interval.

use std::time::Duration;

use tracing::debug;

use crate::player::state::{Cadence, CancelToken, TaskStatus};
use crate::surface::Surface;

/// Gap between revealed contact lines.
pub const DEFAULT_REVEAL_INTERVAL: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct LineReveal {
    interval: Duration,
    starts_at: Duration,
    cadence: Option<Cadence>,
    token: CancelToken,
    outcome: Option<TaskStatus>,
}

impl LineReveal {
    pub fn new(interval: Duration, starts_at: Duration) -> Self {
        Self {
            interval,
            starts_at,
            cadence: None,
            token: CancelToken::new(),
            outcome: None,
        }
    }

    pub fn tick(&mut self, now: Duration, surface: &mut dyn Surface) -> TaskStatus {
        if let Some(outcome) = self.outcome {
            return outcome;
        }

        loop {
            if self.token.is_cancelled() {
                return self.finish(TaskStatus::Cancelled);
            }
            if now < self.starts_at {
                return TaskStatus::Pending;
            }
            if !surface.is_attached() {
                debug!("reveal target detached");
                self.token.cancel();
                continue;
            }

            let cadence = self.cadence.get_or_insert_with(|| {
                surface.set_revealed(Some(0));
                Cadence::new(self.starts_at, self.interval, surface.line_count())
            });

            match cadence.poll(now) {
                Some(count) => surface.set_revealed(Some(count)),
                None if cadence.is_finished() => return self.finish(TaskStatus::Completed),
                None => return TaskStatus::Pending,
            }
        }
    }

    fn finish(&mut self, outcome: TaskStatus) -> TaskStatus {
        self.outcome = Some(outcome);
        outcome
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        if self.outcome.is_some() || self.token.is_cancelled() {
            return None;
        }
        match &self.cadence {
            None => Some(self.starts_at),
            Some(cadence) => Some(cadence.next_deadline().unwrap_or(self.starts_at)),
        }
    }

    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }
}
