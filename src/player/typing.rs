//! Typewriter effect.
//!
//! A [`TypingTask`] clears its surface and then writes its text back one
//! character at a time. The surface only ever holds a prefix of the text,
//! and each prefix is longer than the one before.

use std::time::Duration;

use tracing::debug;

use crate::player::state::{Cadence, CancelToken, TaskStatus};
use crate::surface::Surface;

/// Per-character delay used by the hero animation.
pub const DEFAULT_CHAR_DELAY: Duration = Duration::from_millis(50);

/// Lazy sequence of the non-empty prefixes of `text`, shortest first.
///
/// Splits on `char` boundaries, so multi-byte characters are revealed whole.
pub fn prefixes(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.char_indices()
        .map(move |(idx, ch)| &text[..idx + ch.len_utf8()])
}

/// Reveals `text` into a surface at a fixed per-character rate.
#[derive(Debug, Clone)]
pub struct TypingTask {
    text: String,
    /// Byte length of the prefix after each revealed character
    ends: Vec<usize>,
    starts_at: Duration,
    cleared: bool,
    cadence: Cadence,
    token: CancelToken,
    outcome: Option<TaskStatus>,
}

impl TypingTask {
    /// Create a task that begins at clock reading `starts_at`.
    ///
    /// The surface is cleared at `starts_at` and each character follows after
    /// another `per_char` wait.
    pub fn new(text: impl Into<String>, per_char: Duration, starts_at: Duration) -> Self {
        let text = text.into();
        let ends: Vec<usize> = prefixes(&text).map(str::len).collect();
        let cadence = Cadence::new(starts_at, per_char, ends.len());
        Self {
            text,
            ends,
            starts_at,
            cleared: false,
            cadence,
            token: CancelToken::new(),
            outcome: None,
        }
    }

    /// Advance to clock reading `now`, writing into `surface`.
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
                debug!(text = %self.text, "typing target detached");
                self.token.cancel();
                continue;
            }

            if !self.cleared {
                surface.replace_content("");
                surface.set_completed(false);
                self.cleared = true;
            }

            match self.cadence.poll(now) {
                Some(count) => surface.replace_content(&self.text[..self.ends[count - 1]]),
                None if self.cadence.is_finished() => {
                    surface.set_completed(true);
                    return self.finish(TaskStatus::Completed);
                }
                None => return TaskStatus::Pending,
            }
        }
    }

    fn finish(&mut self, outcome: TaskStatus) -> TaskStatus {
        self.outcome = Some(outcome);
        outcome
    }

    /// Abort the task. The surface keeps whatever prefix it already shows.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        if self.outcome.is_some() || self.token.is_cancelled() {
            None
        } else if !self.cleared {
            Some(self.starts_at)
        } else {
            // A finished cadence still owes the completion mark, due right away.
            Some(self.cadence.next_deadline().unwrap_or(self.starts_at))
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters revealed so far.
    pub fn revealed_count(&self) -> usize {
        self.cadence.revealed()
    }

    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }
}
