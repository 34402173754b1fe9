//! Animation player module
//!
//! Everything here is driven by a cancellable, ordered delay-then-reveal
//! schedule. Tasks hold no clock. The host passes the current reading to
//! `tick`, and each task reveals whatever is due.
//!
//! # Architecture
//!
//! - `state`: cancellation token, session record, status enums, cadence
//! - `sequence`: the step-list player behind the loading screen
//! - `typing`: per-character typewriter task
//! - `reveal`: per-line reveal task for pre-filled surfaces
//! - `trigger`: one-shot visibility trigger
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use termfolio::player::{play, Callbacks, PlayerStatus};
//! use termfolio::sequence::{Step, StepKind};
//!
//! let steps = vec![
//!     Step::new(StepKind::Prompt, "a$ ", 0),
//!     Step::new(StepKind::Output, "done", 500),
//! ];
//! let mut lines = Vec::new();
//! let mut finished = false;
//! {
//!     let mut callbacks = Callbacks::new(|s: &Step| lines.push(s.text.clone()), || finished = true);
//!     let mut player = play(steps, Duration::from_millis(1000), Duration::ZERO, &callbacks);
//!     assert_eq!(player.tick(Duration::from_millis(1500), &mut callbacks), PlayerStatus::Completed);
//! }
//! assert_eq!(lines, ["a$ ", "done"]);
//! assert!(finished);
//! ```

mod reveal;
mod sequence;
pub mod state;
mod trigger;
mod typing;

pub use reveal::{LineReveal, DEFAULT_REVEAL_INTERVAL};
pub use sequence::{play, Callbacks, SequenceObserver, SequencePlayer, DEFAULT_SETTLE};
pub use state::{AnimationSession, Cadence, CancelToken, PlayerStatus, TaskStatus};
pub use trigger::{
    visible_fraction, VisibilityTrigger, DEFAULT_VISIBILITY_THRESHOLD, HEADING_VISIBILITY_THRESHOLD,
};
pub use typing::{prefixes, TypingTask, DEFAULT_CHAR_DELAY};
