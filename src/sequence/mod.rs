//! Boot sequence steps
//!
//! A step is one timed line of the loading screen. Steps are immutable once
//! built and always render in list order.

mod file;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use file::{load_steps, SequenceError};

/// Delay applied to a step that does not name one.
pub const DEFAULT_STEP_DELAY_MS: u64 = 300;

/// Visual category of a step. Styling per kind is up to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Prompt,
    Command,
    Output,
    Success,
}

impl StepKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::Command => "command",
            Self::Output => "output",
            Self::Success => "success",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One timed unit of the loading sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub text: String,
    /// Wait before this step is revealed.
    pub delay_ms: u64,
}

impl Step {
    pub fn new(kind: StepKind, text: impl Into<String>, delay_ms: u64) -> Self {
        Self {
            kind,
            text: text.into(),
            delay_ms,
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// A step as written in a config or step file, before defaults apply.
///
/// `type` is accepted as an alias for `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStep {
    #[serde(alias = "type")]
    pub kind: StepKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "delay")]
    pub delay_ms: Option<u64>,
}

impl RawStep {
    /// Resolve into a [`Step`], filling a missing delay with `default_delay_ms`.
    pub fn resolve(&self, default_delay_ms: u64) -> Step {
        Step::new(
            self.kind,
            self.text.clone(),
            self.delay_ms.unwrap_or(default_delay_ms),
        )
    }
}

impl From<&Step> for RawStep {
    fn from(step: &Step) -> Self {
        Self {
            kind: step.kind,
            text: step.text.clone(),
            delay_ms: Some(step.delay_ms),
        }
    }
}

/// Resolve a list of raw steps with a shared default delay.
pub fn resolve_steps(raw: &[RawStep], default_delay_ms: u64) -> Vec<Step> {
    raw.iter().map(|r| r.resolve(default_delay_ms)).collect()
}

/// The stock loading sequence.
pub fn default_boot_sequence() -> Vec<Step> {
    vec![
        Step::new(StepKind::Prompt, "oliver@portfolio:~$ ", DEFAULT_STEP_DELAY_MS),
        Step::new(StepKind::Command, "initializing portfolio...", 500),
        Step::new(StepKind::Output, "[INFO] Loading user profile...", 800),
        Step::new(StepKind::Output, "[INFO] Compiling projects...", 1200),
        Step::new(StepKind::Output, "[INFO] Setting up environment...", 1600),
        Step::new(
            StepKind::Success,
            "[SUCCESS] Portfolio loaded successfully!",
            2000,
        ),
        Step::new(
            StepKind::Output,
            "Welcome to Oliver Diaz's Portfolio",
            2300,
        ),
        Step::new(StepKind::Prompt, "oliver@portfolio:~$ ", 2600),
    ]
}
