//! Rendering surfaces
//!
//! A surface is a text container that animation tasks write into. Tasks only
//! see the [`Surface`] trait. The terminal renderer reads [`BufferSurface`]
//! contents back out and styles each line by its kind.

mod stage;

use crate::sequence::StepKind;

pub use stage::{Stage, SurfaceId, SurfaceTask};

/// Write capability handed to animation tasks.
pub trait Surface {
    /// Whether the surface still exists. Tasks must not write once this is false.
    fn is_attached(&self) -> bool;

    /// Append one line tagged with its step kind.
    fn append_line(&mut self, kind: StepKind, text: &str);

    /// Replace the whole content with a single untagged line.
    fn replace_content(&mut self, text: &str);

    /// Number of lines currently held.
    fn line_count(&self) -> usize;

    /// Limit how many lines are visible. `None` shows all of them.
    fn set_revealed(&mut self, _count: Option<usize>) {}

    /// Flag the content as finished (the typing cursor goes away).
    fn set_completed(&mut self, _completed: bool) {}
}

/// One line of surface content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceLine {
    /// Step kind for sequence output, `None` for plain text
    pub kind: Option<StepKind>,
    pub text: String,
}

impl SurfaceLine {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: None,
            text: text.into(),
        }
    }

    pub fn tagged(kind: StepKind, text: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            text: text.into(),
        }
    }
}

/// In-memory surface the renderer draws from.
#[derive(Debug, Clone)]
pub struct BufferSurface {
    lines: Vec<SurfaceLine>,
    revealed: Option<usize>,
    completed: bool,
    attached: bool,
}

impl Default for BufferSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferSurface {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            revealed: None,
            completed: false,
            attached: true,
        }
    }

    /// Surface pre-filled with plain lines.
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(SurfaceLine::plain).collect(),
            ..Self::new()
        }
    }

    pub fn lines(&self) -> &[SurfaceLine] {
        &self.lines
    }

    /// Lines that are currently visible.
    pub fn visible_lines(&self) -> &[SurfaceLine] {
        let count = self.revealed.unwrap_or(self.lines.len()).min(self.lines.len());
        &self.lines[..count]
    }

    /// All line texts joined with newlines.
    pub fn content(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn revealed(&self) -> Option<usize> {
        self.revealed
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Mark the surface as gone. Tasks targeting it cancel on their next resume.
    pub fn detach(&mut self) {
        self.attached = false;
    }
}

impl Surface for BufferSurface {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn append_line(&mut self, kind: StepKind, text: &str) {
        self.lines.push(SurfaceLine::tagged(kind, text));
    }

    fn replace_content(&mut self, text: &str) {
        self.lines.clear();
        self.lines.push(SurfaceLine::plain(text));
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn set_revealed(&mut self, count: Option<usize>) {
        self.revealed = count;
    }

    fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}
