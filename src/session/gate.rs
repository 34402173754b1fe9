//! First-visit gating for the loading sequence.

/// What the page does at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootPlan {
    /// Play the loading sequence, then the hero animation
    FullSequence,
    /// Hide the loading screen and start the hero animation right away
    SkipToHero,
}

/// Decides between the full sequence and the shortcut.
///
/// Built from the session flag as read at startup. The gate never touches
/// the store: [`BootGate::mark_complete`] tells the caller when to persist.
#[derive(Debug, Clone)]
pub struct BootGate {
    visited: bool,
    marked: bool,
}

impl BootGate {
    pub fn new(visited: bool) -> Self {
        Self {
            visited,
            marked: false,
        }
    }

    pub fn plan(&self) -> BootPlan {
        if self.visited {
            BootPlan::SkipToHero
        } else {
            BootPlan::FullSequence
        }
    }

    /// Record that the sequence finished.
    ///
    /// Returns `true` the first time on an unvisited session, which is when
    /// the caller should write the flag.
    pub fn mark_complete(&mut self) -> bool {
        if self.visited || self.marked {
            return false;
        }
        self.marked = true;
        true
    }

    pub fn was_visited(&self) -> bool {
        self.visited
    }
}
