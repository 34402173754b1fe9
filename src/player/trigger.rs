//! One-shot visibility trigger.
//!
//! Mirrors an intersection observer with a single threshold: it fires the
//! first time a region is at least `threshold` visible, and never again.

/// Fraction of the region that must be visible before the trigger fires.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.5;

/// Threshold for section headings, which are a single row.
pub const HEADING_VISIBILITY_THRESHOLD: f32 = 0.8;

#[derive(Debug, Clone)]
pub struct VisibilityTrigger {
    threshold: f32,
    fired: bool,
}

impl VisibilityTrigger {
    /// `threshold` is clamped into `0.0..=1.0`.
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            fired: false,
        }
    }

    /// Report the region's current visible fraction.
    ///
    /// Returns `true` exactly once: on the first report at or above the threshold.
    pub fn observe(&mut self, visible_fraction: f32) -> bool {
        if self.fired || visible_fraction <= 0.0 || visible_fraction < self.threshold {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

impl Default for VisibilityTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBILITY_THRESHOLD)
    }
}

/// Fraction of the row range `[top, top + height)` inside the viewport
/// `[view_top, view_top + view_height)`.
pub fn visible_fraction(top: usize, height: usize, view_top: usize, view_height: usize) -> f32 {
    if height == 0 {
        return 0.0;
    }
    let start = top.max(view_top);
    let end = (top + height).min(view_top + view_height);
    if end <= start {
        return 0.0;
    }
    (end - start) as f32 / height as f32
}
