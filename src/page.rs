//! Page script: wires the players to the page's surfaces and triggers.
//!
//! The page has three animated regions:
//! - the loading overlay, fed by the boot [`SequencePlayer`]
//! - the hero panel, one typing task per line
//! - the contact panel, revealed line by line once it scrolls into view
//! - the body headings, each retyped the first time it scrolls into view
//!
//! [`Page`] knows nothing about terminals. Hosts (the TUI and the plain
//! printer) call `on_ready` once, `tick` whenever a deadline passes, and
//! report user input and visibility changes as they happen.

use std::time::Duration;

use tracing::{debug, info};

use crate::config::Config;
use crate::player::{
    PlayerStatus, SequenceObserver, SequencePlayer, TaskStatus, VisibilityTrigger,
};
use crate::sequence::Step;
use crate::session::{BootGate, BootPlan};
use crate::surface::{BufferSurface, Stage, Surface, SurfaceId};

/// Surface receiving the loading sequence.
pub const OVERLAY: &str = "overlay";
/// Surface holding the contact lines.
pub const CONTACT: &str = "contact";

/// Surface id of hero line `index`.
pub fn hero_id(index: usize) -> SurfaceId {
    SurfaceId::new(format!("hero-{index}"))
}

/// Surface id of the body heading on body row `row`.
pub fn heading_id(row: usize) -> SurfaceId {
    SurfaceId::new(format!("heading-{row}"))
}

/// Whether the loading screen covers the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Visible,
    Hidden,
}

/// What happened during one [`Page::tick`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageTick {
    /// Steps rendered into the overlay this tick, in order
    pub steps: Vec<Step>,
    /// The session flag should be written now
    pub persist_visited: bool,
    /// Surface tasks that finished this tick
    pub finished: Vec<(SurfaceId, TaskStatus)>,
}

/// Writes sequence steps into the overlay surface.
struct OverlayWriter<'a> {
    stage: &'a mut Stage,
    id: SurfaceId,
    rendered: Vec<Step>,
}

impl SequenceObserver for OverlayWriter<'_> {
    fn on_step(&mut self, step: &Step) {
        if let Some(surface) = self.stage.get_mut(&self.id) {
            surface.append_line(step.kind, &step.text);
        }
        self.rendered.push(step.clone());
    }

    // Completion is read back from the player status.
    fn on_complete(&mut self) {}

    fn is_attached(&self) -> bool {
        self.stage
            .get(&self.id)
            .is_some_and(|surface| surface.is_attached())
    }
}

/// A body heading, typed once when it first comes into view.
#[derive(Debug)]
struct Heading {
    row: usize,
    text: String,
    trigger: VisibilityTrigger,
}

#[derive(Debug)]
pub struct Page {
    stage: Stage,
    loader: Option<SequencePlayer>,
    gate: BootGate,
    contact_trigger: VisibilityTrigger,
    hero_lines: Vec<String>,
    hero_per_char: Duration,
    hero_stagger: Duration,
    contact_interval: Duration,
    body: Vec<String>,
    headings: Vec<Heading>,
    heading_per_char: Duration,
    overlay: OverlayState,
    hero_started: bool,
    ready: bool,
}

impl Page {
    /// Build the page. `visited` is the session flag as read at startup.
    pub fn new(config: &Config, steps: Vec<Step>, visited: bool) -> Self {
        let mut stage = Stage::new();
        stage.insert(OVERLAY, BufferSurface::new());
        for index in 0..config.hero.lines.len() {
            stage.insert(hero_id(index), BufferSurface::new());
        }
        let mut contact = BufferSurface::with_lines(config.contact.lines.iter().cloned());
        contact.set_revealed(Some(0));
        stage.insert(CONTACT, contact);

        let mut headings = Vec::new();
        for (row, line) in config.page.body.iter().enumerate() {
            if !line.starts_with('#') {
                continue;
            }
            stage.insert(heading_id(row), BufferSurface::with_lines([line.as_str()]));
            headings.push(Heading {
                row,
                text: line.clone(),
                trigger: VisibilityTrigger::new(config.page.heading_threshold),
            });
        }

        Self {
            stage,
            loader: Some(SequencePlayer::new(steps, config.loader.settle())),
            gate: BootGate::new(visited),
            contact_trigger: VisibilityTrigger::new(config.contact.visibility_threshold),
            hero_lines: config.hero.lines.clone(),
            hero_per_char: config.hero.per_char(),
            hero_stagger: config.hero.stagger(),
            contact_interval: config.contact.reveal_interval(),
            body: config.page.body.clone(),
            headings,
            heading_per_char: config.page.heading_per_char(),
            overlay: OverlayState::Visible,
            hero_started: false,
            ready: false,
        }
    }

    /// Page-ready trigger. Only the first call has any effect.
    pub fn on_ready(&mut self, now: Duration) {
        if self.ready {
            return;
        }
        self.ready = true;

        match self.gate.plan() {
            BootPlan::FullSequence => {
                info!("first visit this session, playing loading sequence");
                let Some(player) = self.loader.as_mut() else {
                    return;
                };
                let writer = OverlayWriter {
                    stage: &mut self.stage,
                    id: SurfaceId::from(OVERLAY),
                    rendered: Vec::new(),
                };
                player.start(now, &writer);
                if player.status() == PlayerStatus::Skipped {
                    self.loader = None;
                    self.hide_overlay(now);
                }
            }
            BootPlan::SkipToHero => {
                info!("returning visit, skipping loading sequence");
                self.loader = None;
                self.hide_overlay(now);
            }
        }
    }

    /// Advance every animation to clock reading `now`.
    pub fn tick(&mut self, now: Duration) -> PageTick {
        let mut out = PageTick::default();

        if let Some(player) = self.loader.as_mut() {
            let mut writer = OverlayWriter {
                stage: &mut self.stage,
                id: SurfaceId::from(OVERLAY),
                rendered: Vec::new(),
            };
            let status = player.tick(now, &mut writer);
            out.steps = writer.rendered;

            match status {
                PlayerStatus::Completed => {
                    self.loader = None;
                    out.persist_visited = self.gate.mark_complete();
                    self.hide_overlay(now);
                }
                PlayerStatus::Cancelled | PlayerStatus::Skipped => {
                    // Hero only starts on completion or a user skip.
                    debug!(?status, "loading sequence ended early");
                    self.loader = None;
                    self.overlay = OverlayState::Hidden;
                    self.stage.remove(&SurfaceId::from(OVERLAY));
                }
                PlayerStatus::Idle | PlayerStatus::Running => {}
            }
        }

        out.finished = self.stage.tick(now);
        out
    }

    /// User asked to skip the loading screen.
    ///
    /// Cancels the sequence and goes straight to the hero. Returns `true` when
    /// the caller should write the session flag.
    pub fn skip(&mut self, now: Duration) -> bool {
        if self.loader_status() != Some(PlayerStatus::Running) {
            return false;
        }
        let Some(mut player) = self.loader.take() else {
            return false;
        };
        player.cancel();
        info!("loading sequence skipped");
        let persist = self.gate.mark_complete();
        self.hide_overlay(now);
        persist
    }

    /// Report the contact panel's visible fraction.
    ///
    /// Starts the line reveal the first time the threshold is reached.
    /// Ignored while the overlay still covers the page.
    pub fn on_contact_visibility(&mut self, fraction: f32, now: Duration) -> bool {
        if self.overlay == OverlayState::Visible || !self.contact_trigger.observe(fraction) {
            return false;
        }
        debug!(fraction, "contact panel in view");
        self.stage
            .reveal_lines(&SurfaceId::from(CONTACT), self.contact_interval, now)
            .is_some()
    }

    /// Report the visible fraction of the body heading on `row`.
    ///
    /// The first time it reaches the heading threshold the heading is
    /// cleared and typed again. Rows without a heading are ignored.
    pub fn on_heading_visibility(&mut self, row: usize, fraction: f32, now: Duration) -> bool {
        if self.overlay == OverlayState::Visible {
            return false;
        }
        let Some(heading) = self.headings.iter_mut().find(|h| h.row == row) else {
            return false;
        };
        if !heading.trigger.observe(fraction) {
            return false;
        }
        debug!(row, fraction, "heading in view");
        self.stage
            .type_text(&heading_id(row), &heading.text, self.heading_per_char, now)
            .is_some()
    }

    fn hide_overlay(&mut self, now: Duration) {
        self.overlay = OverlayState::Hidden;
        self.stage.remove(&SurfaceId::from(OVERLAY));
        self.start_hero(now);
    }

    /// Schedule one typing task per hero line, staggered. Runs once.
    fn start_hero(&mut self, now: Duration) {
        if self.hero_started {
            return;
        }
        self.hero_started = true;
        for (index, line) in self.hero_lines.iter().enumerate() {
            let at = now + self.hero_stagger * index as u32;
            self.stage
                .schedule_typing(&hero_id(index), line, self.hero_per_char, at);
        }
    }

    /// Earliest pending deadline across the sequence and all surface tasks.
    pub fn next_deadline(&self) -> Option<Duration> {
        let loader = self.loader.as_ref().and_then(SequencePlayer::next_deadline);
        match (loader, self.stage.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// True once startup ran and nothing is scheduled.
    pub fn is_idle(&self) -> bool {
        self.ready && self.loader.is_none() && !self.stage.has_tasks()
    }

    pub fn overlay(&self) -> OverlayState {
        self.overlay
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay == OverlayState::Visible
    }

    pub fn overlay_surface(&self) -> Option<&BufferSurface> {
        self.stage.get(&SurfaceId::from(OVERLAY))
    }

    pub fn contact_surface(&self) -> Option<&BufferSurface> {
        self.stage.get(&SurfaceId::from(CONTACT))
    }

    pub fn hero_surface(&self, index: usize) -> Option<&BufferSurface> {
        self.stage.get(&hero_id(index))
    }

    /// Static body lines between the hero and the contact panel.
    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Body rows that hold a heading.
    pub fn heading_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.headings.iter().map(|h| h.row)
    }

    pub fn heading_surface(&self, row: usize) -> Option<&BufferSurface> {
        self.stage.get(&heading_id(row))
    }

    /// Whether the heading on `row` already started typing.
    pub fn heading_typed(&self, row: usize) -> bool {
        self.headings
            .iter()
            .any(|h| h.row == row && h.trigger.has_fired())
    }

    pub fn hero_count(&self) -> usize {
        self.hero_lines.len()
    }

    pub fn hero_started(&self) -> bool {
        self.hero_started
    }

    pub fn contact_triggered(&self) -> bool {
        self.contact_trigger.has_fired()
    }

    pub fn loader_status(&self) -> Option<PlayerStatus> {
        self.loader.as_ref().map(SequencePlayer::status)
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }
}
