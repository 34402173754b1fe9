//! Line-oriented output for pipes and dumb terminals.
//!
//! Drives the same [`Page`] as the TUI, but prints each loading step, each
//! finished hero line and each revealed contact line as it happens. The
//! contact panel counts as fully visible once the hero lines are done.

use std::io::{self, Write};
use std::time::Duration;

use tracing::warn;

use crate::clock::Clock;
use crate::page::{hero_id, Page};
use crate::player::TaskStatus;
use crate::session::{SessionStore, VISITED_KEY};
use crate::surface::SurfaceId;
use crate::tui::Theme;

/// Plain-mode printer. `theme` is `None` when colors are off.
pub struct PlainPrinter<'a, W: Write> {
    out: W,
    theme: Option<&'a Theme>,
    contact_printed: usize,
}

impl<'a, W: Write> PlainPrinter<'a, W> {
    pub fn new(out: W, theme: Option<&'a Theme>) -> Self {
        Self {
            out,
            theme,
            contact_printed: 0,
        }
    }

    /// Play the page to the end, sleeping between deadlines.
    pub fn run<C: Clock>(
        &mut self,
        page: &mut Page,
        clock: &C,
        mut sleep: impl FnMut(Duration),
        store: &mut dyn SessionStore,
    ) -> io::Result<()> {
        page.on_ready(clock.now());

        loop {
            let now = clock.now();
            let tick = page.tick(now);

            for step in &tick.steps {
                let line = match self.theme {
                    Some(theme) => theme.step_text(step.kind, &step.text),
                    None => step.text.clone(),
                };
                writeln!(self.out, "{line}")?;
            }
            if tick.persist_visited {
                if let Err(e) = store.set(VISITED_KEY) {
                    warn!(error = %e, "could not write session flag");
                }
            }
            for (id, status) in &tick.finished {
                if *status == TaskStatus::Completed {
                    self.print_hero(page, id)?;
                }
            }
            self.print_contact(page)?;

            if !page.overlay_visible() && !page.stage().has_tasks() {
                page.on_contact_visibility(1.0, now);
            }
            if page.is_idle() {
                break;
            }

            match page.next_deadline() {
                Some(deadline) => {
                    let wait = deadline.saturating_sub(now);
                    if !wait.is_zero() {
                        self.out.flush()?;
                        sleep(wait);
                    }
                }
                None => break,
            }
        }
        self.out.flush()
    }

    fn print_hero(&mut self, page: &Page, id: &SurfaceId) -> io::Result<()> {
        let Some(index) = (0..page.hero_count()).find(|i| hero_id(*i) == *id) else {
            return Ok(());
        };
        let text = page
            .hero_surface(index)
            .map(|s| s.content())
            .unwrap_or_default();
        match self.theme {
            Some(theme) => writeln!(
                self.out,
                "{}{}",
                theme.accent_text("> "),
                theme.primary_text(&text)
            ),
            None => writeln!(self.out, "> {text}"),
        }
    }

    fn print_contact(&mut self, page: &Page) -> io::Result<()> {
        let Some(contact) = page.contact_surface() else {
            return Ok(());
        };
        let visible = contact.visible_lines();
        if visible.len() > self.contact_printed && self.contact_printed == 0 {
            writeln!(self.out)?;
        }
        for line in visible.iter().skip(self.contact_printed) {
            match self.theme {
                Some(theme) => writeln!(
                    self.out,
                    "{}{}",
                    theme.accent_text("$ "),
                    theme.primary_text(&line.text)
                )?,
                None => writeln!(self.out, "$ {}", line.text)?,
            }
        }
        self.contact_printed = self.contact_printed.max(visible.len());
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
