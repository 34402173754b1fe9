//! Interactive page application
//!
//! Owns the [`Page`], the scroll state and the session store, and runs the
//! redraw loop. Redraws happen when a deadline passes, on input, or at least
//! once per frame interval.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use tracing::{debug, warn};

use super::input::{handle_key, PageAction};
use super::render::{render, DocumentLayout, PageView};
use super::theme::Theme;
use crate::clock::{Clock, SystemClock};
use crate::page::Page;
use crate::session::{SessionStore, VISITED_KEY};

/// Puts the terminal in raw mode on the alternate screen and restores it on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

pub struct PageApp {
    page: Page,
    view: PageView,
    layout: DocumentLayout,
    theme: Theme,
    frame: Duration,
    store: Box<dyn SessionStore>,
    should_quit: bool,
}

impl PageApp {
    pub fn new(page: Page, theme: Theme, frame: Duration, store: Box<dyn SessionStore>) -> Self {
        Self {
            page,
            view: PageView::default(),
            layout: DocumentLayout::default(),
            theme,
            frame,
            store,
            should_quit: false,
        }
    }

    /// Run on the real terminal until the user quits.
    #[cfg(not(tarpaulin_include))]
    pub fn run(&mut self) -> Result<()> {
        let _guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;
        let clock = SystemClock::new();

        self.page.on_ready(clock.now());
        while !self.should_quit {
            self.update(clock.now());
            self.draw(&mut terminal)?;
            self.report_visibility(clock.now());

            if event::poll(self.wait_time(clock.now()))? {
                match event::read()? {
                    Event::Key(key) => self.handle_key_event(key, clock.now()),
                    Event::Resize(_, _) => debug!("terminal resized"),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Draw one frame on any backend. Used by the run loop and in tests.
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| {
            self.layout = render(frame, &self.page, &mut self.view, &self.theme);
        })?;
        Ok(())
    }

    /// Advance animations and persist the session flag when asked to.
    pub fn update(&mut self, now: Duration) {
        let tick = self.page.tick(now);
        if tick.persist_visited {
            self.persist_visited();
        }
    }

    /// Feed the contact panel's and the headings' visibility after a draw.
    pub fn report_visibility(&mut self, now: Duration) {
        if self.page.overlay_visible() {
            return;
        }
        let (scroll, height) = (self.view.scroll, self.view.viewport_height);
        let fraction = self.layout.contact_visibility(scroll, height);
        self.page.on_contact_visibility(fraction, now);

        let pending: Vec<usize> = self
            .page
            .heading_rows()
            .filter(|row| !self.page.heading_typed(*row))
            .collect();
        for row in pending {
            let fraction = self.layout.body_row_visibility(row, scroll, height);
            self.page.on_heading_visibility(row, fraction, now);
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent, now: Duration) {
        let total = self.layout.total;
        match handle_key(key, self.page.overlay_visible()) {
            PageAction::Continue => {}
            PageAction::Quit => self.should_quit = true,
            PageAction::Skip => {
                if self.page.skip(now) {
                    self.persist_visited();
                }
            }
            PageAction::Scroll(rows) => self.view.scroll_by(rows, total),
            PageAction::Page(pages) => self.view.page_by(pages, total),
            PageAction::Top => self.view.to_top(),
            PageAction::Bottom => self.view.to_bottom(total),
        }
    }

    /// How long to block on input before the next redraw.
    fn wait_time(&self, now: Duration) -> Duration {
        match self.page.next_deadline() {
            Some(deadline) => deadline.saturating_sub(now).min(self.frame),
            None => self.frame,
        }
    }

    fn persist_visited(&mut self) {
        if let Err(e) = self.store.set(VISITED_KEY) {
            warn!(error = %e, "could not write session flag");
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn view(&self) -> PageView {
        self.view
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
