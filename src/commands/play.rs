//! Play handler: builds the page and hands it to the TUI or the plain printer.

use std::io;
use std::thread;

use anyhow::{Context, Result};
use tracing::{info, warn};

use termfolio::cli::PlayArgs;
use termfolio::clock::SystemClock;
use termfolio::config::Config;
use termfolio::page::Page;
use termfolio::plain::PlainPrinter;
use termfolio::sequence::{load_steps, Step};
use termfolio::session::{FileSessionStore, MemorySessionStore, SessionStore, VISITED_KEY};
use termfolio::tui::{PageApp, Theme};

/// `theme` when stdout is a color-capable TTY, `None` otherwise.
///
/// Honors `NO_COLOR` (any non-empty value).
pub fn color_theme(theme: &Theme) -> Option<&Theme> {
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    if no_color || !atty::is(atty::Stream::Stdout) {
        None
    } else {
        Some(theme)
    }
}

#[cfg(not(tarpaulin_include))]
pub fn handle(args: &PlayArgs) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let steps = resolve_steps(args, &config)?;

    let mut store = open_store();
    let visited = if args.replay || !config.loader.skip_on_revisit {
        false
    } else {
        store.is_set(VISITED_KEY).unwrap_or_else(|e| {
            warn!(error = %e, "could not read session flag, treating as first visit");
            false
        })
    };
    info!(steps = steps.len(), visited, replay = args.replay, "starting page");

    let mut page = Page::new(&config, steps, visited);
    let theme = Theme::by_name(&config.ui.theme);

    if args.plain || !atty::is(atty::Stream::Stdout) {
        let stdout = io::stdout();
        let mut printer = PlainPrinter::new(stdout.lock(), color_theme(&theme));
        printer
            .run(&mut page, &SystemClock::new(), thread::sleep, store.as_mut())
            .context("Failed to write output")?;
        return Ok(());
    }

    let mut app = PageApp::new(page, theme, config.ui.frame(), store);
    app.run()
}

/// `--steps` file first, then the config's list, then the stock sequence.
fn resolve_steps(args: &PlayArgs, config: &Config) -> Result<Vec<Step>> {
    match &args.steps {
        Some(path) => load_steps(path, config.loader.default_step_delay_ms)
            .with_context(|| format!("Failed to load steps from {}", path.display())),
        None => Ok(config.loader.steps()),
    }
}

/// The per-session file store, or an in-memory one if no directory is usable.
fn open_store() -> Box<dyn SessionStore> {
    match FileSessionStore::for_current_session() {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "session store unavailable, flag will not persist");
            Box::new(MemorySessionStore::new())
        }
    }
}
