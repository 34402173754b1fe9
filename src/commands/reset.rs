//! Reset subcommand handler

use anyhow::{Context, Result};

use termfolio::session::{FileSessionStore, SessionStore, VISITED_KEY};
use termfolio::tui::Theme;

use super::play::color_theme;

/// Clear the session flag so the next run plays the loading sequence.
#[cfg(not(tarpaulin_include))]
pub fn handle() -> Result<()> {
    let mut store =
        FileSessionStore::for_current_session().context("Failed to open session store")?;
    let was_set = store.is_set(VISITED_KEY)?;
    store
        .clear(VISITED_KEY)
        .context("Failed to clear session flag")?;

    let message = if was_set {
        "Session flag cleared. The loading sequence will play on the next run."
    } else {
        "Session flag was not set. Nothing to do."
    };
    match color_theme(&Theme::default()) {
        Some(theme) => println!("{}", theme.success_text(message)),
        None => println!("{message}"),
    }
    Ok(())
}
