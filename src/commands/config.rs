//! Config subcommands handler

use anyhow::{Context, Result};

use termfolio::config::Config;
use termfolio::tui::Theme;

use super::play::color_theme;

/// Show the effective configuration as TOML.
///
/// Defaults are filled in, so this also works without a config file.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let toml_str = config.to_toml()?;
    let theme = Theme::by_name(&config.ui.theme);
    match color_theme(&theme) {
        Some(theme) => println!("{}", theme.primary_text(&toml_str)),
        None => println!("{toml_str}"),
    }
    Ok(())
}

/// Print where the config file is read from, noting whether it exists.
pub fn handle_path() -> Result<()> {
    let path = Config::config_path()?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist yet, defaults are in effect)");
    }
    Ok(())
}
