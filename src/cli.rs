//! Command-line interface definition
//!
//! Lives in the library so `xtask` can render the man page from it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(name = "termfolio")]
#[command(version, about = "Portfolio page for the terminal")]
#[command(long_about = "Portfolio page for the terminal.

Plays a boot-sequence loading screen once per terminal session, then types
out the hero lines and reveals the contact panel when it scrolls into view.

EXAMPLES:
    termfolio                      Open the page
    termfolio --replay             Play the loading screen again
    termfolio --plain | less       Print the page as plain lines
    termfolio reset                Forget that this session has seen the loader
    termfolio config show          Show the effective configuration")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub play: PlayArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlayArgs {
    /// Play the loading sequence even if this session already saw it
    #[arg(long)]
    pub replay: bool,

    /// Print lines instead of drawing the full-screen page
    #[arg(long)]
    pub plain: bool,

    /// Load the loading sequence from a JSON or TOML file
    #[arg(long, value_name = "FILE")]
    pub steps: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the portfolio page (the default)
    Play(PlayArgs),

    /// Clear the session flag so the loading sequence plays again
    Reset,

    /// Inspect the configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(long_about = "Generate shell completions.

Prints a completion script for the given shell to stdout.

EXAMPLE:
    termfolio completions bash > ~/.local/share/bash-completion/completions/termfolio")]
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
}
