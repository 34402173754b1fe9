//! termfolio CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use termfolio::cli::{Cli, Commands, ConfigCommands};
use termfolio::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_path) = logging::default_log_path() {
        logging::init_global(&log_path);
    }

    match cli.command {
        None => commands::play::handle(&cli.play),
        Some(Commands::Play(args)) => commands::play::handle(&args),
        Some(Commands::Reset) => commands::reset::handle(),
        Some(Commands::Config(cmd)) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
        },
        Some(Commands::Completions { shell }) => commands::completions::handle(shell),
    }
}
