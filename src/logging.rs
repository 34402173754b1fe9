//! Tracing subscriber setup
//!
//! The TUI owns the terminal, so logs go to a file in the user cache
//! directory. `RUST_LOG` filters as usual and defaults to `info`.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Default log file location: `<cache dir>/termfolio/termfolio.log`.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("termfolio").join("termfolio.log"))
}

/// Build a subscriber writing to `log_file`, filtered by `RUST_LOG`.
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    build_subscriber_with_filter(log_file, env_filter)
}

pub fn build_subscriber_with_filter(
    log_file: File,
    env_filter: EnvFilter,
) -> impl tracing::Subscriber + Send + Sync {
    let fmt_layer = fmt::layer()
        .with_writer(Arc::new(log_file))
        .with_ansi(false);

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}

/// Install the global subscriber logging to `log_path`.
///
/// Returns `false` if the file could not be created or a subscriber is
/// already installed. The program keeps running without logs in that case.
pub fn init_global(log_path: &Path) -> bool {
    if let Some(parent) = log_path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let Ok(log_file) = File::create(log_path) else {
        return false;
    };
    tracing::subscriber::set_global_default(build_subscriber(log_file)).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn subscriber_writes_events_to_file() {
        let log_file = NamedTempFile::new().unwrap();
        let subscriber =
            build_subscriber_with_filter(log_file.reopen().unwrap(), EnvFilter::new("info"));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(steps = 3, "sequence started");
        });

        let content = fs::read_to_string(log_file.path()).unwrap();
        assert!(content.contains("sequence started"), "log was: {content}");
        assert!(content.contains("steps=3"));
    }

    #[test]
    fn default_log_path_ends_with_log_file() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("termfolio/termfolio.log"));
        }
    }
}
