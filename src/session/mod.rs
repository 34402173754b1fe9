//! Session-scoped flags
//!
//! The loading sequence plays once per terminal session. Whether it already
//! played lives in a [`SessionStore`]. The store is read once at startup and
//! written once when the sequence finishes.

mod file;
mod gate;

use std::collections::HashSet;

pub use file::{current_session_id, FileSessionStore};
pub use gate::{BootGate, BootPlan};

/// Key of the "loading sequence already played" flag.
pub const VISITED_KEY: &str = "portfolio-visited";

/// Errors from the session store.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("No runtime or temp directory available for session flags")]
    NoSessionDir,
}

/// Boolean flags scoped to the current session.
pub trait SessionStore {
    fn is_set(&self, key: &str) -> Result<bool, SessionError>;

    fn set(&mut self, key: &str) -> Result<(), SessionError>;

    fn clear(&mut self, key: &str) -> Result<(), SessionError>;
}

/// In-memory store, for tests and `--replay` runs.
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    flags: HashSet<String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn is_set(&self, key: &str) -> Result<bool, SessionError> {
        Ok(self.flags.contains(key))
    }

    fn set(&mut self, key: &str) -> Result<(), SessionError> {
        self.flags.insert(key.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), SessionError> {
        self.flags.remove(key);
        Ok(())
    }
}
