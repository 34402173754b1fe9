//! Marker-file session store.
//!
//! A flag is an empty file named `<key>-<session id>` in the runtime
//! directory. The session id is the terminal login session, so a new
//! session starts with no flags set. Most systems also wipe the runtime
//! directory at logout.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{SessionError, SessionStore};

/// Environment variable overriding the flag directory.
pub const SESSION_DIR_ENV: &str = "TERMFOLIO_SESSION_DIR";

/// Identifier of the current terminal session.
#[cfg(unix)]
pub fn current_session_id() -> String {
    // SAFETY: getsid(0) only queries the calling process and has no preconditions.
    let sid = unsafe { libc::getsid(0) };
    if sid < 0 {
        "default".to_string()
    } else {
        sid.to_string()
    }
}

#[cfg(not(unix))]
pub fn current_session_id() -> String {
    "default".to_string()
}

/// Session store backed by marker files.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
    session_id: String,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>, session_id: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            session_id: session_id.into(),
        }
    }

    /// Store in the default directory for the current session.
    pub fn for_current_session() -> Result<Self, SessionError> {
        Ok(Self::new(Self::default_dir()?, current_session_id()))
    }

    /// `$TERMFOLIO_SESSION_DIR`, else the user runtime dir, else the temp dir.
    pub fn default_dir() -> Result<PathBuf, SessionError> {
        if let Some(dir) = std::env::var_os(SESSION_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        let base = dirs::runtime_dir().unwrap_or_else(std::env::temp_dir);
        if base.as_os_str().is_empty() {
            return Err(SessionError::NoSessionDir);
        }
        Ok(base.join("termfolio"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the marker file for `key`.
    pub fn flag_path(&self, key: &str) -> PathBuf {
        let safe_key: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}-{}", safe_key, self.session_id))
    }
}

impl SessionStore for FileSessionStore {
    fn is_set(&self, key: &str) -> Result<bool, SessionError> {
        match fs::metadata(self.flag_path(key)) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.flag_path(key), b"")?;
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), SessionError> {
        match fs::remove_file(self.flag_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
