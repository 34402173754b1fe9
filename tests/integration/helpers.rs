//! Shared setup for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Config with every delay at zero so `play --plain` finishes instantly.
pub const FAST_CONFIG: &str = r#"
[loader]
settle_ms = 0
default_step_delay_ms = 0
steps = [
    { kind = "prompt", text = "guest@portfolio:~$ " },
    { kind = "success", text = "[SUCCESS] ready" },
]

[hero]
lines = ["hi there"]
per_char_ms = 0
stagger_ms = 0

[contact]
lines = ["mail: me@example.com"]
reveal_interval_ms = 0
"#;

/// Isolated config, session and cache directories for one test.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("session")).unwrap();
        Self { dir }
    }

    pub fn with_config(content: &str) -> Self {
        let env = Self::new();
        fs::write(env.config_path(), content).unwrap();
        env
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    pub fn session_dir(&self) -> PathBuf {
        self.dir.path().join("session")
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The binary, pointed at this environment's directories.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("termfolio").unwrap();
        cmd.env("TERMFOLIO_CONFIG", self.config_path())
            .env("TERMFOLIO_SESSION_DIR", self.session_dir())
            .env("XDG_CACHE_HOME", self.path().join("cache"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}
