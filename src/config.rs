//! Configuration management
//!
//! Loaded from `~/.config/termfolio/config.toml` (or `$TERMFOLIO_CONFIG`).
//! Every field has a default, so an empty or missing file is valid.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::player::{
    DEFAULT_CHAR_DELAY, DEFAULT_REVEAL_INTERVAL, DEFAULT_SETTLE, DEFAULT_VISIBILITY_THRESHOLD,
    HEADING_VISIBILITY_THRESHOLD,
};
use crate::sequence::{default_boot_sequence, resolve_steps, RawStep, Step, DEFAULT_STEP_DELAY_MS};

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "TERMFOLIO_CONFIG";

/// Errors raised while loading or saving the config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub loader: LoaderConfig,
    pub hero: HeroConfig,
    pub contact: ContactConfig,
    pub page: PageConfig,
    pub ui: UiConfig,
}

/// Loading-screen sequence settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Pause after the last step before the loading screen hides
    pub settle_ms: u64,
    /// Delay for steps that do not set one
    pub default_step_delay_ms: u64,
    /// Skip the sequence when it already played this session
    pub skip_on_revisit: bool,
    /// Custom step list; the stock sequence is used when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<RawStep>>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            settle_ms: DEFAULT_SETTLE.as_millis() as u64,
            default_step_delay_ms: DEFAULT_STEP_DELAY_MS,
            skip_on_revisit: true,
            steps: None,
        }
    }
}

impl LoaderConfig {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Configured steps, or the stock sequence.
    pub fn steps(&self) -> Vec<Step> {
        match &self.steps {
            Some(raw) => resolve_steps(raw, self.default_step_delay_ms),
            None => default_boot_sequence(),
        }
    }
}

/// Hero typing animation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Lines typed into the hero panel, one typing task each
    pub lines: Vec<String>,
    pub per_char_ms: u64,
    /// Offset between the start of consecutive lines
    pub stagger_ms: u64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            lines: vec![
                "Hi, I'm Oliver Diaz.".to_string(),
                "Software engineer. I build tools that stay out of the way.".to_string(),
                "Scroll down to see projects and ways to reach me.".to_string(),
            ],
            per_char_ms: DEFAULT_CHAR_DELAY.as_millis() as u64,
            stagger_ms: 1500,
        }
    }
}

impl HeroConfig {
    pub fn per_char(&self) -> Duration {
        Duration::from_millis(self.per_char_ms)
    }

    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }
}

/// Contact panel reveal settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub lines: Vec<String>,
    pub reveal_interval_ms: u64,
    /// Visible fraction of the panel that starts the reveal
    pub visibility_threshold: f32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            lines: vec![
                "email     oliver@example.com".to_string(),
                "github    github.com/oliverdiaz".to_string(),
                "linkedin  linkedin.com/in/oliverdiaz".to_string(),
            ],
            reveal_interval_ms: DEFAULT_REVEAL_INTERVAL.as_millis() as u64,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
        }
    }
}

impl ContactConfig {
    pub fn reveal_interval(&self) -> Duration {
        Duration::from_millis(self.reveal_interval_ms)
    }
}

/// Static page body shown between the hero and the contact panel.
///
/// Lines starting with `#` are headings and get typed out the first time
/// they scroll into view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub body: Vec<String>,
    pub heading_per_char_ms: u64,
    /// Visible fraction of a heading row that starts its typing
    pub heading_threshold: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            body: vec![
                "## about".to_string(),
                "I like systems that are small, fast and boring to operate.".to_string(),
                String::new(),
                "## projects".to_string(),
                "- termfolio: this page, as a terminal program".to_string(),
                "- a handful of CLIs, parsers and build tools".to_string(),
                String::new(),
                "## skills".to_string(),
                "Rust, TypeScript, Go, SQL, Linux, CI/CD".to_string(),
            ],
            heading_per_char_ms: DEFAULT_CHAR_DELAY.as_millis() as u64,
            heading_threshold: HEADING_VISIBILITY_THRESHOLD,
        }
    }
}

impl PageConfig {
    pub fn heading_per_char(&self) -> Duration {
        Duration::from_millis(self.heading_per_char_ms)
    }
}

/// Terminal UI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// `default`, `classic` or `ocean`
    pub theme: String,
    /// Upper bound on the redraw interval
    pub frame_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            frame_ms: 33,
        }
    }
}

impl UiConfig {
    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }
}

impl Config {
    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("termfolio").join("config.toml"))
    }

    /// Load from the default path; a missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Save to the default path, creating parent directories.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, self.to_toml()?).map_err(io_err)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
