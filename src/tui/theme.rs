//! Theme configuration for TUI and CLI
//!
//! Centralizes all color and style definitions for easy customization.
//! Provides both ratatui styles (for the TUI) and ANSI escape codes (for
//! plain output).

use ratatui::style::{Color, Modifier, Style};

use crate::sequence::StepKind;

/// Theme configuration.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary text color (page body, output lines)
    pub text_primary: Color,
    /// Secondary/dimmed text color (footer hints, borders)
    pub text_secondary: Color,
    /// Accent color for headings and the typing cursor
    pub accent: Color,
    /// Prompt lines of the loading sequence
    pub prompt: Color,
    /// Command lines of the loading sequence
    pub command: Color,
    /// Success color
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::neon()
    }
}

impl Theme {
    /// Default theme - cyan prompt, green commands, near-white output.
    pub fn neon() -> Self {
        Self {
            text_primary: Color::White,
            text_secondary: Color::DarkGray,
            accent: Color::LightCyan,
            prompt: Color::LightCyan,
            command: Color::LightGreen,
            success: Color::LightGreen,
        }
    }

    /// Classic terminal theme - gray text, yellow accents.
    pub fn classic() -> Self {
        Self {
            text_primary: Color::Gray,
            text_secondary: Color::DarkGray,
            accent: Color::Yellow,
            prompt: Color::Yellow,
            command: Color::Green,
            success: Color::Green,
        }
    }

    /// Cyan/blue theme.
    pub fn ocean() -> Self {
        Self {
            text_primary: Color::Cyan,
            text_secondary: Color::DarkGray,
            accent: Color::LightBlue,
            prompt: Color::LightBlue,
            command: Color::LightCyan,
            success: Color::Green,
        }
    }

    /// Look up a theme by config name. Unknown names fall back to the default.
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "classic" => Self::classic(),
            "ocean" => Self::ocean(),
            _ => Self::default(),
        }
    }

    // Style helpers

    /// Style for primary text content.
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Style for secondary/dimmed text.
    pub fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Style for accented/highlighted text.
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for bold accented text (headings, keybindings).
    pub fn accent_bold_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for one loading-sequence line.
    pub fn step_style(&self, kind: StepKind) -> Style {
        match kind {
            StepKind::Prompt => Style::default()
                .fg(self.prompt)
                .add_modifier(Modifier::BOLD),
            StepKind::Command => Style::default().fg(self.command),
            StepKind::Success => Style::default().fg(self.success),
            StepKind::Output => self.text_style(),
        }
    }

    // ANSI color helpers for plain output

    /// Format text with the primary color.
    pub fn primary_text(&self, text: &str) -> String {
        format!("{}{}{}", color_to_ansi(self.text_primary), text, ANSI_RESET)
    }

    /// Format text with the accent color.
    pub fn accent_text(&self, text: &str) -> String {
        format!("{}{}{}", color_to_ansi(self.accent), text, ANSI_RESET)
    }

    /// Format text with the success color.
    pub fn success_text(&self, text: &str) -> String {
        format!("{}{}{}", color_to_ansi(self.success), text, ANSI_RESET)
    }

    /// Format one loading-sequence line.
    pub fn step_text(&self, kind: StepKind, text: &str) -> String {
        match kind {
            StepKind::Prompt => format!(
                "{}{}{}{}",
                ANSI_BOLD,
                color_to_ansi(self.prompt),
                text,
                ANSI_RESET
            ),
            StepKind::Command => format!("{}{}{}", color_to_ansi(self.command), text, ANSI_RESET),
            StepKind::Success => self.success_text(text),
            StepKind::Output => self.primary_text(text),
        }
    }
}

/// ANSI reset sequence
const ANSI_RESET: &str = "\x1b[0m";
/// ANSI bold sequence
const ANSI_BOLD: &str = "\x1b[1m";

/// Convert a ratatui Color to an ANSI escape code.
fn color_to_ansi(color: Color) -> &'static str {
    match color {
        Color::Black => "\x1b[30m",
        Color::Red => "\x1b[31m",
        Color::Green => "\x1b[32m",
        Color::Yellow => "\x1b[33m",
        Color::Blue => "\x1b[34m",
        Color::Magenta => "\x1b[35m",
        Color::Cyan => "\x1b[36m",
        Color::Gray => "\x1b[37m",
        Color::DarkGray => "\x1b[90m",
        Color::LightRed => "\x1b[91m",
        Color::LightGreen => "\x1b[92m",
        Color::LightYellow => "\x1b[93m",
        Color::LightBlue => "\x1b[94m",
        Color::LightMagenta => "\x1b[95m",
        Color::LightCyan => "\x1b[96m",
        Color::White => "\x1b[97m",
        Color::Reset => "\x1b[0m",
        // For RGB and indexed colors, fall back to reset (no color)
        _ => "",
    }
}
