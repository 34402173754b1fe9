//! TUI (Text User Interface) module
//!
//! Renders the portfolio page with ratatui/crossterm: the loading overlay,
//! the typed hero lines and the contact panel, scrolling under a key-hint footer.

pub mod app;
pub mod input;
pub mod render;
pub mod theme;
pub mod ui;

pub use app::PageApp;
pub use input::{handle_key, PageAction};
pub use render::{DocumentLayout, PageView};
pub use theme::Theme;
