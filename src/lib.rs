//! termfolio: a portfolio page for the terminal
//!
//! The page plays a boot-sequence loading screen once per terminal session,
//! types out its hero lines and reveals the contact panel when it scrolls
//! into view. All animations share one model: an ordered list of
//! delay-then-reveal units, cancellable at every resume point.

pub mod cli;
pub mod clock;
pub mod config;
pub mod logging;
pub mod page;
pub mod plain;
pub mod player;
pub mod sequence;
pub mod session;
pub mod surface;
pub mod tui;

pub use config::Config;
pub use page::Page;
