//! Command handlers for the termfolio binary

pub mod completions;
pub mod config;
pub mod play;
pub mod reset;
