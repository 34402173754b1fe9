//! Integration tests for termfolio

mod helpers;

mod cli_test;
mod playback_test;
