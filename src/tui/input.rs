//! Keyboard input handling for the page.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Control-flow decision for one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    /// Nothing to do
    Continue,
    /// Leave the program
    Quit,
    /// Skip the loading screen
    Skip,
    /// Scroll by a signed number of rows
    Scroll(isize),
    /// Scroll by a signed number of pages
    Page(isize),
    Top,
    Bottom,
}

/// Map a key press to a page action.
///
/// While the loading overlay is up, `Esc`, `Enter` and `Space` skip it.
/// Once it is gone, `Esc` quits like `q`.
pub fn handle_key(key: KeyEvent, overlay_visible: bool) -> PageAction {
    if key.kind == KeyEventKind::Release {
        return PageAction::Continue;
    }

    match key.code {
        KeyCode::Char('q') => PageAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => PageAction::Quit,
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') if overlay_visible => PageAction::Skip,
        KeyCode::Esc => PageAction::Quit,

        KeyCode::Up | KeyCode::Char('k') => PageAction::Scroll(-1),
        KeyCode::Down | KeyCode::Char('j') => PageAction::Scroll(1),
        KeyCode::PageUp => PageAction::Page(-1),
        KeyCode::PageDown | KeyCode::Char(' ') => PageAction::Page(1),
        KeyCode::Home | KeyCode::Char('g') => PageAction::Top,
        KeyCode::End | KeyCode::Char('G') => PageAction::Bottom,
        _ => PageAction::Continue,
    }
}
