//! Key decoder: classifies raw key events into prompt actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use once_cell::sync::Lazy;
use regex::Regex;

/// Letters, decimal digits, symbols and punctuation, by Unicode general
/// category.
static TYPABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{Nd}\p{S}\p{P}]$").expect("typable char regex"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    AppendChar(char),
    DeleteChar,
    MoveUp,
    MoveDown,
    Confirm,
    /// Ctrl+C while the terminal is in raw mode.
    Interrupt,
    Ignore,
}

/// Map one key event to an action. Pure: depends only on the event and
/// whether the query is currently empty.
pub fn decode(key: &KeyEvent, query_is_empty: bool) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::Ignore;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Interrupt;
    }
    match key.code {
        KeyCode::Backspace if query_is_empty => Action::Ignore,
        KeyCode::Backspace => Action::DeleteChar,
        KeyCode::Down => Action::MoveDown,
        KeyCode::Up => Action::MoveUp,
        KeyCode::Enter => Action::Confirm,
        KeyCode::Tab => Action::AppendChar('\t'),
        KeyCode::Char(c) if is_printable(c) => Action::AppendChar(c),
        _ => Action::Ignore,
    }
}

/// Letters, digits, whitespace, symbols and punctuation. Format characters,
/// combining marks, private-use and unassigned code points are not typable.
fn is_printable(c: char) -> bool {
    c.is_whitespace() || TYPABLE_RE.is_match(c.encode_utf8(&mut [0; 4]))
}
