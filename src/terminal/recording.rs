use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Style;
use ratatui::text::Span;

use super::Terminal;

/// One call made against a [`RecordingTerminal`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    EnterRaw,
    LeaveRaw,
    Clear,
    Row { row: u16, text: String, style: Style },
    Flush,
}

/// In-memory terminal that replays scripted keys and records every paint.
///
/// Reading past the end of the script yields `UnexpectedEof` from
/// `read_key` and `None` (a timeout) from `poll_key`.
#[derive(Debug, Default)]
pub struct RecordingTerminal {
    keys: VecDeque<KeyEvent>,
    screen: BTreeMap<u16, Vec<(String, Style)>>,
    ops: Vec<Op>,
    raw: bool,
}

impl RecordingTerminal {
    pub fn new(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Script built from key codes with no modifiers.
    pub fn with_codes(codes: impl IntoIterator<Item = KeyCode>) -> Self {
        Self::new(
            codes
                .into_iter()
                .map(|code| KeyEvent::new(code, KeyModifiers::NONE)),
        )
    }

    /// Script that types `text` character by character, then presses `tail`.
    pub fn typing(text: &str, tail: impl IntoIterator<Item = KeyCode>) -> Self {
        Self::with_codes(text.chars().map(KeyCode::Char).chain(tail))
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }

    pub fn remaining_keys(&self) -> usize {
        self.keys.len()
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Rows written since the most recent clear, in write order.
    pub fn rows_since_clear(&self) -> Vec<u16> {
        let start = self
            .ops
            .iter()
            .rposition(|op| *op == Op::Clear)
            .map_or(0, |idx| idx + 1);
        self.ops[start..]
            .iter()
            .filter_map(|op| match op {
                Op::Row { row, .. } => Some(*row),
                _ => None,
            })
            .collect()
    }

    pub fn clear_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == Op::Clear).count()
    }

    /// Text currently visible on `row`.
    pub fn line(&self, row: u16) -> Option<String> {
        self.screen
            .get(&row)
            .map(|spans| spans.iter().map(|(text, _)| text.as_str()).collect())
    }

    /// Style of the last span on `row`.
    pub fn line_style(&self, row: u16) -> Option<Style> {
        self.screen
            .get(&row)
            .and_then(|spans| spans.last())
            .map(|(_, style)| *style)
    }

    /// All visible lines from the top of the screen down to the last painted
    /// row; unpainted rows are empty strings.
    pub fn lines(&self) -> Vec<String> {
        let Some(&last) = self.screen.keys().next_back() else {
            return Vec::new();
        };
        (0..=last)
            .map(|row| self.line(row).unwrap_or_default())
            .collect()
    }
}

impl Terminal for RecordingTerminal {
    fn enter_raw_mode(&mut self) -> io::Result<()> {
        self.raw = true;
        self.ops.push(Op::EnterRaw);
        Ok(())
    }

    fn leave_raw_mode(&mut self) -> io::Result<()> {
        self.raw = false;
        self.ops.push(Op::LeaveRaw);
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<KeyEvent> {
        self.keys.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted")
        })
    }

    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        match self.keys.pop_front() {
            Some(key) => Ok(Some(key)),
            None => {
                std::thread::sleep(timeout);
                Ok(None)
            }
        }
    }

    fn clear(&mut self) -> io::Result<()> {
        self.screen.clear();
        self.ops.push(Op::Clear);
        Ok(())
    }

    fn write_row(&mut self, row: u16, spans: &[Span<'_>]) -> io::Result<()> {
        let recorded: Vec<(String, Style)> = spans
            .iter()
            .map(|span| (span.content.to_string(), span.style))
            .collect();
        self.ops.push(Op::Row {
            row,
            text: recorded.iter().map(|(text, _)| text.as_str()).collect(),
            style: recorded.last().map(|(_, style)| *style).unwrap_or_default(),
        });
        self.screen.insert(row, recorded);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.ops.push(Op::Flush);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_overwrite_and_clear_resets_screen() {
        let mut term = RecordingTerminal::default();
        term.write_row(0, &[Span::raw("a"), Span::raw("b")]).unwrap();
        term.write_row(2, &[Span::raw("c")]).unwrap();
        assert_eq!(term.lines(), vec!["ab", "", "c"]);

        term.write_row(2, &[Span::raw("d")]).unwrap();
        assert_eq!(term.line(2).as_deref(), Some("d"));

        term.clear().unwrap();
        assert!(term.lines().is_empty());
        assert!(term.rows_since_clear().is_empty());
    }

    #[test]
    fn script_is_consumed_in_order() {
        let mut term = RecordingTerminal::typing("ab", [KeyCode::Enter]);
        assert_eq!(term.read_key().unwrap().code, KeyCode::Char('a'));
        assert_eq!(term.read_key().unwrap().code, KeyCode::Char('b'));
        assert_eq!(
            term.poll_key(Duration::ZERO).unwrap().map(|k| k.code),
            Some(KeyCode::Enter)
        );
        assert_eq!(term.poll_key(Duration::ZERO).unwrap(), None);
        let err = term.read_key().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
