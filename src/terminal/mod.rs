//! The terminal handle owned by a running prompt.
//!
//! Rendering never touches process-wide console state: every write goes
//! through a `Terminal` passed into the prompt, so tests can swap in
//! [`RecordingTerminal`] and inspect exactly which rows were painted.

mod backend;
mod recording;

use std::io;
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::text::Span;

pub use backend::CrosstermTerminal;
pub use recording::{Op, RecordingTerminal};

pub trait Terminal {
    fn enter_raw_mode(&mut self) -> io::Result<()>;

    fn leave_raw_mode(&mut self) -> io::Result<()>;

    /// Block until the next key press.
    fn read_key(&mut self) -> io::Result<KeyEvent>;

    /// Wait at most `timeout` for a key press.
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>>;

    /// Erase the whole screen and home the cursor.
    fn clear(&mut self) -> io::Result<()>;

    /// Move to the start of screen row `row` (0-based), erase that line and
    /// print `spans` in order.
    fn write_row(&mut self, row: u16, spans: &[Span<'_>]) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}

/// Holds the terminal in raw mode; restores it when dropped, whichever way
/// the prompt exits.
pub struct RawModeGuard<'a, T: Terminal + ?Sized> {
    term: &'a mut T,
}

impl<'a, T: Terminal + ?Sized> RawModeGuard<'a, T> {
    /// Enter raw mode. If entering fails part way, whatever was switched on
    /// is switched back off before the error is returned.
    pub fn acquire(term: &'a mut T) -> io::Result<Self> {
        if let Err(err) = term.enter_raw_mode() {
            if let Err(restore) = term.leave_raw_mode() {
                tracing::warn!("failed to restore terminal mode: {restore}");
            }
            return Err(err);
        }
        Ok(Self { term })
    }
}

impl<T: Terminal + ?Sized> Deref for RawModeGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.term
    }
}

impl<T: Terminal + ?Sized> DerefMut for RawModeGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.term
    }
}

impl<T: Terminal + ?Sized> Drop for RawModeGuard<'_, T> {
    fn drop(&mut self) {
        if let Err(err) = self.term.leave_raw_mode() {
            tracing::warn!("failed to restore terminal mode: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_restores_mode_on_drop() {
        let mut term = RecordingTerminal::new(Vec::new());
        {
            let mut guard = RawModeGuard::acquire(&mut term).unwrap();
            assert!(guard.is_raw());
            guard.clear().unwrap();
        }
        assert!(!term.is_raw());
        assert_eq!(term.ops(), &[Op::EnterRaw, Op::Clear, Op::LeaveRaw]);
    }

    #[test]
    fn guard_restores_mode_on_early_return() {
        fn fails(term: &mut RecordingTerminal) -> io::Result<()> {
            let mut guard = RawModeGuard::acquire(term)?;
            guard.read_key()?;
            Ok(())
        }

        let mut term = RecordingTerminal::new(Vec::new());
        assert!(fails(&mut term).is_err());
        assert!(!term.is_raw());
    }

    /// Switches raw mode on, then fails to set up the screen.
    #[derive(Default)]
    struct BrokenScreen {
        raw: bool,
    }

    impl Terminal for BrokenScreen {
        fn enter_raw_mode(&mut self) -> io::Result<()> {
            self.raw = true;
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn leave_raw_mode(&mut self) -> io::Result<()> {
            self.raw = false;
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn read_key(&mut self) -> io::Result<KeyEvent> {
            Err(io::Error::from(io::ErrorKind::UnexpectedEof))
        }

        fn poll_key(&mut self, _timeout: Duration) -> io::Result<Option<KeyEvent>> {
            Ok(None)
        }

        fn clear(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn write_row(&mut self, _row: u16, _spans: &[Span<'_>]) -> io::Result<()> {
            Ok(())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_acquire_leaves_raw_mode_off() {
        let mut term = BrokenScreen::default();
        let err = RawModeGuard::acquire(&mut term).err().expect("acquire must fail");
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(!term.raw);
    }
}
