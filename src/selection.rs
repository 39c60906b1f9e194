//! Highlighted-row bookkeeping for the filtered view.

use crate::error::{PromptError, Result};
use crate::filter::FilteredView;

/// Row index of the highlighted entry. Saturates at both ends; never wraps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    index: usize,
}

impl Selection {
    pub fn index(self) -> usize {
        self.index
    }

    /// Returns `true` if the highlight moved.
    pub fn move_down(&mut self, view_len: usize) -> bool {
        if self.index + 1 < view_len {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Returns `true` if the highlight moved.
    pub fn move_up(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Store index of the highlighted row.
    pub fn current(self, view: &FilteredView) -> Result<usize> {
        view.get(self.index).ok_or(PromptError::EmptySelection)
    }
}
