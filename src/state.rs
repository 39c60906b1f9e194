//! The prompt state machine, free of any terminal I/O.

use crate::candidates::Candidates;
use crate::filter::{FilteredView, compute_view};
use crate::keys::Action;
use crate::render::Redraw;
use crate::selection::Selection;

/// Outcome of applying one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Keep filtering; paint as requested.
    Continue(Redraw),
    /// The user accepted the candidate at this store index.
    Confirmed(usize),
    Interrupted,
}

/// Query, visible page and highlight for one prompt invocation.
pub struct PromptState<'s, T> {
    store: &'s Candidates<T>,
    page_size: usize,
    query: String,
    view: FilteredView,
    selection: Selection,
}

impl<'s, T> PromptState<'s, T> {
    /// Starts with an empty query and its view already computed.
    pub fn new(store: &'s Candidates<T>, page_size: usize) -> Self {
        let view = compute_view(store, "", page_size);
        Self {
            store,
            page_size,
            query: String::new(),
            view,
            selection: Selection::default(),
        }
    }

    pub fn store(&self) -> &'s Candidates<T> {
        self.store
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn apply(&mut self, action: Action) -> Step {
        match action {
            Action::AppendChar(c) => {
                self.query.push(c);
                self.refilter()
            }
            Action::DeleteChar => {
                if self.query.pop().is_none() {
                    return Step::Continue(Redraw::None);
                }
                self.refilter()
            }
            Action::MoveDown => {
                let previous = self.selection.index();
                if self.selection.move_down(self.view.len()) {
                    Step::Continue(Redraw::Partial {
                        previous,
                        current: self.selection.index(),
                    })
                } else {
                    Step::Continue(Redraw::None)
                }
            }
            Action::MoveUp => {
                let previous = self.selection.index();
                if !self.view.is_empty() && self.selection.move_up() {
                    Step::Continue(Redraw::Partial {
                        previous,
                        current: self.selection.index(),
                    })
                } else {
                    Step::Continue(Redraw::None)
                }
            }
            Action::Confirm => match self.selection.current(&self.view) {
                Ok(index) => Step::Confirmed(index),
                Err(_) => Step::Continue(Redraw::None),
            },
            Action::Interrupt => Step::Interrupted,
            Action::Ignore => Step::Continue(Redraw::None),
        }
    }

    /// The query changed: the old highlight may not exist any more, and the
    /// comparer may not be monotonic, so rebuild from scratch.
    fn refilter(&mut self) -> Step {
        self.selection.reset();
        self.view = compute_view(self.store, &self.query, self.page_size);
        tracing::debug!(
            query = %self.query,
            visible = self.view.len(),
            "recomputed view"
        );
        Step::Continue(Redraw::Full)
    }
}
