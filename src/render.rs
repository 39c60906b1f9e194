//! Render strategy: full and partial redraws over one shared row layout.

use std::io;

use ratatui::text::Span;

use crate::state::PromptState;
use crate::terminal::Terminal;
use crate::theme::ThemePalette;

/// Which part of the screen a state change invalidated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redraw {
    None,
    /// Query or list content changed.
    Full,
    /// Only the highlight moved between two visible rows.
    Partial { previous: usize, current: usize },
}

/// Screen rows of the rendered block. Both redraw paths address lines only
/// through this type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Layout;

impl Layout {
    /// Lines taken by the query prompt above the list.
    pub const QUERY_HEIGHT: u16 = 1;

    pub fn query_row(self) -> u16 {
        0
    }

    /// Screen row of list entry `index`.
    pub fn item_row(self, index: usize) -> u16 {
        let offset = u16::try_from(index).unwrap_or(u16::MAX);
        Self::QUERY_HEIGHT.saturating_add(offset)
    }
}

#[derive(Clone, Debug)]
pub struct Renderer {
    layout: Layout,
    label: String,
    palette: ThemePalette,
}

impl Renderer {
    pub fn new(label: impl Into<String>, palette: ThemePalette) -> Self {
        Self {
            layout: Layout::default(),
            label: label.into(),
            palette,
        }
    }

    pub fn paint<T, Term: Terminal + ?Sized>(
        &self,
        term: &mut Term,
        redraw: Redraw,
        state: &PromptState<'_, T>,
    ) -> io::Result<()> {
        match redraw {
            Redraw::None => return Ok(()),
            Redraw::Full => self.full(term, state)?,
            Redraw::Partial { previous, current } => {
                self.partial(term, state, previous, current)?
            }
        }
        tracing::trace!(?redraw, "painted");
        term.flush()
    }

    fn full<T, Term: Terminal + ?Sized>(
        &self,
        term: &mut Term,
        state: &PromptState<'_, T>,
    ) -> io::Result<()> {
        term.clear()?;
        term.write_row(
            self.layout.query_row(),
            &[
                Span::styled(self.label.as_str(), self.palette.label_style()),
                Span::styled(state.query(), self.palette.query_style()),
            ],
        )?;
        let selected = state.selection().index();
        for row in 0..state.view().len() {
            self.item(term, state, row, row == selected)?;
        }
        Ok(())
    }

    fn partial<T, Term: Terminal + ?Sized>(
        &self,
        term: &mut Term,
        state: &PromptState<'_, T>,
        previous: usize,
        current: usize,
    ) -> io::Result<()> {
        self.item(term, state, previous, false)?;
        self.item(term, state, current, true)
    }

    fn item<T, Term: Terminal + ?Sized>(
        &self,
        term: &mut Term,
        state: &PromptState<'_, T>,
        row: usize,
        highlighted: bool,
    ) -> io::Result<()> {
        let Some(index) = state.view().get(row) else {
            return Ok(());
        };
        let style = if highlighted {
            self.palette.highlight_style()
        } else {
            self.palette.item_style()
        };
        term.write_row(
            self.layout.item_row(row),
            &[Span::styled(state.store().display(index), style)],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::{Candidates, display_converter};
    use crate::keys::Action;
    use crate::state::Step;
    use crate::terminal::{Op, RecordingTerminal};

    fn fruit() -> Candidates<&'static str> {
        Candidates::new(vec!["apple", "apricot", "banana"], display_converter())
    }

    #[test]
    fn layout_puts_items_below_query_line() {
        let layout = Layout::default();
        assert_eq!(layout.query_row(), 0);
        assert_eq!(layout.item_row(0), 1);
        assert_eq!(layout.item_row(4), 5);
        assert_eq!(layout.item_row(usize::MAX), u16::MAX);
    }

    #[test]
    fn full_redraw_paints_query_and_every_row() {
        let store = fruit();
        let state = PromptState::new(&store, 10);
        let palette = ThemePalette::dark();
        let renderer = Renderer::new("Searching for: ", palette);
        let mut term = RecordingTerminal::default();

        renderer.paint(&mut term, Redraw::Full, &state).unwrap();

        assert_eq!(
            term.lines(),
            vec!["Searching for: ", "apple", "apricot", "banana"]
        );
        assert_eq!(term.line_style(1), Some(palette.highlight_style()));
        assert_eq!(term.line_style(2), Some(palette.item_style()));
        assert_eq!(term.ops().last(), Some(&Op::Flush));
    }

    #[test]
    fn partial_redraw_touches_exactly_two_rows() {
        let store = fruit();
        let mut state = PromptState::new(&store, 10);
        let palette = ThemePalette::dark();
        let renderer = Renderer::new("> ", palette);
        let mut term = RecordingTerminal::default();
        renderer.paint(&mut term, Redraw::Full, &state).unwrap();
        let before = term.ops().len();

        let Step::Continue(redraw) = state.apply(Action::MoveDown) else {
            panic!("move should not terminate");
        };
        renderer.paint(&mut term, redraw, &state).unwrap();

        let rows: Vec<u16> = term.ops()[before..]
            .iter()
            .filter_map(|op| match op {
                Op::Row { row, .. } => Some(*row),
                _ => None,
            })
            .collect();
        assert_eq!(rows, vec![1, 2]);
        assert_eq!(term.clear_count(), 1);
        assert_eq!(term.line_style(1), Some(palette.item_style()));
        assert_eq!(term.line_style(2), Some(palette.highlight_style()));
        assert_eq!(term.lines(), vec!["> ", "apple", "apricot", "banana"]);
    }

    #[test]
    fn none_paints_nothing() {
        let store = fruit();
        let state = PromptState::new(&store, 10);
        let renderer = Renderer::new("> ", ThemePalette::dark());
        let mut term = RecordingTerminal::default();
        renderer.paint(&mut term, Redraw::None, &state).unwrap();
        assert!(term.ops().is_empty());
    }
}
