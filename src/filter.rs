//! Filter engine: computes the visible page of candidates for a query.

use crate::candidates::Candidates;

/// Indices into the candidate store, in store order, at most one page long.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilteredView {
    indices: Vec<usize>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Store index of the row at `row`.
    pub fn get(&self, row: usize) -> Option<usize> {
        self.indices.get(row).copied()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

/// Collect the first `page_size` candidates matching `query`.
///
/// The scan stops as soon as the page is full, so the comparer is never
/// invoked on candidates past the last kept match.
pub fn compute_view<T>(store: &Candidates<T>, query: &str, page_size: usize) -> FilteredView {
    let indices = (0..store.len())
        .filter(|&idx| store.matches(idx, query))
        .take(page_size)
        .collect();
    FilteredView { indices }
}
