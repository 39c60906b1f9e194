//! The search prompt: configuration surface and the driving loop.
//!
//! ```no_run
//! use search_prompt::{CrosstermTerminal, SearchPrompt};
//!
//! let prompt = SearchPrompt::builder()
//!     .choices(["apple", "apricot", "banana"])
//!     .use_display()
//!     .page_size(5)
//!     .build()?;
//! let fruit = prompt.show(&mut CrosstermTerminal::stderr())?;
//! println!("{fruit}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::KeyEvent;

use crate::candidates::{Candidates, Comparer, Converter, display_converter};
use crate::error::{ConfigError, PromptError, Result};
use crate::keys::decode;
use crate::render::{Redraw, Renderer};
use crate::state::{PromptState, Step};
use crate::terminal::{RawModeGuard, Terminal};
use crate::theme::ThemePalette;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const DEFAULT_LABEL: &str = "Searching for: ";

/// How long a cancellable prompt waits for a key before re-checking its
/// cancel token.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A strictly positive number of visible rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    pub fn new(raw: i64) -> std::result::Result<Self, ConfigError> {
        usize::try_from(raw)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(ConfigError::InvalidPageSize(raw))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_PAGE_SIZE as usize).unwrap_or(NonZeroUsize::MIN))
    }
}

/// Shared flag that aborts a running [`SearchPrompt::show_with_cancel`].
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct SearchPromptBuilder<T> {
    items: Vec<T>,
    converter: Option<Converter<T>>,
    comparer: Option<Comparer<T>>,
    page_size: i64,
    label: String,
    palette: ThemePalette,
}

impl<T> Default for SearchPromptBuilder<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            converter: None,
            comparer: None,
            page_size: DEFAULT_PAGE_SIZE,
            label: DEFAULT_LABEL.to_string(),
            palette: ThemePalette::default(),
        }
    }
}

impl<T> SearchPromptBuilder<T> {
    pub fn choice(mut self, item: T) -> Self {
        self.items.push(item);
        self
    }

    pub fn choices(mut self, items: impl IntoIterator<Item = T>) -> Self {
        self.items.extend(items);
        self
    }

    /// Text shown for each candidate; also what the default comparer matches.
    pub fn converter(mut self, converter: impl Fn(&T) -> String + 'static) -> Self {
        self.converter = Some(Box::new(converter));
        self
    }

    /// Replace the default case-sensitive prefix match.
    pub fn comparer(mut self, comparer: impl Fn(&T, &str) -> bool + 'static) -> Self {
        self.comparer = Some(Box::new(comparer));
        self
    }

    /// Maximum number of visible rows. Validated by [`build`](Self::build).
    pub fn page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn theme(mut self, palette: ThemePalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn build(self) -> std::result::Result<SearchPrompt<T>, ConfigError> {
        let page_size = PageSize::new(self.page_size)?;
        let converter = self.converter.ok_or(ConfigError::MissingConverter)?;
        let mut store = Candidates::new(self.items, converter);
        if let Some(comparer) = self.comparer {
            store = store.with_comparer(comparer);
        }
        Ok(SearchPrompt {
            store,
            page_size,
            renderer: Renderer::new(self.label, self.palette),
        })
    }
}

impl<T: fmt::Display + 'static> SearchPromptBuilder<T> {
    /// Display candidates through their `Display` impl.
    pub fn use_display(mut self) -> Self {
        self.converter = Some(display_converter());
        self
    }
}

/// A configured, ready-to-show incremental search prompt.
pub struct SearchPrompt<T> {
    store: Candidates<T>,
    page_size: PageSize,
    renderer: Renderer,
}

impl<T> SearchPrompt<T> {
    pub fn builder() -> SearchPromptBuilder<T> {
        SearchPromptBuilder::default()
    }

    pub fn add_choice(&mut self, item: T) {
        self.store.add_choice(item);
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Run until the user confirms a candidate, and return it.
    pub fn show<Term: Terminal + ?Sized>(self, term: &mut Term) -> Result<T> {
        self.run(term, None)
    }

    /// Like [`show`](Self::show), but gives up with
    /// [`PromptError::Cancelled`] once `cancel` fires.
    pub fn show_with_cancel<Term: Terminal + ?Sized>(
        self,
        term: &mut Term,
        cancel: &CancelToken,
    ) -> Result<T> {
        self.run(term, Some(cancel))
    }

    fn run<Term: Terminal + ?Sized>(
        self,
        term: &mut Term,
        cancel: Option<&CancelToken>,
    ) -> Result<T> {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(PromptError::Cancelled);
        }
        tracing::info!(
            candidates = self.store.len(),
            page_size = self.page_size.get(),
            "search prompt started"
        );

        let chosen = {
            let mut guard = RawModeGuard::acquire(term)?;
            let mut state = PromptState::new(&self.store, self.page_size.get());
            self.renderer.paint(&mut *guard, Redraw::Full, &state)?;

            loop {
                let Some(key) = next_key(&mut *guard, cancel)? else {
                    tracing::warn!("search prompt cancelled");
                    return Err(PromptError::Cancelled);
                };
                let action = decode(&key, state.query().is_empty());
                tracing::debug!(?action, "key decoded");
                match state.apply(action) {
                    Step::Continue(redraw) => self.renderer.paint(&mut *guard, redraw, &state)?,
                    Step::Confirmed(index) => break index,
                    Step::Interrupted => {
                        tracing::warn!("search prompt interrupted");
                        return Err(PromptError::Cancelled);
                    }
                }
            }
        };

        tracing::info!(index = chosen, "candidate confirmed");
        self.store
            .into_item(chosen)
            .ok_or(PromptError::EmptySelection)
    }
}

impl<T: fmt::Display + 'static> SearchPrompt<T> {
    /// Prompt over `items` with every default: `Display` text, prefix match,
    /// ten rows.
    pub fn from_display(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            store: Candidates::new(items.into_iter().collect(), display_converter()),
            page_size: PageSize::default(),
            renderer: Renderer::new(DEFAULT_LABEL, ThemePalette::default()),
        }
    }
}

/// `None` means the token fired while waiting.
fn next_key<Term: Terminal + ?Sized>(
    term: &mut Term,
    cancel: Option<&CancelToken>,
) -> Result<Option<KeyEvent>> {
    let Some(token) = cancel else {
        return Ok(Some(term.read_key()?));
    };
    loop {
        let key = term.poll_key(POLL_INTERVAL)?;
        if token.is_cancelled() {
            return Ok(None);
        }
        if key.is_some() {
            return Ok(key);
        }
    }
}
