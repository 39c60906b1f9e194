//! Candidate store: the full, ordered list of selectable items together with
//! the functions used to display and match them.

use std::fmt;

/// Turns a candidate into the text shown for it.
pub type Converter<T> = Box<dyn Fn(&T) -> String>;

/// Decides whether a candidate belongs in the view for a query.
pub type Comparer<T> = Box<dyn Fn(&T, &str) -> bool>;

/// Insertion-ordered candidates. Identity is the index into `items`.
pub struct Candidates<T> {
    items: Vec<T>,
    converter: Converter<T>,
    comparer: Option<Comparer<T>>,
}

impl<T> Candidates<T> {
    /// A store whose comparer is the default case-sensitive prefix match.
    pub fn new(items: Vec<T>, converter: Converter<T>) -> Self {
        Self {
            items,
            converter,
            comparer: None,
        }
    }

    pub fn with_comparer(mut self, comparer: Comparer<T>) -> Self {
        self.comparer = Some(comparer);
        self
    }

    pub fn add_choice(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn add_choices(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.extend(items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_at(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Move the candidate at `index` out of the store, consuming it.
    pub fn into_item(mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.swap_remove(index))
        } else {
            None
        }
    }

    /// Display text for the candidate at `index`.
    ///
    /// Panics if `index` is out of range; indices come from this store's own
    /// filtered views.
    pub fn display(&self, index: usize) -> String {
        (self.converter)(&self.items[index])
    }

    pub fn matches(&self, index: usize, query: &str) -> bool {
        let item = &self.items[index];
        match &self.comparer {
            Some(comparer) => comparer(item, query),
            None => (self.converter)(item).starts_with(query),
        }
    }
}

impl<T> fmt::Debug for Candidates<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidates")
            .field("len", &self.items.len())
            .field("custom_comparer", &self.comparer.is_some())
            .finish()
    }
}

/// Converter for any `Display` type.
pub fn display_converter<T: fmt::Display + 'static>() -> Converter<T> {
    Box::new(|item: &T| item.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit() -> Candidates<&'static str> {
        Candidates::new(vec!["apple", "Apricot", "banana"], display_converter())
    }

    #[test]
    fn default_comparer_is_case_sensitive_prefix() {
        let store = fruit();
        assert!(store.matches(0, "ap"));
        assert!(!store.matches(1, "ap"));
        assert!(store.matches(1, "Ap"));
        assert!(!store.matches(2, "an"));
        assert!(store.matches(2, ""));
    }

    #[test]
    fn custom_comparer_replaces_prefix_match() {
        let store = fruit().with_comparer(Box::new(|item: &&str, query: &str| {
            item.to_lowercase().contains(&query.to_lowercase())
        }));
        assert!(store.matches(1, "rico"));
        assert!(store.matches(2, "NAN"));
    }

    #[test]
    fn add_choice_preserves_insertion_order() {
        let mut store = Candidates::new(Vec::new(), display_converter::<u32>());
        store.add_choice(3);
        store.add_choices([1, 2]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.display(0), "3");
        assert_eq!(store.display(2), "2");
        assert_eq!(store.into_item(1), Some(1));
    }

    #[test]
    fn converter_controls_display_text() {
        struct Host {
            name: &'static str,
            port: u16,
        }
        let store = Candidates::new(
            vec![Host {
                name: "db",
                port: 5432,
            }],
            Box::new(|h: &Host| format!("{}:{}", h.name, h.port)),
        );
        assert_eq!(store.display(0), "db:5432");
        assert!(store.matches(0, "db:5"));
        assert_eq!(store.item_at(0).map(|h| h.port), Some(5432));
    }
}
