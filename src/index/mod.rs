//! Text index and keyword search
//!
//! The index maps each successfully crawled URL to the plain text extracted
//! from it, preserving insertion order so search results come back in the
//! order pages were indexed.

use indexmap::map::Entry;
use indexmap::IndexMap;

/// Insertion-ordered mapping of URL to extracted page text
#[derive(Debug, Clone, Default)]
pub struct TextIndex {
    pages: IndexMap<String, String>,
}

impl TextIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the text for `url`
    ///
    /// The first write for a URL wins. Returns `false` and leaves the
    /// existing text in place if `url` was already indexed.
    pub fn insert(&mut self, url: impl Into<String>, text: impl Into<String>) -> bool {
        match self.pages.entry(url.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(text.into());
                true
            }
        }
    }

    /// Returns the indexed text for `url`
    pub fn get(&self, url: &str) -> Option<&str> {
        self.pages.get(url).map(String::as_str)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.pages.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Indexed URLs in insertion order
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    /// Finds every indexed URL whose text contains `keyword`
    ///
    /// Matching is a case-insensitive substring test. Results follow
    /// insertion order. An empty keyword is a substring of every text and
    /// therefore matches every indexed page.
    ///
    /// # Example
    ///
    /// ```
    /// use sitegrep::index::TextIndex;
    ///
    /// let mut index = TextIndex::new();
    /// index.insert("u1", "Hello World");
    /// index.insert("u2", "goodbye");
    ///
    /// assert_eq!(index.search("WORLD"), vec!["u1".to_string()]);
    /// assert!(index.search("xyz").is_empty());
    /// ```
    pub fn search(&self, keyword: &str) -> Vec<String> {
        let needle = keyword.to_lowercase();

        self.pages
            .iter()
            .filter(|(_, text)| text.to_lowercase().contains(&needle))
            .map(|(url, _)| url.clone())
            .collect()
    }
}
