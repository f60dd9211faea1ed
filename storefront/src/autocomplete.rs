//! Search box with autocomplete dropdown.
//!
//! Ties the typed query to the suggestion fetcher, shows recent searches while
//! the input is empty and handles keyboard navigation over the dropdown.

use crate::app::SuggestionFetcher;
use crate::recent::RecentSearches;
use crate::search::MIN_QUERY_CHARS;
use crate::selection::{Highlight, Navigation, NavigationKey, SearchSelection, visible_entries};
use storefront_runtime::StoreError;

/// Autocomplete input state
pub struct Autocomplete {
    fetcher: SuggestionFetcher,
    recent: RecentSearches,
    query: String,
    highlight: Highlight,
    open: bool,
}

impl Autocomplete {
    /// Create an empty search box
    #[must_use]
    pub fn new(fetcher: SuggestionFetcher, recent: RecentSearches) -> Self {
        Self {
            fetcher,
            recent,
            query: String::new(),
            highlight: Highlight::default(),
            open: false,
        }
    }

    /// Text in the input
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the dropdown is shown
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Highlighted dropdown index
    #[must_use]
    pub const fn highlighted(&self) -> Option<usize> {
        self.highlight.index()
    }

    /// Recent searches
    #[must_use]
    pub const fn recent(&self) -> &RecentSearches {
        &self.recent
    }

    /// The input changed
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the fetcher has shut down.
    pub async fn input(&mut self, value: impl Into<String>) -> Result<(), StoreError> {
        self.query = value.into();
        self.highlight.reset();

        let trimmed = self.query.trim();
        self.fetcher.search_suggestions(trimmed).await?;

        if trimmed.chars().count() >= MIN_QUERY_CHARS {
            self.open = true;
        } else {
            self.fetcher.clear_suggestions().await?;
            self.open = trimmed.is_empty();
        }
        Ok(())
    }

    /// Entries currently shown in the dropdown
    pub async fn entries(&self) -> Vec<SearchSelection> {
        let suggestions = self.fetcher.suggestions().await;
        visible_entries(&self.query, self.recent.entries(), &suggestions)
    }

    /// A key was pressed in the input; returns where to go, if anywhere
    pub async fn key_down(&mut self, key: NavigationKey) -> Option<Navigation> {
        if !self.open {
            return None;
        }

        match key {
            NavigationKey::ArrowDown => {
                let len = self.entries().await.len();
                self.highlight.move_down(len);
                None
            },
            NavigationKey::ArrowUp => {
                let len = self.entries().await.len();
                self.highlight.move_up(len);
                None
            },
            NavigationKey::Enter => match self.highlight.index() {
                Some(index) => {
                    let selected = self.entries().await.into_iter().nth(index)?;
                    Some(self.select(selected))
                },
                None => {
                    let query = self.query.clone();
                    self.submit(&query)
                },
            },
            NavigationKey::Escape => {
                self.close();
                None
            },
        }
    }

    /// An entry was chosen
    pub fn select(&mut self, selection: SearchSelection) -> Navigation {
        self.query = selection.label().to_string();
        self.close();
        if let SearchSelection::RecentQuery(query) = &selection {
            self.recent.record(query);
        }
        selection.navigation()
    }

    /// Run a full search for `query`; blank queries do nothing
    pub fn submit(&mut self, query: &str) -> Option<Navigation> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.recent.record(query);
        self.close();
        Some(Navigation::Search(query.to_string()))
    }

    /// Forget a recent search
    pub fn remove_recent(&mut self, query: &str) -> bool {
        self.recent.remove(query)
    }

    fn close(&mut self) {
        self.open = false;
        self.highlight.reset();
    }
}
