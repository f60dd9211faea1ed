//! What the shopper picked from the autocomplete dropdown, and where it leads.

use crate::cart::CourseId;
use crate::search::Suggestion;

/// An entry in the autocomplete dropdown
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchSelection {
    /// A previous search, re-run as a search
    RecentQuery(String),
    /// A course hit, opened directly
    Suggestion(Suggestion),
}

impl SearchSelection {
    /// Where choosing this entry leads
    #[must_use]
    pub fn navigation(&self) -> Navigation {
        match self {
            Self::RecentQuery(query) => Navigation::Search(query.clone()),
            Self::Suggestion(suggestion) => Navigation::Course(suggestion.course_id.clone()),
        }
    }

    /// Text shown in the input after choosing this entry
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::RecentQuery(query) => query,
            Self::Suggestion(suggestion) => &suggestion.name,
        }
    }
}

/// Destination after a selection or submit
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Course detail page
    Course(CourseId),
    /// Search results for a query
    Search(String),
}

/// Keys the dropdown reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationKey {
    /// Highlight the next entry
    ArrowDown,
    /// Highlight the previous entry
    ArrowUp,
    /// Choose the highlighted entry, or search the typed query
    Enter,
    /// Close the dropdown
    Escape,
}

/// Highlighted position in a list of `len` entries.
///
/// Moving down past the last entry wraps to "nothing highlighted"; moving up
/// from nothing wraps to the last entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Highlight(Option<usize>);

impl Highlight {
    /// Highlighted index, if any
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        self.0
    }

    /// Clear the highlight
    pub fn reset(&mut self) {
        self.0 = None;
    }

    /// ArrowDown
    pub fn move_down(&mut self, len: usize) {
        self.0 = match self.0 {
            None if len > 0 => Some(0),
            Some(i) if i + 1 < len => Some(i + 1),
            _ => None,
        };
    }

    /// ArrowUp
    pub fn move_up(&mut self, len: usize) {
        self.0 = match self.0 {
            Some(0) => None,
            Some(i) => Some((i - 1).min(len.saturating_sub(1))),
            None => len.checked_sub(1),
        };
    }
}

/// Entries shown for `query`: recent searches while empty, suggestions otherwise
#[must_use]
pub fn visible_entries(
    query: &str,
    recent: &[String],
    suggestions: &[Suggestion],
) -> Vec<SearchSelection> {
    if query.is_empty() {
        recent
            .iter()
            .cloned()
            .map(SearchSelection::RecentQuery)
            .collect()
    } else {
        suggestions
            .iter()
            .cloned()
            .map(SearchSelection::Suggestion)
            .collect()
    }
}
