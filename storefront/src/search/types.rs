//! Suggestion fetcher types.

use crate::cart::CourseId;
use serde::{Deserialize, Serialize};

/// Error shown when no credential is stored
pub const MISSING_TOKEN_ERROR: &str = "Authorization token not found";

/// Error shown when the search service answers with a non-success status
pub const FETCH_FAILED_ERROR: &str = "Failed to fetch suggestions";

/// Error shown when the request or response body fails
pub const CONNECTION_ERROR: &str = "Connection error";

/// Queries shorter than this (in characters) never reach the network
pub const MIN_QUERY_CHARS: usize = 2;

/// A lightweight search hit
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Display label
    #[serde(rename = "nombre")]
    pub name: String,
    /// Navigation target
    #[serde(rename = "curso_id")]
    pub course_id: CourseId,
}

impl Suggestion {
    /// Create a suggestion
    #[must_use]
    pub fn new(name: impl Into<String>, course_id: impl Into<CourseId>) -> Self {
        Self {
            name: name.into(),
            course_id: course_id.into(),
        }
    }
}

/// Where the fetcher is in its debounce cycle.
///
/// `Idle -> Scheduled -> Fetching -> Idle`. A new query while `Scheduled`
/// replaces the schedule with a fresh generation; a short query moves
/// `Scheduled` back to `Idle`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SuggestionPhase {
    /// No timer pending and no fetch for the latest query in flight
    #[default]
    Idle,
    /// Timer pending for `query`
    Scheduled {
        /// Query to fetch when the timer fires
        query: String,
        /// Identifies the pending timer
        generation: u64,
    },
    /// Request for `query` in flight
    Fetching {
        /// Query being fetched
        query: String,
    },
}

/// Suggestion fetcher state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SuggestionState {
    /// Latest results
    pub suggestions: Vec<Suggestion>,
    /// True only while a request is in flight, never during the quiet period
    pub is_loading: bool,
    /// User-facing error from the last fetch attempt
    pub error: Option<String>,
    /// Debounce cycle position
    pub phase: SuggestionPhase,
    /// Generation of the most recently scheduled timer
    pub generation: u64,
    /// Requests dispatched and not yet answered
    pub in_flight: usize,
}

impl SuggestionState {
    /// Whether a fetch timer is pending
    #[must_use]
    pub const fn is_scheduled(&self) -> bool {
        matches!(self.phase, SuggestionPhase::Scheduled { .. })
    }
}

/// Inputs to the suggestion reducer
#[derive(Clone, Debug)]
pub enum SearchAction {
    /// Debounced request for suggestions
    SearchSuggestions {
        /// Raw query text
        query: String,
    },
    /// Empty results and error; a pending timer is left alone
    ClearSuggestions,
    /// The quiet period for `generation` elapsed
    DebounceElapsed {
        /// Timer that fired
        generation: u64,
    },
    /// A fetch succeeded
    SuggestionsLoaded {
        /// Query the results belong to
        query: String,
        /// Results, empty if the service sent none
        suggestions: Vec<Suggestion>,
    },
    /// A fetch failed
    SuggestionsFailed {
        /// Query that failed
        query: String,
        /// User-facing error
        error: String,
    },
}
