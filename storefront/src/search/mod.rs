//! Debounced autocomplete suggestions.

pub mod reducer;
pub mod types;

pub use reducer::{DEBOUNCE_EFFECT_ID, DEFAULT_DEBOUNCE, SearchEnvironment, SuggestionReducer};
pub use types::{
    CONNECTION_ERROR, FETCH_FAILED_ERROR, MIN_QUERY_CHARS, MISSING_TOKEN_ERROR, SearchAction,
    Suggestion, SuggestionPhase, SuggestionState,
};
