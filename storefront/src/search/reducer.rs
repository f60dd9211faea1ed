//! Debounced suggestion reducer.
//!
//! Trailing debounce is expressed with effects: every accepted query cancels
//! the pending timer and schedules `DebounceElapsed` under [`DEBOUNCE_EFFECT_ID`].
//! The generation carried by the timer guards against a timer that fired just
//! before it was cancelled.

use super::types::{
    CONNECTION_ERROR, FETCH_FAILED_ERROR, MIN_QUERY_CHARS, MISSING_TOKEN_ERROR, SearchAction,
    Suggestion, SuggestionPhase, SuggestionState,
};
use crate::api::SearchApi;
use crate::session::CredentialStore;
use std::sync::Arc;
use std::time::Duration;
use storefront_core::effect::{Effect, EffectId};
use storefront_core::reducer::Reducer;
use storefront_core::{SmallVec, async_effect, debounce, smallvec};

/// Registration id of the pending debounce timer
pub const DEBOUNCE_EFFECT_ID: &str = "suggestions.debounce";

/// Default quiet period
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Dependencies of the suggestion reducer
#[derive(Clone)]
pub struct SearchEnvironment {
    /// Search service
    pub api: Arc<dyn SearchApi>,
    /// Source of the bearer credential
    pub credentials: CredentialStore,
    /// Quiet period before a fetch fires
    pub debounce: Duration,
}

/// Reducer for [`SuggestionState`]
#[derive(Clone, Debug, Default)]
pub struct SuggestionReducer;

impl SuggestionReducer {
    /// Create a suggestion reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn finish_fetch(state: &mut SuggestionState) {
        state.in_flight = state.in_flight.saturating_sub(1);
        state.is_loading = state.in_flight > 0;
        if state.in_flight == 0 && matches!(state.phase, SuggestionPhase::Fetching { .. }) {
            state.phase = SuggestionPhase::Idle;
        }
    }

    fn fetch(api: Arc<dyn SearchApi>, query: String, token: String) -> Effect<SearchAction> {
        async_effect! {
            match api.search(query.clone(), token).await {
                Ok(suggestions) => Some(SearchAction::SuggestionsLoaded { query, suggestions }),
                Err(error) => {
                    tracing::warn!(%query, %error, "Suggestion fetch failed");
                    let message = if error.is_status() {
                        FETCH_FAILED_ERROR
                    } else {
                        CONNECTION_ERROR
                    };
                    Some(SearchAction::SuggestionsFailed {
                        query,
                        error: message.to_string(),
                    })
                },
            }
        }
    }
}

impl Reducer for SuggestionReducer {
    type State = SuggestionState;
    type Action = SearchAction;
    type Environment = SearchEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SearchAction::SearchSuggestions { query } => {
                let query = query.trim();

                if query.chars().count() < MIN_QUERY_CHARS {
                    state.suggestions.clear();
                    if state.is_scheduled() {
                        tracing::debug!("Short query, dropping scheduled fetch");
                        state.phase = SuggestionPhase::Idle;
                    }
                    return smallvec![Effect::Cancel(EffectId::new(DEBOUNCE_EFFECT_ID))];
                }

                state.generation += 1;
                let generation = state.generation;
                tracing::debug!(query, generation, "Scheduling suggestion fetch");
                state.phase = SuggestionPhase::Scheduled {
                    query: query.to_string(),
                    generation,
                };

                smallvec![
                    Effect::Cancel(EffectId::new(DEBOUNCE_EFFECT_ID)),
                    debounce! {
                        id: DEBOUNCE_EFFECT_ID,
                        duration: env.debounce,
                        action: SearchAction::DebounceElapsed { generation }
                    },
                ]
            },

            SearchAction::ClearSuggestions => {
                state.suggestions.clear();
                state.error = None;
                smallvec![Effect::None]
            },

            SearchAction::DebounceElapsed { generation } => {
                let query = match &state.phase {
                    SuggestionPhase::Scheduled {
                        query,
                        generation: scheduled,
                    } if *scheduled == generation => query.clone(),
                    _ => {
                        tracing::trace!(generation, "Ignoring stale debounce timer");
                        return smallvec![Effect::None];
                    },
                };

                let token = match env.credentials.token() {
                    Ok(token) => token,
                    Err(error) => {
                        tracing::warn!(%error, "Skipping suggestion fetch");
                        state.error = Some(MISSING_TOKEN_ERROR.to_string());
                        state.phase = SuggestionPhase::Idle;
                        return smallvec![Effect::None];
                    },
                };

                state.error = None;
                state.in_flight += 1;
                state.is_loading = true;
                state.phase = SuggestionPhase::Fetching {
                    query: query.clone(),
                };

                smallvec![Self::fetch(Arc::clone(&env.api), query, token)]
            },

            SearchAction::SuggestionsLoaded { query, suggestions } => {
                tracing::debug!(%query, hits = suggestions.len(), "Suggestions loaded");
                Self::finish_fetch(state);
                state.suggestions = suggestions;
                smallvec![Effect::None]
            },

            SearchAction::SuggestionsFailed { query, error } => {
                tracing::debug!(%query, %error, "Suggestions failed");
                Self::finish_fetch(state);
                state.suggestions = Vec::<Suggestion>::new();
                state.error = Some(error);
                smallvec![Effect::None]
            },
        }
    }
}
