//! Application wiring: stores for each feature and the root that owns them.

use crate::api::{HttpStorefrontApi, PurchaseApi, SearchApi};
use crate::autocomplete::Autocomplete;
use crate::cart::{
    CartAction, CartEnvironment, CartItem, CartPersistence, CartReducer, CartState,
    CheckoutStatus, CourseId,
};
use crate::config::StorefrontConfig;
use crate::error::ConfigError;
use crate::purchases::PurchasedCourses;
use crate::recent::RecentSearches;
use crate::search::{SearchAction, SearchEnvironment, Suggestion, SuggestionReducer, SuggestionState};
use crate::session::CredentialStore;
use crate::storage::{ClientStorage, FileStorage};
use std::sync::Arc;
use std::time::Duration;
use storefront_core::environment::{Clock, SystemClock};
use storefront_runtime::{EffectHandle, Store, StoreError};

/// Store running the cart reducer
pub type CartRuntime = Store<CartState, CartAction, CartEnvironment, CartReducer>;

/// Store running the suggestion reducer
pub type SuggestionRuntime = Store<SuggestionState, SearchAction, SearchEnvironment, SuggestionReducer>;

/// Handle to the shared cart.
///
/// Cloning is cheap; every clone sees the same cart. Mutations return once
/// the state has changed; the returned [`EffectHandle`] resolves when the
/// write-through to storage has finished.
#[derive(Clone)]
pub struct CartStore {
    store: CartRuntime,
}

impl CartStore {
    /// Create an empty cart. Call [`CartStore::rehydrate`] to restore a saved one.
    #[must_use]
    pub fn new(environment: CartEnvironment) -> Self {
        Self {
            store: Store::new(CartState::default(), CartReducer::new(), environment),
        }
    }

    /// Add a course unless it is already in the cart
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown.
    pub async fn add_item(&self, item: CartItem) -> Result<EffectHandle, StoreError> {
        self.store.send(CartAction::AddItem { item }).await
    }

    /// Remove a course; no-op if absent
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown.
    pub async fn remove_item(
        &self,
        course_id: impl Into<CourseId>,
    ) -> Result<EffectHandle, StoreError> {
        self.store
            .send(CartAction::RemoveItem {
                course_id: course_id.into(),
            })
            .await
    }

    /// Empty the cart
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown.
    pub async fn clear_cart(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(CartAction::ClearCart).await
    }

    /// Replace the whole item list
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown.
    pub async fn load_cart(&self, items: Vec<CartItem>) -> Result<EffectHandle, StoreError> {
        self.store.send(CartAction::LoadCart { items }).await
    }

    /// Restore the persisted cart and wait until it is loaded
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown.
    pub async fn rehydrate(&self) -> Result<(), StoreError> {
        let mut handle = self.store.send(CartAction::Rehydrate).await?;
        handle.wait().await;
        Ok(())
    }

    /// Purchase every item and wait for the outcome
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown.
    pub async fn checkout(&self) -> Result<CheckoutStatus, StoreError> {
        let mut handle = self.store.send(CartAction::Checkout).await?;
        handle.wait().await;
        Ok(self.store.state(|s| s.checkout.clone()).await)
    }

    /// Return a finished checkout to idle
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown.
    pub async fn dismiss_checkout(&self) -> Result<(), StoreError> {
        self.store.send(CartAction::DismissCheckout).await.map(|_| ())
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> CartState {
        self.store.state(Clone::clone).await
    }

    /// Items in insertion order
    pub async fn items(&self) -> Vec<CartItem> {
        self.store.state(|s| s.items.clone()).await
    }

    /// Sum of item prices
    pub async fn total(&self) -> f64 {
        self.store.state(|s| s.total).await
    }

    /// Number of items
    pub async fn item_count(&self) -> usize {
        self.store.state(|s| s.item_count).await
    }

    /// Underlying store
    #[must_use]
    pub const fn store(&self) -> &CartRuntime {
        &self.store
    }
}

/// Handle to the debounced suggestion fetcher
#[derive(Clone)]
pub struct SuggestionFetcher {
    store: SuggestionRuntime,
}

impl SuggestionFetcher {
    /// Create an idle fetcher
    #[must_use]
    pub fn new(environment: SearchEnvironment) -> Self {
        Self {
            store: Store::new(SuggestionState::default(), SuggestionReducer::new(), environment),
        }
    }

    /// Schedule a fetch for `query` after the quiet period
    ///
    /// Short queries clear the results immediately instead.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown.
    pub async fn search_suggestions(
        &self,
        query: impl Into<String>,
    ) -> Result<EffectHandle, StoreError> {
        self.store
            .send(SearchAction::SearchSuggestions {
                query: query.into(),
            })
            .await
    }

    /// Empty results and error; a pending fetch still fires
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown.
    pub async fn clear_suggestions(&self) -> Result<(), StoreError> {
        self.store.send(SearchAction::ClearSuggestions).await.map(|_| ())
    }

    /// Current results
    pub async fn suggestions(&self) -> Vec<Suggestion> {
        self.store.state(|s| s.suggestions.clone()).await
    }

    /// Whether a request is in flight
    pub async fn is_loading(&self) -> bool {
        self.store.state(|s| s.is_loading).await
    }

    /// Error from the last attempt
    pub async fn error(&self) -> Option<String> {
        self.store.state(|s| s.error.clone()).await
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> SuggestionState {
        self.store.state(Clone::clone).await
    }

    /// Underlying store
    #[must_use]
    pub const fn store(&self) -> &SuggestionRuntime {
        &self.store
    }
}

/// Root of the storefront: one cart, one suggestion fetcher, shared storage.
#[derive(Clone)]
pub struct Storefront {
    storage: Arc<dyn ClientStorage>,
    credentials: CredentialStore,
    purchases: Arc<dyn PurchaseApi>,
    cart: CartStore,
    suggestions: SuggestionFetcher,
}

impl Storefront {
    /// Wire the storefront from its parts
    #[must_use]
    pub fn new(
        storage: Arc<dyn ClientStorage>,
        search: Arc<dyn SearchApi>,
        purchases: Arc<dyn PurchaseApi>,
        clock: Arc<dyn Clock>,
        debounce: Duration,
    ) -> Self {
        let credentials = CredentialStore::new(Arc::clone(&storage));

        let cart = CartStore::new(CartEnvironment {
            persistence: CartPersistence::new(Arc::clone(&storage)),
            purchases: Arc::clone(&purchases),
            credentials: credentials.clone(),
            clock,
        });

        let suggestions = SuggestionFetcher::new(SearchEnvironment {
            api: search,
            credentials: credentials.clone(),
            debounce,
        });

        Self {
            storage,
            credentials,
            purchases,
            cart,
            suggestions,
        }
    }

    /// Build a storefront backed by file storage and the HTTP services
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory or HTTP client cannot be set up.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, ConfigError> {
        let storage = Arc::new(FileStorage::open(config.storage_dir.clone())?);
        let api = Arc::new(HttpStorefrontApi::from_config(config)?);

        Ok(Self::new(
            storage,
            Arc::clone(&api) as Arc<dyn SearchApi>,
            api,
            Arc::new(SystemClock),
            config.debounce(),
        ))
    }

    /// Restore persisted state
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown.
    pub async fn start(&self) -> Result<(), StoreError> {
        self.cart.rehydrate().await?;
        tracing::info!(items = self.cart.item_count().await, "Storefront started");
        Ok(())
    }

    /// The cart
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// The suggestion fetcher
    #[must_use]
    pub const fn suggestions(&self) -> &SuggestionFetcher {
        &self.suggestions
    }

    /// Stored session credentials
    #[must_use]
    pub const fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Recent searches as currently stored
    #[must_use]
    pub fn recent_searches(&self) -> RecentSearches {
        RecentSearches::load(Arc::clone(&self.storage))
    }

    /// A fresh autocomplete box over the shared fetcher
    #[must_use]
    pub fn autocomplete(&self) -> Autocomplete {
        Autocomplete::new(self.suggestions.clone(), self.recent_searches())
    }

    /// Courses the signed-in user already owns
    pub async fn purchased_courses(&self) -> PurchasedCourses {
        PurchasedCourses::fetch(self.purchases.as_ref(), &self.credentials).await
    }

    /// Stop accepting actions and wait for pending effects
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
    /// after `timeout`.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        let (cart, suggestions) = tokio::join!(
            self.cart.store().shutdown(timeout),
            self.suggestions.store().shutdown(timeout),
        );
        cart.and(suggestions)
    }
}
