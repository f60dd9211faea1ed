//! # Storefront
//!
//! Client-side core of a course marketplace storefront.
//!
//! Two features carry the state the UI renders:
//!
//! - **Cart** ([`CartStore`]): unique-by-course item list with derived total
//!   and count, written through to client storage and rehydrated on start.
//! - **Suggestions** ([`SuggestionFetcher`]): trailing-debounced autocomplete
//!   against the search service, exposing results, loading flag and error.
//!
//! Around them sit recent searches, keyboard selection in the dropdown,
//! sequential checkout against the purchases service and the purchased-course
//! lookup. Each feature is a reducer run by a
//! [`Store`](storefront_runtime::Store).
//!
//! ## Example
//!
//! ```ignore
//! use storefront::{CartItem, Storefront, StorefrontConfig};
//!
//! let storefront = Storefront::from_config(&StorefrontConfig::from_env()?)?;
//! storefront.start().await?;
//!
//! storefront.cart().add_item(CartItem::new("C1", "Rust", 50.0)).await?;
//! storefront.suggestions().search_suggestions("rus").await?;
//! ```

pub mod api;
pub mod app;
pub mod autocomplete;
pub mod cart;
pub mod config;
pub mod error;
pub mod purchases;
pub mod recent;
pub mod search;
pub mod selection;
pub mod session;
pub mod storage;

pub use api::{HttpStorefrontApi, PurchaseApi, SearchApi};
pub use app::{CartStore, Storefront, SuggestionFetcher};
pub use autocomplete::Autocomplete;
pub use cart::{CartItem, CartState, CheckoutStatus, CourseId, PurchaseReceipt};
pub use config::StorefrontConfig;
pub use error::{ApiError, CheckoutError, ConfigError, StorageError};
pub use purchases::PurchasedCourses;
pub use recent::RecentSearches;
pub use search::{Suggestion, SuggestionPhase, SuggestionState};
pub use selection::{Navigation, NavigationKey, SearchSelection};
pub use session::{CredentialStore, SessionCredentials};
pub use storage::{ClientStorage, FileStorage, MemoryStorage};
