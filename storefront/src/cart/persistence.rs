//! Write-through persistence of the cart item list.

use super::types::CartItem;
use crate::storage::{CART_KEY, ClientStorage, load_json, save_json};
use std::sync::{Arc, Mutex};

/// Reads and writes the cart under the `cart` storage key.
///
/// Writes are best-effort: failures are logged and the cart keeps working in
/// memory. Each write carries the state revision it was taken from; a write
/// older than the last one stored is skipped, so concurrently running save
/// tasks always leave the newest item list behind.
#[derive(Clone)]
pub struct CartPersistence {
    storage: Arc<dyn ClientStorage>,
    written: Arc<Mutex<u64>>,
}

impl CartPersistence {
    /// Persist through `storage`
    #[must_use]
    pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
        Self {
            storage,
            written: Arc::new(Mutex::new(0)),
        }
    }

    /// The persisted item list, or `None` if absent or unreadable
    #[must_use]
    pub fn load(&self) -> Option<Vec<CartItem>> {
        match load_json::<Vec<CartItem>>(self.storage.as_ref(), CART_KEY) {
            Ok(items) => items,
            Err(error) => {
                tracing::warn!(%error, "Stored cart is unreadable, starting empty");
                None
            },
        }
    }

    /// Overwrite the stored item list with the state at `revision`
    pub fn save(&self, revision: u64, items: &[CartItem]) {
        let Ok(mut written) = self.written.lock() else {
            tracing::warn!(revision, "Cart persistence lock poisoned, skipping write");
            return;
        };

        if revision < *written {
            tracing::debug!(revision, latest = *written, "Skipping stale cart write");
            return;
        }

        match save_json(self.storage.as_ref(), CART_KEY, items) {
            Ok(()) => {
                *written = revision;
                tracing::trace!(revision, items = items.len(), "Cart persisted");
            },
            Err(error) => {
                tracing::warn!(revision, %error, "Failed to persist cart");
            },
        }
    }
}

impl std::fmt::Debug for CartPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartPersistence").finish_non_exhaustive()
    }
}
