//! Cart reducer.

use super::checkout::purchase_all;
use super::persistence::CartPersistence;
use super::types::{CartAction, CartItem, CartState, CheckoutStatus, CourseId};
use crate::api::PurchaseApi;
use crate::error::CheckoutError;
use crate::session::CredentialStore;
use std::collections::HashSet;
use std::sync::Arc;
use storefront_core::effect::Effect;
use storefront_core::environment::Clock;
use storefront_core::reducer::Reducer;
use storefront_core::{SmallVec, async_effect, smallvec};

/// Dependencies of the cart reducer
#[derive(Clone)]
pub struct CartEnvironment {
    /// Write-through storage of the item list
    pub persistence: CartPersistence,
    /// Purchases service used by checkout
    pub purchases: Arc<dyn PurchaseApi>,
    /// Session credentials for checkout
    pub credentials: CredentialStore,
    /// Clock for receipt numbers
    pub clock: Arc<dyn Clock>,
}

/// Reducer for [`CartState`].
///
/// Every action that changes `items` recomputes the derived fields, bumps the
/// revision and returns a fire-and-forget write of the full item list.
#[derive(Clone, Debug, Default)]
pub struct CartReducer;

impl CartReducer {
    /// Create a cart reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn commit(state: &mut CartState, env: &CartEnvironment) -> Effect<CartAction> {
        state.recompute();
        state.revision += 1;

        let persistence = env.persistence.clone();
        let revision = state.revision;
        let items = state.items.clone();
        async_effect! {
            persistence.save(revision, &items);
            None
        }
    }

    fn sanitize(items: Vec<CartItem>) -> Vec<CartItem> {
        let mut seen = HashSet::new();
        items
            .into_iter()
            .filter(|item| {
                if !item.has_valid_price() {
                    tracing::warn!(course_id = %item.course_id, "Dropping stored item with invalid price");
                    return false;
                }
                seen.insert(item.course_id.clone())
            })
            .collect()
    }
}

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;
    type Environment = CartEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CartAction::AddItem { item } => {
                if !item.has_valid_price() {
                    tracing::warn!(course_id = %item.course_id, price = item.price, "Rejected item with invalid price");
                    return smallvec![Effect::None];
                }
                if state.contains(&item.course_id) {
                    tracing::debug!(course_id = %item.course_id, "Course already in cart");
                    return smallvec![Effect::None];
                }

                tracing::debug!(course_id = %item.course_id, "Adding course to cart");
                state.items.push(item);
                smallvec![Self::commit(state, env)]
            },

            CartAction::RemoveItem { course_id } => {
                if !state.contains(&course_id) {
                    return smallvec![Effect::None];
                }

                tracing::debug!(%course_id, "Removing course from cart");
                state.items.retain(|item| item.course_id != course_id);
                smallvec![Self::commit(state, env)]
            },

            CartAction::ClearCart => {
                state.items.clear();
                smallvec![Self::commit(state, env)]
            },

            CartAction::LoadCart { items } => {
                state.items = Self::sanitize(items);
                tracing::debug!(items = state.items.len(), "Cart loaded");
                smallvec![Self::commit(state, env)]
            },

            CartAction::Rehydrate => {
                let persistence = env.persistence.clone();
                smallvec![async_effect! {
                    persistence.load().map(|items| CartAction::LoadCart { items })
                }]
            },

            CartAction::Checkout => {
                if state.is_empty() || state.checkout == CheckoutStatus::Processing {
                    return smallvec![Effect::None];
                }

                let session = match env.credentials.session() {
                    Ok(session) => session,
                    Err(error) => {
                        tracing::warn!(%error, "Checkout attempted without a session");
                        state.checkout = CheckoutStatus::Failed {
                            error: CheckoutError::MissingSession.to_string(),
                        };
                        return smallvec![Effect::None];
                    },
                };

                state.checkout = CheckoutStatus::Processing;

                let items = state.items.clone();
                let api = Arc::clone(&env.purchases);
                let clock = Arc::clone(&env.clock);
                smallvec![async_effect! {
                    match purchase_all(api.as_ref(), &session, &items, clock.as_ref()).await {
                        Ok(receipt) => Some(CartAction::CheckoutSucceeded {
                            receipt,
                            purchased: items.into_iter().map(|item| item.course_id).collect(),
                        }),
                        Err(error) => Some(CartAction::CheckoutFailed {
                            error: error.to_string(),
                        }),
                    }
                }]
            },

            CartAction::CheckoutSucceeded { receipt, purchased } => {
                tracing::info!(
                    order_number = %receipt.order_number,
                    amount = receipt.amount,
                    courses = purchased.len(),
                    "Checkout completed"
                );
                let purchased: HashSet<CourseId> = purchased.into_iter().collect();
                state.items.retain(|item| !purchased.contains(&item.course_id));
                state.checkout = CheckoutStatus::Completed { receipt };
                smallvec![Self::commit(state, env)]
            },

            CartAction::CheckoutFailed { error } => {
                state.checkout = CheckoutStatus::Failed { error };
                smallvec![Effect::None]
            },

            CartAction::DismissCheckout => {
                if state.checkout != CheckoutStatus::Processing {
                    state.checkout = CheckoutStatus::Idle;
                }
                smallvec![Effect::None]
            },
        }
    }
}
