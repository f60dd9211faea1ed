//! Shopping cart: the single source of truth for what the shopper intends to buy.
//!
//! The cart is a reducer driven by a [`Store`](storefront_runtime::Store).
//! Items are unique by course id, derived totals are recomputed on every
//! mutation, and the item list is written through to client storage.

pub mod checkout;
pub mod persistence;
pub mod reducer;
pub mod types;

pub use checkout::purchase_all;
pub use persistence::CartPersistence;
pub use reducer::{CartEnvironment, CartReducer};
pub use types::{
    CartAction, CartItem, CartState, CheckoutStatus, CourseId, Purchase, PurchaseReceipt,
    PurchaseRequest,
};
