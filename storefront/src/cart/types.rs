//! Cart domain types: items, state, actions, and purchase records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Course identifier as issued by the catalog service
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(String);

impl CourseId {
    /// Create a course id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CourseId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One course selected for purchase.
///
/// Serialized with the catalog service's field names, which is also the
/// stored cart format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Unique key within the cart
    #[serde(rename = "curso_id")]
    pub course_id: CourseId,
    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,
    /// Price; must be finite and non-negative
    #[serde(rename = "precio")]
    pub price: f64,
    /// Cover image
    #[serde(rename = "imagen_url", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Instructor display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    /// Human-readable length, e.g. "12h"
    #[serde(rename = "duracion", default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Average rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl CartItem {
    /// Create an item with no optional details
    #[must_use]
    pub fn new(course_id: impl Into<CourseId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            course_id: course_id.into(),
            name: name.into(),
            price,
            image_url: None,
            instructor: None,
            duration: None,
            rating: None,
        }
    }

    /// Set the instructor
    #[must_use]
    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = Some(instructor.into());
        self
    }

    /// Set the cover image
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Whether the price can be summed into a cart total
    #[must_use]
    pub fn has_valid_price(&self) -> bool {
        self.price.is_finite() && self.price >= 0.0
    }
}

/// Progress of the checkout flow
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CheckoutStatus {
    /// Nothing in progress
    #[default]
    Idle,
    /// Purchase requests are being sent
    Processing,
    /// Every item was purchased
    Completed {
        /// Summary shown to the shopper
        receipt: PurchaseReceipt,
    },
    /// A purchase failed; remaining items were not attempted
    Failed {
        /// User-facing reason
        error: String,
    },
}

/// Cart state.
///
/// `total` and `item_count` are derived from `items` and recomputed by the
/// reducer after every mutation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CartState {
    /// Items in insertion order, unique by course id
    pub items: Vec<CartItem>,
    /// Sum of item prices
    pub total: f64,
    /// Number of items
    pub item_count: usize,
    /// Checkout progress
    pub checkout: CheckoutStatus,
    /// Bumped on every mutation; orders persistence writes
    pub revision: u64,
}

impl CartState {
    /// Whether an item with this course id is in the cart
    #[must_use]
    pub fn contains(&self, course_id: &CourseId) -> bool {
        self.items.iter().any(|item| &item.course_id == course_id)
    }

    /// Whether the cart is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Recompute derived fields from `items`
    pub fn recompute(&mut self) {
        self.total = self.items.iter().map(|item| item.price).sum();
        self.item_count = self.items.len();
    }
}

/// Inputs to the cart reducer
#[derive(Clone, Debug)]
pub enum CartAction {
    /// Add a course unless its id is already in the cart
    AddItem {
        /// Course to add
        item: CartItem,
    },
    /// Remove a course; no-op if absent
    RemoveItem {
        /// Course to remove
        course_id: CourseId,
    },
    /// Empty the cart
    ClearCart,
    /// Replace the whole item list (rehydration)
    LoadCart {
        /// Items read from storage
        items: Vec<CartItem>,
    },
    /// Read the persisted cart and load it
    Rehydrate,
    /// Purchase every item in the cart
    Checkout,
    /// Every purchase succeeded
    CheckoutSucceeded {
        /// Summary for the shopper
        receipt: PurchaseReceipt,
        /// Courses that were purchased
        purchased: Vec<CourseId>,
    },
    /// A purchase failed
    CheckoutFailed {
        /// User-facing reason
        error: String,
    },
    /// Acknowledge a finished checkout and return to idle
    DismissCheckout,
}

/// Body of a purchase request; one per course
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    /// Buyer
    pub user_id: String,
    /// Course being bought
    #[serde(rename = "curso_id")]
    pub course_id: CourseId,
    /// Always 1
    pub quantity: u32,
    /// Price at checkout time
    pub price: f64,
}

impl PurchaseRequest {
    /// Request for a single cart item
    #[must_use]
    pub fn for_item(user_id: &str, item: &CartItem) -> Self {
        Self {
            user_id: user_id.to_string(),
            course_id: item.course_id.clone(),
            quantity: 1,
            price: item.price,
        }
    }
}

/// Purchase record returned by the purchases service
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Purchase {
    /// Marketplace tenant
    pub tenant_id: String,
    /// Order reference
    pub order_id: String,
    /// Buyer
    pub user_id: String,
    /// Purchased course
    #[serde(rename = "curso_id")]
    pub course_id: CourseId,
    /// Units bought
    pub quantity: u32,
    /// Price charged
    pub price: f64,
    /// Service timestamp, kept as sent
    pub timestamp: String,
}

/// Summary of a completed checkout
#[derive(Clone, Debug, PartialEq)]
pub struct PurchaseReceipt {
    /// Item name, or "N courses"
    pub course_name: String,
    /// Item id, or "multiple"
    pub course_id: String,
    /// First order id, or `MULTI-<unix millis>`
    pub order_number: String,
    /// Cart total at checkout
    pub amount: f64,
    /// Records returned by the service, in cart order
    pub purchases: Vec<Purchase>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn cart_item_uses_catalog_field_names() {
        let item = CartItem::new("C1", "Rust", 50.0).with_instructor("Ferris");
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "curso_id": "C1",
                "nombre": "Rust",
                "precio": 50.0,
                "instructor": "Ferris"
            })
        );
    }

    #[test]
    fn cart_item_parses_stored_format() {
        let raw = r#"{"curso_id":"C9","nombre":"Go","precio":19.5,"duracion":"4h","rating":4.7}"#;
        let item: CartItem = serde_json::from_str(raw).unwrap();

        assert_eq!(item.course_id.as_str(), "C9");
        assert_eq!(item.duration.as_deref(), Some("4h"));
        assert_eq!(item.rating, Some(4.7));
        assert_eq!(item.image_url, None);
    }

    #[test]
    fn purchase_tolerates_missing_fields() {
        let purchase: Purchase = serde_json::from_str(r#"{"order_id":"O-1"}"#).unwrap();
        assert_eq!(purchase.order_id, "O-1");
        assert_eq!(purchase.quantity, 0);
    }

    #[test]
    fn invalid_prices_are_detected() {
        assert!(CartItem::new("C1", "a", 0.0).has_valid_price());
        assert!(!CartItem::new("C1", "a", -1.0).has_valid_price());
        assert!(!CartItem::new("C1", "a", f64::NAN).has_valid_price());
    }

    #[test]
    fn recompute_derives_total_and_count() {
        let mut state = CartState {
            items: vec![CartItem::new("C1", "a", 10.0), CartItem::new("C2", "b", 15.0)],
            ..CartState::default()
        };
        state.recompute();

        assert_eq!(state.total, 25.0);
        assert_eq!(state.item_count, 2);
    }
}
