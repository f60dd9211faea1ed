//! Sequential checkout against the purchases service.

use super::types::{CartItem, Purchase, PurchaseReceipt, PurchaseRequest};
use crate::api::PurchaseApi;
use crate::error::{ApiError, CheckoutError};
use crate::session::SessionCredentials;
use storefront_core::environment::Clock;

/// Shown when the service rejects a purchase without a message
pub const DEFAULT_PURCHASE_ERROR: &str = "Purchase failed";

/// Purchase every item, one request at a time, in cart order.
///
/// Stops at the first failure. Items before the failing one stay purchased on
/// the service side; there is no rollback.
///
/// # Errors
///
/// Returns [`CheckoutError::PurchaseFailed`] naming the course that failed.
pub async fn purchase_all(
    api: &dyn PurchaseApi,
    session: &SessionCredentials,
    items: &[CartItem],
    clock: &dyn Clock,
) -> Result<PurchaseReceipt, CheckoutError> {
    let mut purchases = Vec::with_capacity(items.len());

    for item in items {
        let request = PurchaseRequest::for_item(&session.user_id, item);
        match api.purchase(request, session.clone()).await {
            Ok(purchase) => purchases.push(purchase),
            Err(error) => {
                tracing::warn!(
                    course_id = %item.course_id,
                    completed = purchases.len(),
                    %error,
                    "Purchase failed, aborting checkout"
                );
                return Err(CheckoutError::PurchaseFailed {
                    course_id: item.course_id.to_string(),
                    message: failure_message(&error),
                });
            },
        }
    }

    Ok(build_receipt(items, purchases, clock))
}

/// User-facing message for a failed purchase
#[must_use]
pub fn failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
        _ => DEFAULT_PURCHASE_ERROR.to_string(),
    }
}

/// Summarize a completed checkout
#[must_use]
pub fn build_receipt(
    items: &[CartItem],
    purchases: Vec<Purchase>,
    clock: &dyn Clock,
) -> PurchaseReceipt {
    let (course_name, course_id) = match items {
        [single] => (single.name.clone(), single.course_id.to_string()),
        _ => (format!("{} courses", items.len()), "multiple".to_string()),
    };

    let order_number = purchases
        .first()
        .map(|p| p.order_id.clone())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| format!("MULTI-{}", clock.now().timestamp_millis()));

    PurchaseReceipt {
        course_name,
        course_id,
        order_number,
        amount: items.iter().map(|item| item.price).sum(),
        purchases,
    }
}
