//! Shared fakes for storefront integration tests

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::sync::{Arc, Mutex};
use std::time::Duration;
use storefront::api::ApiFuture;
use storefront::cart::{Purchase, PurchaseRequest};
use storefront::session::{AUTH_TOKEN_KEY, TENANT_ID_KEY, USER_ID_KEY};
use storefront::{
    ApiError, CartItem, ClientStorage, MemoryStorage, PurchaseApi, SearchApi, SessionCredentials,
    Storefront, Suggestion,
};
use storefront_testing::test_clock;

/// Search fake that records every query it receives
#[derive(Default)]
pub struct RecordingSearch {
    queries: Mutex<Vec<String>>,
    latency: Duration,
    failure: Option<ApiError>,
}

impl RecordingSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer after `latency` of (tokio) time
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// Fail every request with `error`
    pub fn failing(error: ApiError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl SearchApi for RecordingSearch {
    fn search(&self, query: String, _token: String) -> ApiFuture<'_, Vec<Suggestion>> {
        self.queries.lock().unwrap().push(query.clone());
        let latency = self.latency;
        let failure = self.failure.as_ref().map(|error| match error {
            ApiError::Status { status, message } => ApiError::Status {
                status: *status,
                message: message.clone(),
            },
            other => ApiError::RequestFailed(other.to_string()),
        });

        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            match failure {
                Some(error) => Err(error),
                None => Ok(vec![Suggestion::new(
                    format!("Course about {query}"),
                    format!("C-{query}"),
                )]),
            }
        })
    }
}

/// Purchases fake that records requests and can fail at a given position
#[derive(Default)]
pub struct ScriptedPurchases {
    requests: Mutex<Vec<PurchaseRequest>>,
    fail_at: Option<usize>,
    failure_message: String,
    owned: Vec<&'static str>,
}

impl ScriptedPurchases {
    pub fn succeeding() -> Self {
        Self::default()
    }

    /// Reject the `index`-th request (0-based) with `message`
    pub fn failing_at(index: usize, message: &str) -> Self {
        Self {
            fail_at: Some(index),
            failure_message: message.to_string(),
            ..Self::default()
        }
    }

    pub fn owning(ids: Vec<&'static str>) -> Self {
        Self {
            owned: ids,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<PurchaseRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl PurchaseApi for ScriptedPurchases {
    fn purchase(
        &self,
        request: PurchaseRequest,
        session: SessionCredentials,
    ) -> ApiFuture<'_, Purchase> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };

        let result = if self.fail_at == Some(index) {
            Err(ApiError::Status {
                status: 402,
                message: self.failure_message.clone(),
            })
        } else {
            Ok(Purchase {
                tenant_id: session.tenant_id,
                order_id: format!("ORD-{}", index + 1),
                user_id: request.user_id,
                course_id: request.course_id,
                quantity: request.quantity,
                price: request.price,
                timestamp: "2025-01-01T00:00:00Z".to_string(),
            })
        };

        Box::pin(async move { result })
    }

    fn list_purchases(&self, _session: SessionCredentials) -> ApiFuture<'_, Vec<Purchase>> {
        let purchases = self
            .owned
            .iter()
            .map(|id| Purchase {
                course_id: (*id).into(),
                ..Purchase::default()
            })
            .collect();
        Box::pin(async move { Ok(purchases) })
    }
}

pub const DEBOUNCE: Duration = Duration::from_millis(300);

pub fn sign_in(storage: &MemoryStorage) {
    storage.set_item(AUTH_TOKEN_KEY, "secret-token").unwrap();
    storage.set_item(TENANT_ID_KEY, "udemy").unwrap();
    storage.set_item(USER_ID_KEY, "user-1").unwrap();
}

pub fn storefront(
    storage: Arc<MemoryStorage>,
    search: Arc<RecordingSearch>,
    purchases: Arc<ScriptedPurchases>,
) -> Storefront {
    Storefront::new(storage, search, purchases, Arc::new(test_clock()), DEBOUNCE)
}

pub fn course(id: &str, price: f64) -> CartItem {
    CartItem::new(id, format!("Course {id}"), price)
}
