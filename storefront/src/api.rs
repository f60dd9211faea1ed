//! Remote storefront services: search and purchases.
//!
//! Reducers talk to the services through the [`SearchApi`] and [`PurchaseApi`]
//! traits so tests can substitute recording fakes. [`HttpStorefrontApi`] is the
//! `reqwest` implementation used in production.

use crate::cart::{Purchase, PurchaseRequest};
use crate::config::StorefrontConfig;
use crate::error::{ApiError, ConfigError};
use crate::search::Suggestion;
use crate::session::SessionCredentials;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by the service traits
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Course search used for autocomplete
pub trait SearchApi: Send + Sync {
    /// Fetch suggestions matching `query`
    ///
    /// `token` is sent verbatim as the `Authorization` header.
    fn search(&self, query: String, token: String) -> ApiFuture<'_, Vec<Suggestion>>;
}

/// Purchase recording and lookup
pub trait PurchaseApi: Send + Sync {
    /// Record the purchase of one course
    fn purchase(
        &self,
        request: PurchaseRequest,
        session: SessionCredentials,
    ) -> ApiFuture<'_, Purchase>;

    /// List the signed-in user's purchases (first 100)
    fn list_purchases(&self, session: SessionCredentials) -> ApiFuture<'_, Vec<Purchase>>;
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    cursos: Vec<Suggestion>,
}

#[derive(Deserialize)]
struct PurchaseResponse {
    #[serde(default)]
    compra: Purchase,
}

#[derive(Deserialize)]
struct PurchaseListResponse {
    #[serde(default)]
    compras: Vec<Purchase>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for the catalog/search and purchase services
#[derive(Clone, Debug)]
pub struct HttpStorefrontApi {
    client: Client,
    search_url: String,
    purchase_url: String,
}

impl HttpStorefrontApi {
    /// Create a client with default `reqwest` settings
    #[must_use]
    pub fn new(search_url: impl Into<String>, purchase_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), search_url, purchase_url)
    }

    /// Create a client from configuration, applying the request timeout
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the TLS backend cannot be initialized.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self::with_client(
            client,
            &config.search_api_url,
            &config.purchase_api_url,
        ))
    }

    fn with_client(
        client: Client,
        search_url: impl Into<String>,
        purchase_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            search_url: search_url.into().trim_end_matches('/').to_string(),
            purchase_url: purchase_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `GET {search}/search?q=<query>`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for non-success responses and
    /// [`ApiError::RequestFailed`] / [`ApiError::ResponseParseFailed`] otherwise.
    pub async fn search(&self, query: &str, token: &str) -> Result<Vec<Suggestion>, ApiError> {
        let response = self
            .client
            .get(format!("{}/search", self.search_url))
            .query(&[("q", query)])
            .header("Authorization", token)
            .send()
            .await?;

        let body: SearchResponse = Self::read_json(response).await?;
        Ok(body.cursos)
    }

    /// `POST {purchase}/compras`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] carrying the service's `message` when the
    /// purchase is rejected.
    pub async fn purchase(
        &self,
        request: &PurchaseRequest,
        session: &SessionCredentials,
    ) -> Result<Purchase, ApiError> {
        tracing::debug!(course_id = %request.course_id, "Sending purchase");

        let response = self
            .client
            .post(format!("{}/compras", self.purchase_url))
            .header("Authorization", &session.token)
            .json(request)
            .send()
            .await?;

        let body: PurchaseResponse = Self::read_json(response).await?;
        Ok(body.compra)
    }

    /// `GET {search}/compras?tenant_id=..&user_id=..&limit=100`
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures and non-success responses.
    pub async fn list_purchases(
        &self,
        session: &SessionCredentials,
    ) -> Result<Vec<Purchase>, ApiError> {
        let response = self
            .client
            .get(format!("{}/compras", self.search_url))
            .query(&[
                ("tenant_id", session.tenant_id.as_str()),
                ("user_id", session.user_id.as_str()),
                ("limit", "100"),
            ])
            .header("Authorization", &session.token)
            .header("tenant-id", &session.tenant_id)
            .send()
            .await?;

        let body: PurchaseListResponse = Self::read_json(response).await?;
        Ok(body.compras)
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_default();

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl SearchApi for HttpStorefrontApi {
    fn search(&self, query: String, token: String) -> ApiFuture<'_, Vec<Suggestion>> {
        Box::pin(async move { HttpStorefrontApi::search(self, &query, &token).await })
    }
}

impl PurchaseApi for HttpStorefrontApi {
    fn purchase(
        &self,
        request: PurchaseRequest,
        session: SessionCredentials,
    ) -> ApiFuture<'_, Purchase> {
        Box::pin(async move { HttpStorefrontApi::purchase(self, &request, &session).await })
    }

    fn list_purchases(&self, session: SessionCredentials) -> ApiFuture<'_, Vec<Purchase>> {
        Box::pin(async move { HttpStorefrontApi::list_purchases(self, &session).await })
    }
}
