//! Error types for the storefront.

use thiserror::Error;

/// Errors from durable client storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the storage medium failed
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value could not be encoded or decoded
    #[error("Stored value is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key cannot be used as a storage slot
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// In-memory storage lock was poisoned by a panicking writer
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Errors from the remote storefront services.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Credential needed for an authenticated call is not stored
    #[error("Missing credentials: {0}")]
    MissingCredentials(&'static str),

    /// The request never produced a response
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The service answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message from the response body, if any
        message: String,
    },

    /// The response body did not have the expected shape
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),
}

impl ApiError {
    /// Whether the service rejected the request (as opposed to a transport failure)
    #[must_use]
    pub const fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::ResponseParseFailed(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Checkout failures surfaced to the shopper as a blocking alert.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Token, tenant or user id is missing from storage
    #[error("Missing session data. Please sign in again.")]
    MissingSession,

    /// A purchase request failed; later items were not attempted
    #[error("{message}")]
    PurchaseFailed {
        /// Course whose purchase failed
        course_id: String,
        /// User-facing reason
        message: String,
    },
}

/// Invalid configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("Invalid value for {key}: {value:?}")]
    Invalid {
        /// Environment variable name
        key: &'static str,
        /// Raw value
        value: String,
    },

    /// The HTTP client could not be built from the configuration
    #[error("HTTP client setup failed: {0}")]
    HttpClient(String),

    /// The storage directory could not be opened
    #[error("Storage setup failed: {0}")]
    Storage(#[from] StorageError),
}
