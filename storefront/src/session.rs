//! Session credentials kept in client storage by the sign-in flow.

use crate::error::{ApiError, StorageError};
use crate::storage::ClientStorage;
use std::sync::Arc;

/// Storage key for the bearer credential
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Storage key for the tenant id
pub const TENANT_ID_KEY: &str = "tenantId";

/// Storage key for the signed-in user id
pub const USER_ID_KEY: &str = "userId";

/// Everything an authenticated purchase call needs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionCredentials {
    /// Value sent verbatim in the `Authorization` header
    pub token: String,
    /// Marketplace tenant
    pub tenant_id: String,
    /// Signed-in user
    pub user_id: String,
}

/// Reads and writes credentials in client storage.
///
/// Unreadable storage is treated the same as a signed-out session.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn ClientStorage>,
}

impl CredentialStore {
    /// Create a credential store over `storage`
    #[must_use]
    pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
        Self { storage }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(error) => {
                tracing::warn!(key, %error, "Failed to read credential");
                None
            },
        }
    }

    fn require(&self, key: &'static str) -> Result<String, ApiError> {
        self.read(key).ok_or(ApiError::MissingCredentials(key))
    }

    /// The bearer credential
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingCredentials`] when signed out.
    pub fn token(&self) -> Result<String, ApiError> {
        self.require(AUTH_TOKEN_KEY)
    }

    /// Full session: token, tenant and user
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingCredentials`] naming the first absent key.
    pub fn session(&self) -> Result<SessionCredentials, ApiError> {
        Ok(SessionCredentials {
            token: self.token()?,
            tenant_id: self.require(TENANT_ID_KEY)?,
            user_id: self.require(USER_ID_KEY)?,
        })
    }

    /// Store a session after sign-in
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be written.
    pub fn sign_in(&self, session: &SessionCredentials) -> Result<(), StorageError> {
        self.storage.set_item(AUTH_TOKEN_KEY, &session.token)?;
        self.storage.set_item(TENANT_ID_KEY, &session.tenant_id)?;
        self.storage.set_item(USER_ID_KEY, &session.user_id)
    }

    /// Forget the stored session
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be written.
    pub fn sign_out(&self) -> Result<(), StorageError> {
        self.storage.remove_item(AUTH_TOKEN_KEY)?;
        self.storage.remove_item(TENANT_ID_KEY)?;
        self.storage.remove_item(USER_ID_KEY)
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}
