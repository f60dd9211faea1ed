//! Lookup of courses the signed-in user already owns.

use crate::api::PurchaseApi;
use crate::cart::CourseId;
use crate::session::CredentialStore;
use std::collections::HashSet;

/// Set of purchased course ids.
///
/// Fetching never fails: a missing session or a failed request yields an
/// empty set, and the failure is logged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PurchasedCourses {
    ids: HashSet<CourseId>,
}

impl PurchasedCourses {
    /// Fetch the user's purchases
    pub async fn fetch(api: &dyn PurchaseApi, credentials: &CredentialStore) -> Self {
        let session = match credentials.session() {
            Ok(session) => session,
            Err(error) => {
                tracing::debug!(%error, "Skipping purchase lookup");
                return Self::default();
            },
        };

        match api.list_purchases(session).await {
            Ok(purchases) => purchases.into_iter().map(|p| p.course_id).collect(),
            Err(error) => {
                tracing::warn!(%error, "Failed to load purchased courses");
                Self::default()
            },
        }
    }

    /// Whether the course was purchased
    #[must_use]
    pub fn is_purchased(&self, course_id: &CourseId) -> bool {
        self.ids.contains(course_id)
    }

    /// Number of distinct purchased courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing was purchased
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate over purchased ids
    pub fn iter(&self) -> impl Iterator<Item = &CourseId> {
        self.ids.iter()
    }
}

impl FromIterator<CourseId> for PurchasedCourses {
    fn from_iter<I: IntoIterator<Item = CourseId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
