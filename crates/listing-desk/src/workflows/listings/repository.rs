use serde::{Deserialize, Serialize};

use super::domain::{ListingId, ListingRecord};

/// Query filter understood by every repository implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
    /// `None` returns every listing regardless of moderation state.
    pub approved: Option<bool>,
}

impl ListingQuery {
    pub const fn all() -> Self {
        Self { approved: None }
    }

    pub const fn approved_only() -> Self {
        Self {
            approved: Some(true),
        }
    }
}

/// Storage abstraction over the listing document store.
///
/// Implementations must return query results ordered by `created_at`
/// descending; callers rely on that ordering and never re-sort.
pub trait ListingRepository: Send + Sync {
    fn insert(&self, record: ListingRecord) -> Result<ListingRecord, RepositoryError>;
    fn set_approved(&self, id: &ListingId, approved: bool) -> Result<(), RepositoryError>;
    fn query(&self, filter: ListingQuery) -> Result<Vec<ListingRecord>, RepositoryError>;
    fn delete(&self, id: &ListingId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
