use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::domain::{ListingId, ListingRecord, ListingSubmission, ValidatedListing};
use super::intake::{IntakeGuard, IntakePolicy, ValidationError};
use super::media::{MediaStore, MediaStoreError};
use super::repository::{ListingQuery, ListingRepository, RepositoryError};

/// Service composing the intake guard, listing repository, and media store.
///
/// Submission order: validate, upload photos, then persist one complete
/// record. A record therefore never becomes queryable with a partial photo
/// list, and `approved = false` gates public exposure regardless.
pub struct ListingService<R, M> {
    guard: IntakeGuard,
    repository: Arc<R>,
    media: Arc<M>,
}

static LISTING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_listing_id() -> ListingId {
    let id = LISTING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ListingId(format!("listing-{id:06}"))
}

impl<R, M> ListingService<R, M>
where
    R: ListingRepository + 'static,
    M: MediaStore + 'static,
{
    pub fn new(repository: Arc<R>, media: Arc<M>, policy: IntakePolicy) -> Self {
        Self {
            guard: IntakeGuard::with_policy(policy),
            repository,
            media,
        }
    }

    pub fn policy(&self) -> &IntakePolicy {
        self.guard.policy()
    }

    /// Accept a new public submission, returning the stored (unapproved)
    /// record.
    pub fn submit(
        &self,
        submission: ListingSubmission,
    ) -> Result<ListingRecord, ListingServiceError> {
        let validated = self.guard.validate(submission)?;
        let id = next_listing_id();
        let photo_urls = self.upload_photos(&id, &validated)?;

        let ValidatedListing {
            property_type,
            listing_type,
            city,
            area,
            price,
            size,
            description,
            owner_name,
            owner_mobile,
            photos: _,
        } = validated;

        let record = ListingRecord {
            id,
            property_type,
            listing_type,
            city,
            area,
            price,
            size,
            description,
            owner_name,
            owner_mobile,
            photo_urls,
            approved: false,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Upload photos in submission order; the first failure aborts the
    /// remainder so `photo_urls` ordering always matches the form.
    fn upload_photos(
        &self,
        id: &ListingId,
        validated: &ValidatedListing,
    ) -> Result<Vec<String>, ListingServiceError> {
        let mut urls = Vec::with_capacity(validated.photos.len());
        for (index, photo) in validated.photos.iter().enumerate() {
            let key = format!(
                "listings/{}/{:02}-{}",
                id.0,
                index + 1,
                sanitize_file_name(&photo.file_name)
            );
            let url = self
                .media
                .put(&key, &photo.content_type, &photo.bytes)
                .map_err(ListingServiceError::Upload)?;
            urls.push(url);
        }
        Ok(urls)
    }

    /// Full moderation queue, newest first.
    pub fn moderation_queue(&self) -> Result<Vec<ListingRecord>, ListingServiceError> {
        Ok(self.repository.query(ListingQuery::all())?)
    }

    /// Approved listings only, newest first.
    pub fn public_listings(&self) -> Result<Vec<ListingRecord>, ListingServiceError> {
        Ok(self.repository.query(ListingQuery::approved_only())?)
    }

    /// Flip a listing to approved. Approving an already-approved or
    /// already-deleted record is a no-op.
    pub fn approve(&self, id: &ListingId) -> Result<(), ListingServiceError> {
        match self.repository.set_approved(id, true) {
            Ok(()) | Err(RepositoryError::NotFound) => Ok(()),
            Err(other) => Err(other.into()),
        }
    }

    /// Permanently remove a listing. Deleting a record that is already gone
    /// counts as resolved.
    pub fn delete(&self, id: &ListingId) -> Result<(), ListingServiceError> {
        match self.repository.delete(id) {
            Ok(()) | Err(RepositoryError::NotFound) => Ok(()),
            Err(other) => Err(other.into()),
        }
    }
}

/// Error raised by the listing service.
#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("submission failed, please retry: {0}")]
    Upload(MediaStoreError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

fn sanitize_file_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "photo".to_string()
    } else {
        cleaned
    }
}
