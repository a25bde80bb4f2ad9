//! Property listing intake, moderation, and public browsing workflow.
//!
//! The intake service validates a public submission, uploads its photos to
//! the media store in submission order, and persists one unapproved record.
//! Operators approve or delete records through the moderation endpoints; a
//! listing only ever reaches the public view once `approved` is set.

pub mod domain;
pub mod export;
pub mod filter;
pub mod intake;
pub mod media;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AdminListingView, ListingCardView, ListingDetails, ListingId, ListingRecord,
    ListingSubmission, ListingType, PhotoBlob, PhotoUpload, PropertyType, ValidatedListing,
};
pub use export::{export_csv, ExportError};
pub use filter::ListingFilter;
pub use intake::{IntakeGuard, IntakePolicy, ValidationError};
pub use media::{DriveMediaStore, MediaStore, MediaStoreError};
pub use repository::{ListingQuery, ListingRepository, RepositoryError};
pub use router::listing_router;
pub use service::{ListingService, ListingServiceError};
