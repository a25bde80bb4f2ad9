use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;

use listing_desk::workflows::content::{ContentError, ContentGenerator, ServiceCopy, ServiceTopic};
use listing_desk::workflows::listings::{
    IntakePolicy, ListingId, ListingQuery, ListingRecord, ListingRepository, MediaStore,
    MediaStoreError, RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
pub(crate) struct InMemoryListingRepository {
    records: Mutex<HashMap<ListingId, ListingRecord>>,
}

impl ListingRepository for InMemoryListingRepository {
    fn insert(&self, record: ListingRecord) -> Result<ListingRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn set_approved(&self, id: &ListingId, approved: bool) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(id) {
            Some(record) => {
                record.approved = approved;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn query(&self, filter: ListingQuery) -> Result<Vec<ListingRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<ListingRecord> = guard
            .values()
            .filter(|record| match filter.approved {
                Some(approved) => record.approved == approved,
                None => true,
            })
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.0.cmp(&a.id.0))
        });
        Ok(records)
    }

    fn delete(&self, id: &ListingId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

/// Keeps uploaded blobs in memory and hands back stable pseudo-URLs. Stands
/// in for the Drive-backed store until credentials are wired up.
#[derive(Default)]
pub(crate) struct InMemoryMediaStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MediaStore for InMemoryMediaStore {
    fn put(&self, key: &str, _content_type: &str, bytes: &[u8]) -> Result<String, MediaStoreError> {
        let mut guard = self.blobs.lock().expect("media mutex poisoned");
        if guard.contains_key(key) {
            return Err(MediaStoreError::Backend(format!(
                "duplicate media key {key}"
            )));
        }
        guard.insert(key.to_string(), bytes.to_vec());
        Ok(format!("https://media.listing-desk.local/{key}"))
    }
}

/// Serves fallback-quality copy without calling any backend; used when no
/// API key is configured and by the CLI demo.
pub(crate) struct StaticContentGenerator;

impl ContentGenerator for StaticContentGenerator {
    fn generate_copy(&self, topic: &ServiceTopic) -> Result<ServiceCopy, ContentError> {
        Ok(listing_desk::workflows::content::fallback_copy(topic))
    }

    fn generate_preview_image(&self, _topic: &ServiceTopic) -> Result<String, ContentError> {
        Err(ContentError::Backend(
            "no generative backend configured".to_string(),
        ))
    }
}

pub(crate) fn default_intake_policy() -> IntakePolicy {
    IntakePolicy::default()
}
