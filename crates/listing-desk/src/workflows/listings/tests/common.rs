use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::listings::domain::{
    ListingDetails, ListingId, ListingRecord, ListingSubmission, ListingType, PhotoUpload,
    PropertyType,
};
use crate::workflows::listings::intake::IntakePolicy;
use crate::workflows::listings::media::{MediaStore, MediaStoreError};
use crate::workflows::listings::repository::{ListingQuery, ListingRepository, RepositoryError};
use crate::workflows::listings::service::ListingService;

pub(super) fn details() -> ListingDetails {
    ListingDetails {
        property_type: "House / Flat".to_string(),
        listing_type: "Sell".to_string(),
        city: "Ahmedabad".to_string(),
        area: "Satellite".to_string(),
        price: 5_000_000,
        size: 1200,
        description: "A spacious and bright apartment near the main road.".to_string(),
        owner_name: Some("Ramesh Patel".to_string()),
        owner_mobile: "9876543210".to_string(),
    }
}

pub(super) fn jpeg_photo(file_name: &str) -> PhotoUpload {
    // Leading bytes of a JPEG stream; the guard only inspects the MIME type.
    let payload = BASE64.encode([0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]);
    PhotoUpload {
        file_name: file_name.to_string(),
        data_uri: format!("data:image/jpeg;base64,{payload}"),
    }
}

pub(super) fn submission() -> ListingSubmission {
    ListingSubmission {
        details: details(),
        photos: vec![jpeg_photo("front.jpg")],
    }
}

pub(super) fn submission_with_photos(count: usize) -> ListingSubmission {
    ListingSubmission {
        details: details(),
        photos: (0..count)
            .map(|index| jpeg_photo(&format!("photo-{index}.jpg")))
            .collect(),
    }
}

pub(super) fn record(id: &str, approved: bool, created_at: DateTime<Utc>) -> ListingRecord {
    ListingRecord {
        id: ListingId(id.to_string()),
        property_type: PropertyType::HouseFlat,
        listing_type: ListingType::Sell,
        city: "Ahmedabad".to_string(),
        area: "Satellite".to_string(),
        price: 5_000_000,
        size: 1200,
        description: "A spacious and bright apartment near the main road.".to_string(),
        owner_name: Some("Ramesh Patel".to_string()),
        owner_mobile: "9876543210".to_string(),
        photo_urls: vec!["https://media.test/listings/demo/01-front.jpg".to_string()],
        approved,
        created_at,
    }
}

pub(super) fn day(ordinal: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, ordinal, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<HashMap<ListingId, ListingRecord>>,
    insert_calls: AtomicUsize,
}

impl MemoryRepository {
    pub(super) fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub(super) fn seed(&self, record: ListingRecord) {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .insert(record.id.clone(), record);
    }

    pub(super) fn get(&self, id: &ListingId) -> Option<ListingRecord> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(id)
            .cloned()
    }
}

impl ListingRepository for MemoryRepository {
    fn insert(&self, record: ListingRecord) -> Result<ListingRecord, RepositoryError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
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
        match guard.remove(id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound),
        }
    }
}

pub(super) struct UnavailableRepository;

impl ListingRepository for UnavailableRepository {
    fn insert(&self, _record: ListingRecord) -> Result<ListingRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn set_approved(&self, _id: &ListingId, _approved: bool) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn query(&self, _filter: ListingQuery) -> Result<Vec<ListingRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &ListingId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryMediaStore {
    uploads: Mutex<Vec<(String, String)>>,
    put_calls: AtomicUsize,
}

impl MemoryMediaStore {
    pub(super) fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    pub(super) fn uploaded_keys(&self) -> Vec<String> {
        self.uploads
            .lock()
            .expect("media mutex poisoned")
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }
}

impl MediaStore for MemoryMediaStore {
    fn put(&self, key: &str, content_type: &str, _bytes: &[u8]) -> Result<String, MediaStoreError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        self.uploads
            .lock()
            .expect("media mutex poisoned")
            .push((key.to_string(), content_type.to_string()));
        Ok(format!("https://media.test/{key}"))
    }
}

/// Fails every upload after the first `succeed` calls.
pub(super) struct FlakyMediaStore {
    succeed: usize,
    put_calls: AtomicUsize,
}

impl FlakyMediaStore {
    pub(super) fn new(succeed: usize) -> Self {
        Self {
            succeed,
            put_calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }
}

impl MediaStore for FlakyMediaStore {
    fn put(&self, key: &str, _content_type: &str, _bytes: &[u8]) -> Result<String, MediaStoreError> {
        let call = self.put_calls.fetch_add(1, Ordering::SeqCst);
        if call < self.succeed {
            Ok(format!("https://media.test/{key}"))
        } else {
            Err(MediaStoreError::Backend("storage rejected blob".to_string()))
        }
    }
}

pub(super) fn build_service() -> (
    ListingService<MemoryRepository, MemoryMediaStore>,
    Arc<MemoryRepository>,
    Arc<MemoryMediaStore>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let media = Arc::new(MemoryMediaStore::default());
    let service = ListingService::new(repository.clone(), media.clone(), IntakePolicy::default());
    (service, repository, media)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
