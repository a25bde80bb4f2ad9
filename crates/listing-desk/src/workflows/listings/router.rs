use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ListingId, ListingSubmission};
use super::export::export_csv;
use super::filter::ListingFilter;
use super::media::MediaStore;
use super::repository::ListingRepository;
use super::service::{ListingService, ListingServiceError};

/// Router builder exposing the public intake/browse endpoints and the
/// operator moderation endpoints.
pub fn listing_router<R, M>(service: Arc<ListingService<R, M>>) -> Router
where
    R: ListingRepository + 'static,
    M: MediaStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/listings",
            post(submit_handler::<R, M>).get(public_handler::<R, M>),
        )
        .route("/api/v1/admin/listings", get(queue_handler::<R, M>))
        .route(
            "/api/v1/admin/listings/:listing_id/approve",
            post(approve_handler::<R, M>),
        )
        .route(
            "/api/v1/admin/listings/:listing_id",
            delete(delete_handler::<R, M>),
        )
        .route(
            "/api/v1/admin/listings/export",
            get(export_handler::<R, M>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, M>(
    State(service): State<Arc<ListingService<R, M>>>,
    axum::Json(submission): axum::Json<ListingSubmission>,
) -> Response
where
    R: ListingRepository + 'static,
    M: MediaStore + 'static,
{
    match service.submit(submission) {
        Ok(record) => {
            let payload = json!({
                "id": record.id.0,
                "status": "pending_review",
                "photo_count": record.photo_urls.len(),
            });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(ListingServiceError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn public_handler<R, M>(
    State(service): State<Arc<ListingService<R, M>>>,
    Query(filter): Query<ListingFilter>,
) -> Response
where
    R: ListingRepository + 'static,
    M: MediaStore + 'static,
{
    match service.public_listings() {
        Ok(records) => {
            let cards: Vec<_> = filter
                .apply(&records)
                .into_iter()
                .map(|record| record.card_view())
                .collect();
            (StatusCode::OK, axum::Json(cards)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn queue_handler<R, M>(
    State(service): State<Arc<ListingService<R, M>>>,
) -> Response
where
    R: ListingRepository + 'static,
    M: MediaStore + 'static,
{
    match service.moderation_queue() {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| record.admin_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn approve_handler<R, M>(
    State(service): State<Arc<ListingService<R, M>>>,
    Path(listing_id): Path<String>,
) -> Response
where
    R: ListingRepository + 'static,
    M: MediaStore + 'static,
{
    let id = ListingId(listing_id);
    if let Err(error) = service.approve(&id) {
        return internal_error(error);
    }

    match service.moderation_queue() {
        Ok(records) => {
            let payload = json!({
                "id": id.0,
                "approved": true,
                "queue_size": records.len(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteParams {
    #[serde(default)]
    confirm: bool,
}

pub(crate) async fn delete_handler<R, M>(
    State(service): State<Arc<ListingService<R, M>>>,
    Path(listing_id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Response
where
    R: ListingRepository + 'static,
    M: MediaStore + 'static,
{
    if !params.confirm {
        let payload = json!({
            "error": "deletion is irreversible; repeat the request with confirm=true",
        });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    }

    let id = ListingId(listing_id);
    if let Err(error) = service.delete(&id) {
        return internal_error(error);
    }

    match service.moderation_queue() {
        Ok(records) => {
            let payload = json!({
                "id": id.0,
                "deleted": true,
                "queue_size": records.len(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn export_handler<R, M>(
    State(service): State<Arc<ListingService<R, M>>>,
) -> Response
where
    R: ListingRepository + 'static,
    M: MediaStore + 'static,
{
    let records = match service.moderation_queue() {
        Ok(records) => records,
        Err(error) => return internal_error(error),
    };

    match export_csv(&records) {
        Ok(document) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"property_listings.csv\"",
                ),
            ],
            document,
        )
            .into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

fn internal_error(error: ListingServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
