use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::listings::intake::IntakePolicy;
use crate::workflows::listings::router::listing_router;
use crate::workflows::listings::service::ListingService;

fn build_router() -> (
    axum::Router,
    Arc<MemoryRepository>,
    Arc<MemoryMediaStore>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let media = Arc::new(MemoryMediaStore::default());
    let service = Arc::new(ListingService::new(
        repository.clone(),
        media.clone(),
        IntakePolicy::default(),
    ));
    (listing_router(service), repository, media)
}

fn post_json(uri: &str, payload: &impl serde::Serialize) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("serialize")))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn submit_route_accepts_valid_payloads() {
    let (router, _, _) = build_router();

    let response = router
        .oneshot(post_json("/api/v1/listings", &submission()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("status"), Some(&Value::from("pending_review")));
    assert_eq!(payload.get("photo_count"), Some(&Value::from(1)));
    assert!(payload.get("id").is_some());
}

#[tokio::test]
async fn submit_route_names_the_violated_field() {
    let (router, repository, media) = build_router();

    let mut bad = submission();
    bad.details.description = "too short".to_string();

    let response = router
        .oneshot(post_json("/api/v1/listings", &bad))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("field"), Some(&Value::from("description")));
    assert_eq!(repository.insert_calls(), 0);
    assert_eq!(media.put_calls(), 0);
}

#[tokio::test]
async fn submit_route_rejects_a_fourth_photo() {
    let (router, _, _) = build_router();

    let response = router
        .oneshot(post_json("/api/v1/listings", &submission_with_photos(4)))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("field"), Some(&Value::from("photos")));
    let message = payload
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default();
    assert!(message.contains('3'), "error should name the cap: {message}");
}

#[tokio::test]
async fn public_route_returns_only_approved_listings() {
    let (router, repository, _) = build_router();
    repository.seed(record("listing-hidden", false, day(1)));
    repository.seed(record("listing-live", true, day(2)));

    let response = router
        .oneshot(get("/api/v1/listings"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let cards = payload.as_array().expect("array payload");
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].get("id"), Some(&Value::from("listing-live")));
    assert!(
        cards[0].get("owner_mobile").is_none(),
        "public cards must not leak contact details"
    );
}

#[tokio::test]
async fn public_route_applies_filters_in_memory() {
    let (router, repository, _) = build_router();
    let mut pricey = record("listing-pricey", true, day(2));
    pricey.price = 9_000_000;
    repository.seed(pricey);
    repository.seed(record("listing-budget", true, day(1)));

    let response = router
        .oneshot(get("/api/v1/listings?max_price=5000000&city=ahmedabad"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let cards = payload.as_array().expect("array payload");
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].get("id"), Some(&Value::from("listing-budget")));
}

#[tokio::test]
async fn approve_route_is_idempotent() {
    let (router, repository, _) = build_router();
    repository.seed(record("listing-pending", false, day(1)));

    for _ in 0..2 {
        let response = router
            .clone()
            .oneshot(post_json(
                "/api/v1/admin/listings/listing-pending/approve",
                &Value::Null,
            ))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let stored = repository
        .get(&crate::workflows::listings::domain::ListingId(
            "listing-pending".to_string(),
        ))
        .expect("record present");
    assert!(stored.approved);
}

#[tokio::test]
async fn delete_route_requires_confirmation() {
    let (router, repository, _) = build_router();
    repository.seed(record("listing-doomed", true, day(1)));

    let response = router
        .clone()
        .oneshot(delete("/api/v1/admin/listings/listing-doomed"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = router
        .oneshot(delete("/api/v1/admin/listings/listing-doomed?confirm=true"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("deleted"), Some(&Value::from(true)));
    assert_eq!(payload.get("queue_size"), Some(&Value::from(0)));
}

#[tokio::test]
async fn admin_queue_lists_everything_newest_first() {
    let (router, repository, _) = build_router();
    repository.seed(record("listing-old", false, day(1)));
    repository.seed(record("listing-new", true, day(2)));

    let response = router
        .oneshot(get("/api/v1/admin/listings"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let rows = payload.as_array().expect("array payload");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("id"), Some(&Value::from("listing-new")));
    assert_eq!(rows[0].get("status"), Some(&Value::from("Approved")));
    assert_eq!(rows[1].get("status"), Some(&Value::from("Pending")));
}

#[tokio::test]
async fn export_route_returns_a_csv_attachment() {
    let (router, repository, _) = build_router();
    repository.seed(record("listing-a", true, day(1)));

    let response = router
        .oneshot(get("/api/v1/admin/listings/export"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    let document = String::from_utf8(body.to_vec()).expect("utf-8 csv");
    assert!(document.starts_with("ID,Title,Price"));
    assert!(document.contains("listing-a"));
    assert!(document.contains("Satellite, Ahmedabad"));
}

#[tokio::test]
async fn repository_outage_is_visible_to_the_operator() {
    let media = Arc::new(MemoryMediaStore::default());
    let service = Arc::new(ListingService::new(
        Arc::new(UnavailableRepository),
        media,
        IntakePolicy::default(),
    ));
    let router = listing_router(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/admin/listings/listing-000001/approve",
            &Value::Null,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("unavailable"));
}
