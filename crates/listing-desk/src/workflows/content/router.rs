use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::generator::ContentGenerator;
use super::pages::{ServiceContentError, ServiceContentService};

/// Router builder exposing service-page content endpoints.
pub fn content_router<G>(service: Arc<ServiceContentService<G>>) -> Router
where
    G: ContentGenerator + 'static,
{
    Router::new()
        .route("/api/v1/services/:slug/content", get(page_handler::<G>))
        .route(
            "/api/v1/services/:slug/image",
            post(regenerate_image_handler::<G>),
        )
        .with_state(service)
}

// Generation clients block on their own runtime, so the calls are pushed
// onto the blocking pool instead of an async worker.
pub(crate) async fn page_handler<G>(
    State(service): State<Arc<ServiceContentService<G>>>,
    Path(slug): Path<String>,
) -> Response
where
    G: ContentGenerator + 'static,
{
    let result = tokio::task::spawn_blocking(move || service.page(&slug)).await;

    match result {
        Ok(Ok(page)) => (StatusCode::OK, axum::Json(page)).into_response(),
        Ok(Err(error @ ServiceContentError::UnknownService(_))) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(join_error) => {
            let payload = json!({ "error": format!("content task failed: {join_error}") });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn regenerate_image_handler<G>(
    State(service): State<Arc<ServiceContentService<G>>>,
    Path(slug): Path<String>,
) -> Response
where
    G: ContentGenerator + 'static,
{
    let result = {
        let slug = slug.clone();
        tokio::task::spawn_blocking(move || service.regenerate_image(&slug)).await
    };

    match result {
        Ok(Ok(preview_image)) => {
            let payload = json!({ "slug": slug, "preview_image": preview_image });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(Err(error @ ServiceContentError::UnknownService(_))) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(join_error) => {
            let payload = json!({ "error": format!("content task failed: {join_error}") });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
