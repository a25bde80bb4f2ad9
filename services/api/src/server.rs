use crate::cli::ServeArgs;
use crate::infra::{
    default_intake_policy, AppState, InMemoryListingRepository, InMemoryMediaStore,
    StaticContentGenerator,
};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use listing_desk::config::AppConfig;
use listing_desk::error::AppError;
use listing_desk::telemetry;
use listing_desk::workflows::content::{
    content_router, GeminiContentClient, ServiceContentService,
};
use listing_desk::workflows::listings::ListingService;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryListingRepository::default());
    let media = Arc::new(InMemoryMediaStore::default());
    let listing_service = Arc::new(ListingService::new(
        repository,
        media,
        default_intake_policy(),
    ));

    let content_routes = match config.content.api_key.clone() {
        Some(api_key) => {
            match GeminiContentClient::new(
                api_key,
                config.content.model.clone(),
                config.timeouts.content(),
            ) {
                Ok(client) => {
                    content_router(Arc::new(ServiceContentService::new(Arc::new(client))))
                }
                Err(error) => {
                    warn!(%error, "content client unavailable, serving fallback copy");
                    content_router(Arc::new(ServiceContentService::new(Arc::new(
                        StaticContentGenerator,
                    ))))
                }
            }
        }
        None => content_router(Arc::new(ServiceContentService::new(Arc::new(
            StaticContentGenerator,
        )))),
    };

    let app = with_service_routes(listing_service, content_routes)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "listing desk ready");

    axum::serve(listener, app).await?;
    Ok(())
}
