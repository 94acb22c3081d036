pub mod calculate;
pub mod catalog;
pub mod error;
pub mod response;

use axum::{
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{config::ServerConfig, state::AppState};

pub fn router(state: AppState, server: &ServerConfig) -> Router {
    let api = Router::new()
        .route("/calculate/with-tariff", post(calculate::with_tariff))
        .route(
            "/calculate/with-battery-strategy",
            post(calculate::with_battery_strategy),
        )
        .route("/components/panels", get(catalog::list_panels))
        .route("/components/batteries", get(catalog::list_batteries))
        .route("/components/inverters", get(catalog::list_inverters))
        .route("/tariffs", get(catalog::list_tariffs));

    let mut router = Router::new()
        .nest("/api", api)
        .route("/healthz", get(healthz))
        .with_state(state);

    if server.enable_cors {
        match server.cors_origin.parse::<HeaderValue>() {
            Ok(origin) => {
                let cors = CorsLayer::new()
                    .allow_origin(origin)
                    .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                    .allow_headers([axum::http::header::CONTENT_TYPE]);
                router = router.layer(cors);
            }
            Err(e) => {
                tracing::warn!(origin = %server.cors_origin, error = %e, "invalid CORS origin, CORS disabled");
            }
        }
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024))
                .layer(request_timeout(server.request_timeout_secs)),
        )
        .layer(TraceLayer::new_for_http())
}

fn request_timeout(secs: u64) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, Duration::from_secs(secs))
}

pub async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}
