use crate::config::CONFIG;
use crate::db::BookingStorage;
use crate::handlers;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{delete, get, patch};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

#[derive(Clone)]
pub struct LacquerState {
    pub storage: BookingStorage,
}

impl LacquerState {
    pub fn new(storage: BookingStorage) -> Self {
        Self { storage }
    }
}

pub fn lacquer_router(state: LacquerState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/services", get(handlers::services::list_services))
        .route(
            "/api/appointments",
            get(handlers::appointments::list_all).post(handlers::appointments::create),
        )
        .route(
            "/api/appointments/check",
            get(handlers::appointments::check_slot),
        )
        .route(
            "/api/appointments/day/{date}",
            get(handlers::appointments::list_day),
        )
        .route(
            "/api/appointments/week/{start}",
            get(handlers::appointments::list_week),
        )
        .route(
            "/api/appointments/{id}/cancel",
            patch(handlers::appointments::cancel),
        )
        .route(
            "/api/appointments/{id}",
            delete(handlers::appointments::remove),
        )
        .layer(cors_layer(CONFIG.cors_origin.as_deref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The API is consumed from browsers in its original deployment shape, so
/// the origin stays configurable; `None` (or `*`) allows any origin.
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    match origin {
        Some(origin) if origin != "*" => match origin.parse::<HeaderValue>() {
            Ok(value) => layer.allow_origin(value),
            Err(_) => {
                warn!(origin, "invalid cors_origin, allowing any origin");
                layer.allow_origin(Any)
            }
        },
        _ => layer.allow_origin(Any),
    }
}
