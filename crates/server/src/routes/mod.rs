use axum::{
    extract::{FromRequest, FromRequestParts},
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;

pub mod auth;
pub mod brands;
pub mod device_models;
pub mod repairs;
pub mod intake;
pub mod bookings;

pub use auth::ServerState;

/// `Json` whose rejection uses the shared error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(JsonApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(JsonApiError))]
pub struct ApiPath<T>(pub T);

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public catalog reads and intake, plus
/// the admin mutation routes behind `require_admin`.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/brands", get(brands::list))
        .route("/brands/:id", get(brands::get))
        .route("/models", get(device_models::list))
        .route("/models/:id", get(device_models::get))
        .route("/models/:id/repairs", get(device_models::repairs))
        .route("/repairs", get(repairs::list))
        .route("/repairs/:id", get(repairs::get))
        .route("/booking", post(intake::booking))
        .route("/contact", post(intake::contact));

    let admin = Router::new()
        .route("/brands", post(brands::create))
        .route("/brands/reorder", put(brands::reorder))
        .route("/brands/:id", put(brands::update).delete(brands::delete))
        .route("/models", post(device_models::create))
        .route("/models/reorder", put(device_models::reorder))
        .route("/models/:id", put(device_models::update).delete(device_models::delete))
        .route("/models/:id/repairs", put(device_models::set_prices))
        .route("/repairs", post(repairs::create))
        .route("/repairs/reorder", put(repairs::reorder))
        .route("/repairs/:id", put(repairs::update).delete(repairs::delete))
        .route("/bookings", get(bookings::list))
        .route("/bookings/:id", get(bookings::get))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin));

    public
        .merge(admin)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
