use axum::{extract::State, http::StatusCode, Json};
use service::intake::booking_service::{BookingRequest, BookingSummary};
use service::intake::contact_service::ContactRequest;
use tracing::info;

use super::{ApiJson, ServerState};
use crate::errors::JsonApiError;

#[utoipa::path(
    post, path = "/booking", tag = "intake",
    request_body = crate::openapi::BookingDoc,
    responses((status = 201, description = "Booked"), (status = 400, description = "Invalid selection or contact details"), (status = 404, description = "Model not found"))
)]
pub async fn booking(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<BookingRequest>,
) -> Result<(StatusCode, Json<BookingSummary>), JsonApiError> {
    let summary = state.intake.submit_booking(input).await?;
    info!(id = %summary.booking.id, lines = summary.lines.len(), "booking accepted");
    Ok((StatusCode::CREATED, Json(summary)))
}

#[utoipa::path(
    post, path = "/contact", tag = "intake",
    request_body = crate::openapi::ContactDoc,
    responses((status = 201, description = "Received"), (status = 400, description = "Validation Error"))
)]
pub async fn contact(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<ContactRequest>,
) -> Result<(StatusCode, Json<models::contact_message::Model>), JsonApiError> {
    let saved = state.intake.submit_contact(input).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}
