use axum::{extract::State, Json};
use common::pagination::Pagination;
use service::intake::booking_service::{self, BookingSummary};
use uuid::Uuid;

use super::{ApiPath, ApiQuery, ServerState};
use crate::errors::JsonApiError;

#[utoipa::path(
    get, path = "/bookings", tag = "intake",
    params(("page" = Option<u32>, Query, description = "1-based page"), ("perPage" = Option<u32>, Query, description = "Items per page, max 100")),
    security(("bearer" = [])),
    responses((status = 200, description = "Bookings, newest first"), (status = 401, description = "Unauthorized"))
)]
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(page): ApiQuery<Pagination>,
) -> Result<Json<Vec<BookingSummary>>, JsonApiError> {
    Ok(Json(booking_service::list_bookings(&state.db, page).await?))
}

#[utoipa::path(
    get, path = "/bookings/{id}", tag = "intake",
    params(("id" = Uuid, Path, description = "Booking ID")),
    security(("bearer" = [])),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<BookingSummary>, JsonApiError> {
    Ok(Json(booking_service::get_booking(&state.db, id).await?))
}
