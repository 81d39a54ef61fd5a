use axum::{extract::State, http::StatusCode, Json};
use service::catalog::repair_type_service::{self, NewRepair, RepairPatch};
use service::ordering::{self, Scope};
use tracing::info;
use uuid::Uuid;

use super::brands::ReorderInput;
use super::{ApiJson, ApiPath, ServerState};
use crate::errors::JsonApiError;

#[utoipa::path(get, path = "/repairs", tag = "catalog", responses((status = 200, description = "Repair types in catalog order")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<models::repair_type::Model>>, JsonApiError> {
    Ok(Json(repair_type_service::list_repair_types(&state.db).await?))
}

#[utoipa::path(
    get, path = "/repairs/{id}", tag = "catalog",
    params(("id" = Uuid, Path, description = "Repair type ID")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<models::repair_type::Model>, JsonApiError> {
    Ok(Json(repair_type_service::get_repair_type(&state.db, id).await?))
}

#[utoipa::path(
    post, path = "/repairs", tag = "catalog",
    request_body = crate::openapi::CreateRepairDoc,
    security(("bearer" = [])),
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"), (status = 409, description = "Name taken"))
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<NewRepair>,
) -> Result<(StatusCode, Json<models::repair_type::Model>), JsonApiError> {
    let r = repair_type_service::create_repair_type(&state.db, input).await?;
    info!(id = %r.id, name = %r.name, "created repair type");
    Ok((StatusCode::CREATED, Json(r)))
}

#[utoipa::path(
    put, path = "/repairs/{id}", tag = "catalog",
    params(("id" = Uuid, Path, description = "Repair type ID")),
    request_body = crate::openapi::UpdateRepairDoc,
    security(("bearer" = [])),
    responses((status = 200, description = "Updated"), (status = 404, description = "Not Found"), (status = 409, description = "Name taken"))
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<RepairPatch>,
) -> Result<Json<models::repair_type::Model>, JsonApiError> {
    Ok(Json(repair_type_service::update_repair_type(&state.db, id, patch).await?))
}

#[utoipa::path(
    delete, path = "/repairs/{id}", tag = "catalog",
    params(("id" = Uuid, Path, description = "Repair type ID")),
    security(("bearer" = [])),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<StatusCode, JsonApiError> {
    repair_type_service::delete_repair_type(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put, path = "/repairs/reorder", tag = "catalog",
    request_body = crate::openapi::ReorderDoc,
    security(("bearer" = [])),
    responses((status = 204, description = "Reordered"), (status = 400, description = "Order is not a permutation of all repair types"))
)]
pub async fn reorder(State(state): State<ServerState>, ApiJson(input): ApiJson<ReorderInput>) -> Result<StatusCode, JsonApiError> {
    ordering::reorder(&state.db, Scope::RepairTypes, &input.order).await?;
    Ok(StatusCode::NO_CONTENT)
}
