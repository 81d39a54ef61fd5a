use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use service::catalog::model_service::{self, ModelPatch, NewModel};
use service::ordering::{self, Scope};
use service::pricing::{self, RepairPriceEntry, ResolvedModelRepairs};
use tracing::info;
use uuid::Uuid;

use super::{ApiJson, ApiPath, ApiQuery, ServerState};
use crate::errors::JsonApiError;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ListQuery {
    pub brand_id: Option<Uuid>,
    /// Case-insensitive substring of the model name
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct RepairsQuery {
    /// Drop entries hidden for this model
    #[serde(default)]
    pub visible_only: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderModelsInput {
    pub brand_id: Uuid,
    pub order: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct SetPricesInput {
    #[serde(alias = "repairs")]
    pub reparaties: Vec<RepairPriceEntry>,
}

#[utoipa::path(get, path = "/models", tag = "catalog", params(ListQuery), responses((status = 200, description = "Models by brand order, then model order")))]
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<ListQuery>,
) -> Result<Json<Vec<models::device_model::Model>>, JsonApiError> {
    let list = model_service::list_models(&state.db, q.brand_id, q.q.as_deref()).await?;
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/models/{id}", tag = "catalog",
    params(("id" = Uuid, Path, description = "Model ID")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<models::device_model::Model>, JsonApiError> {
    Ok(Json(model_service::get_model(&state.db, id).await?))
}

#[utoipa::path(
    post, path = "/models", tag = "catalog",
    request_body = crate::openapi::CreateModelDoc,
    security(("bearer" = [])),
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"), (status = 404, description = "Brand not found"))
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<NewModel>,
) -> Result<(StatusCode, Json<models::device_model::Model>), JsonApiError> {
    let m = model_service::create_model(&state.db, input).await?;
    info!(id = %m.id, brand_id = %m.brand_id, "created model");
    Ok((StatusCode::CREATED, Json(m)))
}

#[utoipa::path(
    put, path = "/models/{id}", tag = "catalog",
    params(("id" = Uuid, Path, description = "Model ID")),
    request_body = crate::openapi::UpdateModelDoc,
    security(("bearer" = [])),
    responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error"), (status = 404, description = "Not Found"))
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<ModelPatch>,
) -> Result<Json<models::device_model::Model>, JsonApiError> {
    Ok(Json(model_service::update_model(&state.db, id, patch).await?))
}

#[utoipa::path(
    delete, path = "/models/{id}", tag = "catalog",
    params(("id" = Uuid, Path, description = "Model ID")),
    security(("bearer" = [])),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<StatusCode, JsonApiError> {
    model_service::delete_model(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put, path = "/models/reorder", tag = "catalog",
    request_body = crate::openapi::ReorderModelsDoc,
    security(("bearer" = [])),
    responses((status = 204, description = "Reordered"), (status = 400, description = "Order is not a permutation of the brand's models"), (status = 404, description = "Brand not found"))
)]
pub async fn reorder(State(state): State<ServerState>, ApiJson(input): ApiJson<ReorderModelsInput>) -> Result<StatusCode, JsonApiError> {
    ordering::reorder(&state.db, Scope::Models(input.brand_id), &input.order).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/models/{id}/repairs", tag = "pricing",
    params(("id" = Uuid, Path, description = "Model ID"), RepairsQuery),
    responses((status = 200, description = "Catalog merged with the model's prices"), (status = 404, description = "Not Found"))
)]
pub async fn repairs(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(q): ApiQuery<RepairsQuery>,
) -> Result<Json<ResolvedModelRepairs>, JsonApiError> {
    let resolved = pricing::resolve_model_repairs(&state.db, id).await?;
    Ok(Json(if q.visible_only { resolved.into_visible() } else { resolved }))
}

#[utoipa::path(
    put, path = "/models/{id}/repairs", tag = "pricing",
    params(("id" = Uuid, Path, description = "Model ID")),
    request_body = crate::openapi::SetPricesDoc,
    security(("bearer" = [])),
    responses((status = 200, description = "Override set replaced; returns the new resolution"), (status = 400, description = "Unknown repair type names"), (status = 404, description = "Not Found"))
)]
pub async fn set_prices(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<SetPricesInput>,
) -> Result<Json<ResolvedModelRepairs>, JsonApiError> {
    pricing::set_model_repair_prices(&state.db, id, &input.reparaties).await?;
    Ok(Json(pricing::resolve_model_repairs(&state.db, id).await?))
}
