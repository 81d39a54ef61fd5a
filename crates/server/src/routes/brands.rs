use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use service::catalog::brand_service;
use service::ordering::{self, Scope};
use tracing::info;
use uuid::Uuid;

use super::{ApiJson, ApiPath, ServerState};
use crate::errors::JsonApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBrandInput {
    pub name: String,
    #[serde(default)]
    pub logo: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBrandInput {
    pub name: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderInput {
    pub order: Vec<Uuid>,
}

#[utoipa::path(get, path = "/brands", tag = "catalog", responses((status = 200, description = "Brands in display order")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<models::brand::Model>>, JsonApiError> {
    let list = brand_service::list_brands(&state.db).await?;
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/brands/{id}", tag = "catalog",
    params(("id" = Uuid, Path, description = "Brand ID")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<models::brand::Model>, JsonApiError> {
    Ok(Json(brand_service::get_brand(&state.db, id).await?))
}

#[utoipa::path(
    post, path = "/brands", tag = "catalog",
    request_body = crate::openapi::CreateBrandDoc,
    security(("bearer" = [])),
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"), (status = 409, description = "Name taken"))
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<CreateBrandInput>,
) -> Result<(StatusCode, Json<models::brand::Model>), JsonApiError> {
    let b = brand_service::create_brand(&state.db, &input.name, &input.logo).await?;
    info!(id = %b.id, name = %b.name, "created brand");
    Ok((StatusCode::CREATED, Json(b)))
}

#[utoipa::path(
    put, path = "/brands/{id}", tag = "catalog",
    params(("id" = Uuid, Path, description = "Brand ID")),
    request_body = crate::openapi::UpdateBrandDoc,
    security(("bearer" = [])),
    responses((status = 200, description = "Updated"), (status = 404, description = "Not Found"), (status = 409, description = "Name taken"))
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<UpdateBrandInput>,
) -> Result<Json<models::brand::Model>, JsonApiError> {
    let b = brand_service::update_brand(&state.db, id, input.name.as_deref(), input.logo.as_deref()).await?;
    Ok(Json(b))
}

#[utoipa::path(
    delete, path = "/brands/{id}", tag = "catalog",
    params(("id" = Uuid, Path, description = "Brand ID")),
    security(("bearer" = [])),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"), (status = 409, description = "Brand still has models"))
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<StatusCode, JsonApiError> {
    brand_service::delete_brand(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put, path = "/brands/reorder", tag = "catalog",
    request_body = crate::openapi::ReorderDoc,
    security(("bearer" = [])),
    responses((status = 204, description = "Reordered"), (status = 400, description = "Order is not a permutation of all brands"))
)]
pub async fn reorder(State(state): State<ServerState>, ApiJson(input): ApiJson<ReorderInput>) -> Result<StatusCode, JsonApiError> {
    ordering::reorder(&state.db, Scope::Brands, &input.order).await?;
    Ok(StatusCode::NO_CONTENT)
}
