use sea_orm::{
    sea_query::{Expr, Func, LikeExpr}, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use serde::Deserialize;
use uuid::Uuid;
use chrono::Utc;
use tracing::{info, instrument};

use models::{brand, device_model};
use models::device_model::DeviceKind;
use crate::errors::ServiceError;
use crate::ordering::{self, Scope};
use super::brand_service;

/// Input for creating a device model under a brand.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewModel {
    pub brand_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub device_kind: Option<String>,
}

impl NewModel {
    pub fn named(brand_id: Uuid, name: &str) -> Self {
        Self { brand_id, name: name.to_string(), year: None, image_url: None, device_kind: None }
    }
}

/// Partial update. A `brand_id` different from the current one moves the
/// model to the end of the target brand's order. An empty `image_url` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPatch {
    pub brand_id: Option<Uuid>,
    pub name: Option<String>,
    pub year: Option<i32>,
    pub image_url: Option<String>,
    pub device_kind: Option<String>,
}

fn parse_kind(kind: Option<&str>) -> Result<DeviceKind, ServiceError> {
    match kind {
        Some(k) => Ok(DeviceKind::parse(k)?),
        None => Ok(DeviceKind::default()),
    }
}

/// `q` is a literal substring; LIKE metacharacters are escaped with `\`.
fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Models ordered by brand position, then by position within the brand.
/// `q` filters on a case-insensitive substring of the model name.
pub async fn list_models(
    db: &DatabaseConnection,
    brand_id: Option<Uuid>,
    q: Option<&str>,
) -> Result<Vec<device_model::Model>, ServiceError> {
    let mut finder = device_model::Entity::find().join(JoinType::InnerJoin, device_model::Relation::Brand.def());
    if let Some(bid) = brand_id { finder = finder.filter(device_model::Column::BrandId.eq(bid)); }
    if let Some(needle) = q.map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
        finder = finder.filter(
            Expr::expr(Func::lower(Expr::col((device_model::Entity, device_model::Column::Name))))
                .like(LikeExpr::new(pattern).escape('\\')),
        );
    }
    let rows = finder
        .order_by_asc(brand::Column::OrderIndex)
        .order_by_asc(device_model::Column::OrderIndex)
        .order_by_asc(device_model::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn get_model<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<device_model::Model, ServiceError> {
    device_model::Entity::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found("model"))
}

/// Create a model at the end of its brand's order.
#[instrument(skip(db, input), fields(brand_id = %input.brand_id))]
pub async fn create_model(db: &DatabaseConnection, input: NewModel) -> Result<device_model::Model, ServiceError> {
    let device_kind = parse_kind(input.device_kind.as_deref())?;
    let txn = db.begin().await?;
    brand_service::get_brand(&txn, input.brand_id).await?;
    let order_index = ordering::next_index(&txn, Scope::Models(input.brand_id)).await?;
    let created = device_model::create(
        &txn,
        device_model::NewDeviceModel {
            brand_id: input.brand_id,
            name: &input.name,
            year: input.year,
            image_url: input.image_url.as_deref(),
            device_kind,
            order_index,
        },
    )
    .await?;
    txn.commit().await?;
    info!(model_id = %created.id, order_index, "model_created");
    Ok(created)
}

#[instrument(skip(db, patch))]
pub async fn update_model(db: &DatabaseConnection, id: Uuid, patch: ModelPatch) -> Result<device_model::Model, ServiceError> {
    // validate everything before the first write
    let name = patch.name.as_deref().map(device_model::validate_name).transpose()?;
    let year = device_model::validate_year(patch.year)?;
    let image_url = patch.image_url.as_deref().map(|u| device_model::validate_image_url(Some(u))).transpose()?;
    let device_kind = patch.device_kind.as_deref().map(DeviceKind::parse).transpose()?;

    let txn = db.begin().await?;
    let existing = get_model(&txn, id).await?;
    let old_brand = existing.brand_id;
    let mut am: device_model::ActiveModel = existing.into();

    let moved_to = patch.brand_id.filter(|b| *b != old_brand);
    if let Some(target) = moved_to {
        brand_service::get_brand(&txn, target).await?;
        am.brand_id = Set(target);
        am.order_index = Set(ordering::next_index(&txn, Scope::Models(target)).await?);
    }
    if let Some(n) = name { am.name = Set(n); }
    if year.is_some() { am.year = Set(year); }
    if let Some(u) = image_url { am.image_url = Set(u); }
    if let Some(k) = device_kind { am.device_kind = Set(k); }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(&txn).await?;

    if moved_to.is_some() {
        ordering::compact(&txn, Scope::Models(old_brand)).await?;
    }
    txn.commit().await?;
    match moved_to {
        Some(target) => info!(model_id = %id, from = %old_brand, to = %target, order_index = updated.order_index, "model_moved"),
        None => info!(model_id = %id, "model_updated"),
    }
    Ok(updated)
}

/// Delete a model; its overrides go with it and the brand order is compacted.
#[instrument(skip(db))]
pub async fn delete_model(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    let existing = get_model(&txn, id).await?;
    models::price_override::Entity::delete_many()
        .filter(models::price_override::Column::ModelId.eq(id))
        .exec(&txn)
        .await?;
    device_model::Entity::delete_by_id(id).exec(&txn).await?;
    ordering::compact(&txn, Scope::Models(existing.brand_id)).await?;
    txn.commit().await?;
    info!(model_id = %id, brand_id = %existing.brand_id, "model_deleted");
    Ok(())
}
