use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use uuid::Uuid;
use chrono::Utc;
use tracing::{info, instrument};

use models::{price_override, repair_type};
use crate::errors::ServiceError;
use crate::ordering::{self, Scope};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRepair {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<i32>,
    #[serde(default)]
    pub icon: String,
}

impl NewRepair {
    pub fn named(name: &str) -> Self {
        Self { name: name.to_string(), description: None, duration_minutes: None, icon: String::new() }
    }
}

/// Partial update; an empty `description` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub icon: Option<String>,
}

/// Repair types in catalog order.
pub async fn list_repair_types<C: ConnectionTrait>(db: &C) -> Result<Vec<repair_type::Model>, ServiceError> {
    let rows = repair_type::Entity::find()
        .order_by_asc(repair_type::Column::OrderIndex)
        .order_by_asc(repair_type::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn get_repair_type<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<repair_type::Model, ServiceError> {
    repair_type::Entity::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found("repair type"))
}

/// Exact, case-sensitive name lookup.
async fn find_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<repair_type::Model>, ServiceError> {
    let found = repair_type::Entity::find().filter(repair_type::Column::Name.eq(name)).one(db).await?;
    Ok(found)
}

/// Create a repair type at the end of the catalog. Fails with `Conflict`
/// when the exact name is taken.
#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn create_repair_type(db: &DatabaseConnection, input: NewRepair) -> Result<repair_type::Model, ServiceError> {
    let name = repair_type::validate_name(&input.name)?;
    repair_type::validate_duration(input.duration_minutes)?;
    let txn = db.begin().await?;
    if find_by_name(&txn, &name).await?.is_some() {
        return Err(ServiceError::Conflict(format!("repair type '{}' already exists", name)));
    }
    let order_index = ordering::next_index(&txn, Scope::RepairTypes).await?;
    let created = repair_type::create(
        &txn,
        repair_type::NewRepairType {
            name: &name,
            description: input.description.as_deref(),
            duration_minutes: input.duration_minutes,
            icon: &input.icon,
            order_index,
        },
    )
    .await?;
    txn.commit().await?;
    info!(repair_type_id = %created.id, order_index, "repair_type_created");
    Ok(created)
}

/// Renames keep existing overrides since they reference the id.
#[instrument(skip(db, patch))]
pub async fn update_repair_type(db: &DatabaseConnection, id: Uuid, patch: RepairPatch) -> Result<repair_type::Model, ServiceError> {
    let name = patch.name.as_deref().map(repair_type::validate_name).transpose()?;
    let duration = repair_type::validate_duration(patch.duration_minutes)?;
    let icon = patch.icon.as_deref().map(repair_type::validate_icon).transpose()?;

    let txn = db.begin().await?;
    let existing = get_repair_type(&txn, id).await?;
    let mut am: repair_type::ActiveModel = existing.into();
    if let Some(n) = name {
        if let Some(other) = find_by_name(&txn, &n).await? {
            if other.id != id {
                return Err(ServiceError::Conflict(format!("repair type '{}' already exists", n)));
            }
        }
        am.name = Set(n);
    }
    if let Some(d) = patch.description.as_deref() { am.description = Set(repair_type::normalize_description(Some(d))); }
    if duration.is_some() { am.duration_minutes = Set(duration); }
    if let Some(i) = icon { am.icon = Set(i); }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(&txn).await?;
    txn.commit().await?;
    info!(repair_type_id = %id, "repair_type_updated");
    Ok(updated)
}

/// Delete a repair type together with every override pointing at it.
#[instrument(skip(db))]
pub async fn delete_repair_type(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    get_repair_type(&txn, id).await?;
    let removed = price_override::Entity::delete_many()
        .filter(price_override::Column::RepairTypeId.eq(id))
        .exec(&txn)
        .await?;
    repair_type::Entity::delete_by_id(id).exec(&txn).await?;
    ordering::compact(&txn, Scope::RepairTypes).await?;
    txn.commit().await?;
    info!(repair_type_id = %id, overrides_removed = removed.rows_affected, "repair_type_deleted");
    Ok(())
}
