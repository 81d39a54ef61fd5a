use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;
use chrono::Utc;
use tracing::{info, instrument};

use models::{brand, device_model};
use crate::errors::ServiceError;
use crate::ordering::{self, Scope};

/// Brands in display order.
pub async fn list_brands(db: &DatabaseConnection) -> Result<Vec<brand::Model>, ServiceError> {
    let rows = brand::Entity::find()
        .order_by_asc(brand::Column::OrderIndex)
        .order_by_asc(brand::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn get_brand<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<brand::Model, ServiceError> {
    brand::Entity::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found("brand"))
}

/// Names are unique ignoring case; `exclude` skips the brand being renamed.
async fn ensure_unique_name<C: ConnectionTrait>(db: &C, name: &str, exclude: Option<Uuid>) -> Result<(), ServiceError> {
    let taken = brand::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .any(|b| Some(b.id) != exclude && brand::same_name(&b.name, name));
    if taken {
        return Err(ServiceError::Conflict(format!("brand '{}' already exists", name)));
    }
    Ok(())
}

/// Create a brand at the end of the global brand order.
#[instrument(skip(db, logo))]
pub async fn create_brand(db: &DatabaseConnection, name: &str, logo: &str) -> Result<brand::Model, ServiceError> {
    let name = brand::validate_name(name)?;
    let txn = db.begin().await?;
    ensure_unique_name(&txn, &name, None).await?;
    let order_index = ordering::next_index(&txn, Scope::Brands).await?;
    let created = brand::create(&txn, &name, logo, order_index).await?;
    txn.commit().await?;
    info!(brand_id = %created.id, order_index, "brand_created");
    Ok(created)
}

#[instrument(skip(db, logo))]
pub async fn update_brand(
    db: &DatabaseConnection,
    id: Uuid,
    name: Option<&str>,
    logo: Option<&str>,
) -> Result<brand::Model, ServiceError> {
    let txn = db.begin().await?;
    let existing = get_brand(&txn, id).await?;
    let mut am: brand::ActiveModel = existing.into();
    if let Some(n) = name {
        let n = brand::validate_name(n)?;
        ensure_unique_name(&txn, &n, Some(id)).await?;
        am.name = Set(n);
    }
    if let Some(l) = logo { am.logo = Set(brand::validate_logo(l)?); }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(&txn).await?;
    txn.commit().await?;
    info!(brand_id = %id, "brand_updated");
    Ok(updated)
}

/// Delete a brand that no longer has models; the brand order is compacted.
#[instrument(skip(db))]
pub async fn delete_brand(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    get_brand(&txn, id).await?;
    let models = device_model::Entity::find()
        .filter(device_model::Column::BrandId.eq(id))
        .count(&txn)
        .await?;
    if models > 0 {
        return Err(ServiceError::Conflict(format!("brand still has {} model(s)", models)));
    }
    brand::Entity::delete_by_id(id).exec(&txn).await?;
    ordering::compact(&txn, Scope::Brands).await?;
    txn.commit().await?;
    info!(brand_id = %id, "brand_deleted");
    Ok(())
}
