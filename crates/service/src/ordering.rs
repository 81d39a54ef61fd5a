//! Ordering index: explicit display positions per scope.
//!
//! Brands and repair types share one global sequence each; device models are
//! ordered per brand. After every successful write the `order_index` values of
//! a scope form the dense permutation `0..n-1`.

use std::collections::HashSet;

use sea_orm::{
    sea_query::Expr, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;

use models::{brand, device_model, repair_type};

use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Brands,
    Models(Uuid),
    RepairTypes,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Brands => write!(f, "brands"),
            Scope::Models(brand_id) => write!(f, "models({brand_id})"),
            Scope::RepairTypes => write!(f, "repair_types"),
        }
    }
}

/// Ids of a scope in current display order.
pub async fn scope_ids<C: ConnectionTrait>(db: &C, scope: Scope) -> Result<Vec<Uuid>, ServiceError> {
    let ids = match scope {
        Scope::Brands => {
            brand::Entity::find()
                .select_only()
                .column(brand::Column::Id)
                .order_by_asc(brand::Column::OrderIndex)
                .order_by_asc(brand::Column::CreatedAt)
                .into_tuple::<Uuid>()
                .all(db)
                .await?
        }
        Scope::Models(brand_id) => {
            device_model::Entity::find()
                .select_only()
                .column(device_model::Column::Id)
                .filter(device_model::Column::BrandId.eq(brand_id))
                .order_by_asc(device_model::Column::OrderIndex)
                .order_by_asc(device_model::Column::CreatedAt)
                .into_tuple::<Uuid>()
                .all(db)
                .await?
        }
        Scope::RepairTypes => {
            repair_type::Entity::find()
                .select_only()
                .column(repair_type::Column::Id)
                .order_by_asc(repair_type::Column::OrderIndex)
                .order_by_asc(repair_type::Column::CreatedAt)
                .into_tuple::<Uuid>()
                .all(db)
                .await?
        }
    };
    Ok(ids)
}

/// `max + 1` within the scope, `0` when empty.
pub async fn next_index<C: ConnectionTrait>(db: &C, scope: Scope) -> Result<i32, ServiceError> {
    let max = match scope {
        Scope::Brands => brand::Entity::find()
            .order_by_desc(brand::Column::OrderIndex)
            .one(db)
            .await?
            .map(|m| m.order_index),
        Scope::Models(brand_id) => device_model::Entity::find()
            .filter(device_model::Column::BrandId.eq(brand_id))
            .order_by_desc(device_model::Column::OrderIndex)
            .one(db)
            .await?
            .map(|m| m.order_index),
        Scope::RepairTypes => repair_type::Entity::find()
            .order_by_desc(repair_type::Column::OrderIndex)
            .one(db)
            .await?
            .map(|m| m.order_index),
    };
    Ok(max.map(|m| m + 1).unwrap_or(0))
}

async fn set_index<C: ConnectionTrait>(db: &C, scope: Scope, id: Uuid, index: i32) -> Result<(), ServiceError> {
    match scope {
        Scope::Brands => {
            brand::Entity::update_many()
                .col_expr(brand::Column::OrderIndex, Expr::value(index))
                .filter(brand::Column::Id.eq(id))
                .exec(db)
                .await?;
        }
        Scope::Models(_) => {
            device_model::Entity::update_many()
                .col_expr(device_model::Column::OrderIndex, Expr::value(index))
                .filter(device_model::Column::Id.eq(id))
                .exec(db)
                .await?;
        }
        Scope::RepairTypes => {
            repair_type::Entity::update_many()
                .col_expr(repair_type::Column::OrderIndex, Expr::value(index))
                .filter(repair_type::Column::Id.eq(id))
                .exec(db)
                .await?;
        }
    }
    Ok(())
}

async fn assign<C: ConnectionTrait>(db: &C, scope: Scope, ordered: &[Uuid]) -> Result<(), ServiceError> {
    for (index, id) in ordered.iter().enumerate() {
        let index = i32::try_from(index).map_err(|_| ServiceError::BadRequest("scope too large".into()))?;
        set_index(db, scope, *id, index).await?;
    }
    Ok(())
}

/// Re-derive `0..n-1` from the current relative order. Run after deletes and
/// after a model leaves a brand; callers pass their open transaction.
pub async fn compact<C: ConnectionTrait>(db: &C, scope: Scope) -> Result<(), ServiceError> {
    let ids = scope_ids(db, scope).await?;
    assign(db, scope, &ids).await
}

/// Check that `ordered` is exactly the member set of the scope.
fn check_permutation(current: &[Uuid], ordered: &[Uuid]) -> Result<(), ServiceError> {
    let mut seen = HashSet::with_capacity(ordered.len());
    let duplicates: Vec<String> = ordered.iter().filter(|id| !seen.insert(**id)).map(|id| id.to_string()).collect();
    if !duplicates.is_empty() {
        return Err(ServiceError::BadRequest(format!("duplicate ids in order: {}", duplicates.join(", "))));
    }
    let members: HashSet<Uuid> = current.iter().copied().collect();
    let unknown: Vec<String> = ordered.iter().filter(|id| !members.contains(id)).map(|id| id.to_string()).collect();
    if !unknown.is_empty() {
        return Err(ServiceError::BadRequest(format!("ids not in scope: {}", unknown.join(", "))));
    }
    let missing: Vec<String> = current.iter().filter(|id| !seen.contains(id)).map(|id| id.to_string()).collect();
    if !missing.is_empty() {
        return Err(ServiceError::BadRequest(format!("order is missing ids: {}", missing.join(", "))));
    }
    Ok(())
}

/// Replace the order of a whole scope in one transaction.
///
/// `ordered` must contain every current member exactly once; otherwise
/// `BadRequest` is returned and nothing is written. Concurrent reorders of the
/// same scope are not merged: the last transaction to commit wins in full.
#[instrument(skip(db, ordered), fields(scope = %scope, len = ordered.len()))]
pub async fn reorder(db: &DatabaseConnection, scope: Scope, ordered: &[Uuid]) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    if let Scope::Models(brand_id) = scope {
        if brand::Entity::find_by_id(brand_id).one(&txn).await?.is_none() {
            return Err(ServiceError::not_found("brand"));
        }
    }
    let current = scope_ids(&txn, scope).await?;
    check_permutation(&current, ordered)?;
    assign(&txn, scope, ordered).await?;
    txn.commit().await?;
    info!(scope = %scope, count = ordered.len(), "scope_reordered");
    Ok(())
}
