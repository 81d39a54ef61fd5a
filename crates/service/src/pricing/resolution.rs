use std::collections::HashMap;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use serde::Serialize;
use uuid::Uuid;

use models::{price_override, repair_type};
use crate::catalog::{model_service, repair_type_service};
use crate::errors::ServiceError;

/// One catalog repair priced for a specific model. `price: None` means
/// "price on request".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRepairEntry {
    pub repair_type_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub icon: String,
    pub price: Option<f64>,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedModelRepairs {
    pub model_id: Uuid,
    pub model_name: String,
    pub image_url: Option<String>,
    pub entries: Vec<ResolvedRepairEntry>,
}

impl ResolvedModelRepairs {
    /// Entries a customer may see and book.
    pub fn visible(&self) -> Vec<&ResolvedRepairEntry> {
        self.entries.iter().filter(|e| !e.hidden).collect()
    }

    pub fn into_visible(mut self) -> Self {
        self.entries.retain(|e| !e.hidden);
        self
    }

    pub fn entry(&self, repair_type_id: Uuid) -> Option<&ResolvedRepairEntry> {
        self.entries.iter().find(|e| e.repair_type_id == repair_type_id)
    }
}

/// Merge the ordered catalog with a model's overrides. Emits exactly one
/// entry per catalog row, in catalog order; overrides for repair types not
/// in `catalog` are ignored.
pub fn merge(catalog: &[repair_type::Model], overrides: &[price_override::Model]) -> Vec<ResolvedRepairEntry> {
    let by_type: HashMap<Uuid, &price_override::Model> = overrides.iter().map(|o| (o.repair_type_id, o)).collect();
    catalog
        .iter()
        .map(|rt| {
            let ov = by_type.get(&rt.id);
            ResolvedRepairEntry {
                repair_type_id: rt.id,
                name: rt.name.clone(),
                description: rt.description.clone(),
                duration_minutes: rt.duration_minutes,
                icon: rt.icon.clone(),
                price: ov.and_then(|o| o.price),
                hidden: ov.map(|o| o.hidden).unwrap_or(false),
            }
        })
        .collect()
}

/// Resolve the priced repair list of a model from current committed state.
/// Nothing is cached; every call reads the catalog and the overrides again.
pub async fn resolve_model_repairs<C: ConnectionTrait>(db: &C, model_id: Uuid) -> Result<ResolvedModelRepairs, ServiceError> {
    let model = model_service::get_model(db, model_id).await?;
    let catalog = repair_type_service::list_repair_types(db).await?;
    let overrides = price_override::Entity::find()
        .filter(price_override::Column::ModelId.eq(model_id))
        .all(db)
        .await?;
    Ok(ResolvedModelRepairs {
        model_id: model.id,
        model_name: model.name,
        image_url: model.image_url,
        entries: merge(&catalog, &overrides),
    })
}
