use sea_orm::{entity::prelude::*, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{device_model, repair_type};

/// Model-specific price/visibility for one repair type.
/// `price = None` means "price on request".
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "price_override")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub model_id: Uuid,
    pub repair_type_id: Uuid,
    pub price: Option<f64>,
    pub hidden: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { DeviceModel, RepairType }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::DeviceModel => Entity::belongs_to(device_model::Entity)
                .from(Column::ModelId)
                .to(device_model::Column::Id)
                .into(),
            Relation::RepairType => Entity::belongs_to(repair_type::Entity)
                .from(Column::RepairTypeId)
                .to(repair_type::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Finite and non-negative.
pub fn is_acceptable_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

/// Build an unsaved row; callers insert the whole set in one batch.
pub fn new_active(model_id: Uuid, repair_type_id: Uuid, price: Option<f64>, hidden: bool) -> ActiveModel {
    ActiveModel {
        id: Set(Uuid::new_v4()),
        model_id: Set(model_id),
        repair_type_id: Set(repair_type_id),
        price: Set(price),
        hidden: Set(hidden),
        created_at: Set(Utc::now().into()),
    }
}
