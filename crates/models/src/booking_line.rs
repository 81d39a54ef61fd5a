use sea_orm::{entity::prelude::*, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{booking, repair_type};

/// One selected repair on a booking, with the price quoted when booked.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking_line")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub booking_id: Uuid,
    pub repair_type_id: Option<Uuid>,
    pub repair_name: String,
    pub price: Option<f64>,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Booking, RepairType }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Booking => Entity::belongs_to(booking::Entity)
                .from(Column::BookingId)
                .to(booking::Column::Id)
                .into(),
            Relation::RepairType => Entity::belongs_to(repair_type::Entity)
                .from(Column::RepairTypeId)
                .to(repair_type::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn new_active(booking_id: Uuid, repair_type_id: Uuid, repair_name: &str, price: Option<f64>, position: i32) -> ActiveModel {
    ActiveModel {
        id: Set(Uuid::new_v4()),
        booking_id: Set(booking_id),
        repair_type_id: Set(Some(repair_type_id)),
        repair_name: Set(repair_name.to_string()),
        price: Set(price),
        position: Set(position),
    }
}
