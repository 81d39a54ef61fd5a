use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

pub const NAME_MAX: usize = 128;
pub const ICON_MAX: usize = 64;
pub const DURATION_MAX_MINUTES: i32 = 1440;

/// A repair service shared by every device model. Carries no price; prices
/// are per model (see `price_override`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "repair_type")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub icon: String,
    pub order_index: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<String, errors::ModelError> {
    crate::required_name("repair type name", name, NAME_MAX)
}

pub fn validate_duration(minutes: Option<i32>) -> Result<Option<i32>, errors::ModelError> {
    match minutes {
        Some(m) if !(0..=DURATION_MAX_MINUTES).contains(&m) => {
            Err(errors::ModelError::Validation(format!("durationMinutes must be within 0..={DURATION_MAX_MINUTES}")))
        }
        other => Ok(other),
    }
}

pub fn validate_icon(icon: &str) -> Result<String, errors::ModelError> {
    let icon = icon.trim();
    if icon.chars().count() > ICON_MAX {
        return Err(errors::ModelError::Validation(format!("icon longer than {ICON_MAX} characters")));
    }
    Ok(icon.to_string())
}

/// Blank descriptions collapse to `None`.
pub fn normalize_description(description: Option<&str>) -> Option<String> {
    description.map(str::trim).filter(|d| !d.is_empty()).map(str::to_string)
}

pub struct NewRepairType<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub duration_minutes: Option<i32>,
    pub icon: &'a str,
    pub order_index: i32,
}

pub async fn create<C: ConnectionTrait>(db: &C, input: NewRepairType<'_>) -> Result<Model, errors::ModelError> {
    let name = validate_name(input.name)?;
    let duration_minutes = validate_duration(input.duration_minutes)?;
    let icon = validate_icon(input.icon)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        description: Set(normalize_description(input.description)),
        duration_minutes: Set(duration_minutes),
        icon: Set(icon),
        order_index: Set(input.order_index),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}
