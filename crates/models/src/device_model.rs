use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{brand, errors};

pub const NAME_MAX: usize = 128;
pub const IMAGE_URL_MAX: usize = 512;
pub const YEAR_MIN: i32 = 1900;
pub const YEAR_MAX: i32 = 2100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, Default)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    #[default]
    #[sea_orm(string_value = "phone")]
    Phone,
    #[sea_orm(string_value = "tablet")]
    Tablet,
    #[sea_orm(string_value = "other")]
    Other,
}

impl DeviceKind {
    pub fn parse(s: &str) -> Result<Self, errors::ModelError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phone" => Ok(Self::Phone),
            "tablet" => Ok(Self::Tablet),
            "other" => Ok(Self::Other),
            other => Err(errors::ModelError::Validation(format!("unknown device kind '{other}'"))),
        }
    }
}

/// A concrete device under a brand. Named `device_model` to keep it apart
/// from SeaORM's own `Model` naming.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "device_model")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub brand_id: Uuid,
    pub name: String,
    pub year: Option<i32>,
    pub image_url: Option<String>,
    pub device_kind: DeviceKind,
    pub order_index: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Brand }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Brand => Entity::belongs_to(brand::Entity).from(Column::BrandId).to(brand::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<String, errors::ModelError> {
    crate::required_name("model name", name, NAME_MAX)
}

pub fn validate_year(year: Option<i32>) -> Result<Option<i32>, errors::ModelError> {
    match year {
        Some(y) if !(YEAR_MIN..=YEAR_MAX).contains(&y) => {
            Err(errors::ModelError::Validation(format!("year must be within {YEAR_MIN}..={YEAR_MAX}")))
        }
        other => Ok(other),
    }
}

/// Blank image URLs collapse to `None`.
pub fn validate_image_url(url: Option<&str>) -> Result<Option<String>, errors::ModelError> {
    let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) else { return Ok(None) };
    if url.chars().count() > IMAGE_URL_MAX {
        return Err(errors::ModelError::Validation(format!("imageUrl longer than {IMAGE_URL_MAX} characters")));
    }
    Ok(Some(url.to_string()))
}

pub struct NewDeviceModel<'a> {
    pub brand_id: Uuid,
    pub name: &'a str,
    pub year: Option<i32>,
    pub image_url: Option<&'a str>,
    pub device_kind: DeviceKind,
    pub order_index: i32,
}

pub async fn create<C: ConnectionTrait>(db: &C, input: NewDeviceModel<'_>) -> Result<Model, errors::ModelError> {
    let name = validate_name(input.name)?;
    let year = validate_year(input.year)?;
    let image_url = validate_image_url(input.image_url)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        brand_id: Set(input.brand_id),
        name: Set(name),
        year: Set(year),
        image_url: Set(image_url),
        device_kind: Set(input.device_kind),
        order_index: Set(input.order_index),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}
