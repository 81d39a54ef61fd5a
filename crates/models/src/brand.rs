use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

pub const NAME_MAX: usize = 128;
pub const LOGO_MAX: usize = 512;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "brand")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub logo: String,
    pub order_index: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<String, errors::ModelError> {
    crate::required_name("brand name", name, NAME_MAX)
}

/// Logo is a URL or a short glyph; empty means "no logo".
pub fn validate_logo(logo: &str) -> Result<String, errors::ModelError> {
    let logo = logo.trim();
    if logo.chars().count() > LOGO_MAX {
        return Err(errors::ModelError::Validation(format!("logo longer than {LOGO_MAX} characters")));
    }
    Ok(logo.to_string())
}

/// Case-insensitive comparison used for the brand-name uniqueness rule.
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str, logo: &str, order_index: i32) -> Result<Model, errors::ModelError> {
    let name = validate_name(name)?;
    let logo = validate_logo(logo)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        logo: Set(logo),
        order_index: Set(order_index),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}
