use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{booking, errors};

pub const MESSAGE_MAX: usize = 5_000;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_message")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_message(message: &str) -> Result<String, errors::ModelError> {
    crate::required_name("message", message, MESSAGE_MAX)
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    email: &str,
    phone: Option<&str>,
    message: &str,
) -> Result<Model, errors::ModelError> {
    let name = crate::required_name("name", name, booking::CUSTOMER_NAME_MAX)?;
    let email = booking::validate_email(email)?;
    let message = validate_message(message)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        email: Set(email),
        phone: Set(booking::optional_text(phone)),
        message: Set(message),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}
