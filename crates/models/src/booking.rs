use sea_orm::{entity::prelude::*, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{device_model, errors};

pub const CUSTOMER_NAME_MAX: usize = 128;
pub const EMAIL_MAX: usize = 256;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub model_id: Option<Uuid>,
    pub model_name: String,
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub preferred_date: Option<String>,
    pub notes: Option<String>,
    pub total_price: Option<f64>,
    pub price_on_request: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { DeviceModel }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::DeviceModel => Entity::belongs_to(device_model::Entity)
                .from(Column::ModelId)
                .to(device_model::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_customer_name(name: &str) -> Result<String, errors::ModelError> {
    crate::required_name("customer name", name, CUSTOMER_NAME_MAX)
}

pub fn validate_email(email: &str) -> Result<String, errors::ModelError> {
    let email = email.trim();
    if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    if email.len() > EMAIL_MAX {
        return Err(errors::ModelError::Validation(format!("email longer than {EMAIL_MAX} characters")));
    }
    Ok(email.to_string())
}

/// Blank optional text collapses to `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

pub struct NewBooking<'a> {
    pub model_id: Uuid,
    pub model_name: &'a str,
    pub customer_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub preferred_date: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub total_price: Option<f64>,
    pub price_on_request: bool,
}

/// Validate and build an unsaved booking row.
pub fn new_active(input: NewBooking<'_>) -> Result<ActiveModel, errors::ModelError> {
    let customer_name = validate_customer_name(input.customer_name)?;
    let email = validate_email(input.email)?;
    Ok(ActiveModel {
        id: Set(Uuid::new_v4()),
        model_id: Set(Some(input.model_id)),
        model_name: Set(input.model_name.to_string()),
        customer_name: Set(customer_name),
        email: Set(email),
        phone: Set(optional_text(input.phone)),
        preferred_date: Set(optional_text(input.preferred_date)),
        notes: Set(optional_text(input.notes)),
        total_price: Set(input.total_price),
        price_on_request: Set(input.price_on_request),
        created_at: Set(Utc::now().into()),
    })
}
