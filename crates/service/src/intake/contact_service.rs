use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use models::contact_message;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

pub async fn create_contact(db: &DatabaseConnection, req: ContactRequest) -> Result<contact_message::Model, ServiceError> {
    let saved = contact_message::create(db, &req.name, &req.email, req.phone.as_deref(), &req.message).await?;
    info!(message_id = %saved.id, "contact_message_created");
    Ok(saved)
}

pub async fn get_contact(db: &DatabaseConnection, id: Uuid) -> Result<contact_message::Model, ServiceError> {
    contact_message::Entity::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found("contact message"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn validates_before_saving() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let bad = create_contact(
            &db,
            ContactRequest { name: "Jan".into(), email: "not-an-email".into(), phone: None, message: "hi".into() },
        )
        .await;
        assert!(matches!(bad, Err(ServiceError::BadRequest(_))));

        let ok = create_contact(
            &db,
            ContactRequest { name: "Jan".into(), email: "jan@example.nl".into(), phone: Some("0612345678".into()), message: "hi".into() },
        )
        .await?;
        assert_eq!(ok.phone.as_deref(), Some("0612345678"));
        Ok(())
    }
}
