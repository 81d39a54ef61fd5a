use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};

use super::memory_db;
use crate::{brand, contact_message, device_model, price_override, repair_type};

#[tokio::test]
async fn catalog_rows_round_trip() -> Result<(), anyhow::Error> {
    let db = memory_db().await?;

    let b = brand::create(&db, "Apple", "apple.svg", 0).await?;
    let m = device_model::create(
        &db,
        device_model::NewDeviceModel {
            brand_id: b.id,
            name: "iPhone 15",
            year: Some(2023),
            image_url: None,
            device_kind: device_model::DeviceKind::Phone,
            order_index: 0,
        },
    )
    .await?;
    let r = repair_type::create(
        &db,
        repair_type::NewRepairType { name: "Screen", description: Some(" "), duration_minutes: Some(60), icon: "screen", order_index: 0 },
    )
    .await?;
    assert_eq!(r.description, None);

    price_override::new_active(m.id, r.id, Some(199.0), false).insert(&db).await?;

    let fetched = device_model::Entity::find_by_id(m.id).one(&db).await?.expect("model");
    assert_eq!(fetched.brand_id, b.id);
    assert_eq!(fetched.device_kind, device_model::DeviceKind::Phone);

    let overrides = price_override::Entity::find()
        .filter(price_override::Column::ModelId.eq(m.id))
        .all(&db)
        .await?;
    assert_eq!(overrides.len(), 1);
    assert_eq!(overrides[0].price, Some(199.0));
    Ok(())
}

#[tokio::test]
async fn deleting_model_cascades_overrides() -> Result<(), anyhow::Error> {
    let db = memory_db().await?;
    let b = brand::create(&db, "Samsung", "", 0).await?;
    let m = device_model::create(
        &db,
        device_model::NewDeviceModel {
            brand_id: b.id,
            name: "Galaxy S24",
            year: None,
            image_url: None,
            device_kind: device_model::DeviceKind::Phone,
            order_index: 0,
        },
    )
    .await?;
    let r = repair_type::create(
        &db,
        repair_type::NewRepairType { name: "Battery", description: None, duration_minutes: None, icon: "", order_index: 0 },
    )
    .await?;
    price_override::new_active(m.id, r.id, None, true).insert(&db).await?;

    device_model::Entity::delete_by_id(m.id).exec(&db).await?;
    let left = price_override::Entity::find().all(&db).await?;
    assert!(left.is_empty());
    Ok(())
}

#[tokio::test]
async fn contact_message_requires_body() -> Result<(), anyhow::Error> {
    let db = memory_db().await?;
    assert!(contact_message::create(&db, "Jan", "jan@example.nl", None, "  ").await.is_err());
    let saved = contact_message::create(&db, "Jan", "jan@example.nl", Some(""), "Is my phone ready?").await?;
    assert_eq!(saved.phone, None);
    Ok(())
}
