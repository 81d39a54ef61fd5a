use std::collections::HashMap;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

use models::price_override;
use crate::catalog::{model_service, repair_type_service};
use crate::errors::ServiceError;

/// One row of the admin price form: `{ "typeNaam": "Battery", "prijs": 49 }`.
///
/// `prijs` arrives as a number, a numeric string (decimal comma allowed),
/// blank or null.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairPriceEntry {
    #[serde(alias = "typeName")]
    pub type_naam: String,
    #[serde(default, alias = "price")]
    pub prijs: Value,
    #[serde(default, alias = "hidden")]
    pub verborgen: bool,
}

impl RepairPriceEntry {
    pub fn priced(type_naam: &str, prijs: f64) -> Self {
        Self { type_naam: type_naam.to_string(), prijs: Value::from(prijs), verborgen: false }
    }
}

/// Finite, non-negative price from a loosely typed form value.
pub fn parse_price(raw: &Value) -> Option<f64> {
    let price = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok()?,
        _ => return None,
    };
    price_override::is_acceptable_price(price).then_some(price)
}

/// Keep priced rows and hidden rows; a hidden row without a usable price is
/// stored as "on request". Later duplicates of a name replace earlier ones.
fn accepted_rows(entries: &[RepairPriceEntry]) -> Vec<(String, Option<f64>, bool)> {
    let mut order: Vec<String> = Vec::new();
    let mut rows: HashMap<String, (Option<f64>, bool)> = HashMap::new();
    for e in entries {
        let price = parse_price(&e.prijs);
        if price.is_none() && !e.verborgen {
            continue;
        }
        let name = e.type_naam.trim().to_string();
        if rows.insert(name.clone(), (price, e.verborgen)).is_none() {
            order.push(name);
        }
    }
    order
        .into_iter()
        .filter_map(|name| rows.remove(&name).map(|(price, hidden)| (name, price, hidden)))
        .collect()
}

/// Replace the whole override set of a model.
///
/// Names are resolved to repair type ids (exact match) before anything is
/// written; unknown names fail the request with `BadRequest`. The delete and
/// the insert run in one transaction.
#[instrument(skip(db, entries), fields(submitted = entries.len()))]
pub async fn set_model_repair_prices(
    db: &DatabaseConnection,
    model_id: Uuid,
    entries: &[RepairPriceEntry],
) -> Result<(), ServiceError> {
    let rows = accepted_rows(entries);

    let txn = db.begin().await?;
    model_service::get_model(&txn, model_id).await?;
    let ids_by_name: HashMap<String, Uuid> = repair_type_service::list_repair_types(&txn)
        .await?
        .into_iter()
        .map(|rt| (rt.name, rt.id))
        .collect();

    let unknown: Vec<&str> = rows.iter().filter(|(name, ..)| !ids_by_name.contains_key(name)).map(|(name, ..)| name.as_str()).collect();
    if !unknown.is_empty() {
        return Err(ServiceError::BadRequest(format!("unknown repair types: {}", unknown.join(", "))));
    }

    let fresh: Vec<price_override::ActiveModel> = rows
        .iter()
        .filter_map(|(name, price, hidden)| {
            ids_by_name.get(name).map(|rt_id| price_override::new_active(model_id, *rt_id, *price, *hidden))
        })
        .collect();
    let stored = fresh.len();

    price_override::Entity::delete_many()
        .filter(price_override::Column::ModelId.eq(model_id))
        .exec(&txn)
        .await?;
    if !fresh.is_empty() {
        price_override::Entity::insert_many(fresh).exec_without_returning(&txn).await?;
    }
    txn.commit().await?;
    info!(model_id = %model_id, stored, "model_prices_replaced");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::catalog::brand_service::create_brand;
    use crate::catalog::model_service::{create_model, NewModel};
    use crate::catalog::repair_type_service::{create_repair_type, delete_repair_type, update_repair_type, NewRepair, RepairPatch};
    use crate::pricing::resolve_model_repairs;
    use crate::test_support::get_db;

    fn entry(v: serde_json::Value) -> RepairPriceEntry {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn price_parsing() {
        assert_eq!(parse_price(&json!(49)), Some(49.0));
        assert_eq!(parse_price(&json!("49,95")), Some(49.95));
        assert_eq!(parse_price(&json!(" 12.5 ")), Some(12.5));
        assert_eq!(parse_price(&json!("")), None);
        assert_eq!(parse_price(&json!("abc")), None);
        assert_eq!(parse_price(&json!(-1)), None);
        assert_eq!(parse_price(&json!(null)), None);
        assert_eq!(parse_price(&json!("inf")), None);
    }

    #[test]
    fn invalid_rows_are_dropped_and_last_duplicate_wins() {
        let rows = accepted_rows(&[
            entry(json!({"typeNaam": "Screen", "prijs": 100})),
            entry(json!({"typeNaam": "Battery", "prijs": ""})),
            entry(json!({"typeNaam": "Camera", "prijs": -5})),
            entry(json!({"typeNaam": "Port", "verborgen": true})),
            entry(json!({"typeNaam": "Screen", "prijs": "120"})),
        ]);
        assert_eq!(
            rows,
            vec![("Screen".to_string(), Some(120.0), false), ("Port".to_string(), None, true)]
        );
    }

    #[tokio::test]
    async fn end_to_end_price_then_resolve() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let acme = create_brand(&db, "Acme", "").await?;
        let x1 = create_model(&db, NewModel::named(acme.id, "X1")).await?;
        let battery = create_repair_type(&db, NewRepair::named("Battery")).await?;

        let before = resolve_model_repairs(&db, x1.id).await?;
        assert_eq!(before.entries.len(), 1);
        assert_eq!(before.entries[0].repair_type_id, battery.id);
        assert_eq!((before.entries[0].price, before.entries[0].hidden), (None, false));

        set_model_repair_prices(&db, x1.id, &[RepairPriceEntry::priced("Battery", 49.0)]).await?;

        let after = resolve_model_repairs(&db, x1.id).await?;
        assert_eq!(after.entries[0].price, Some(49.0));
        Ok(())
    }

    #[tokio::test]
    async fn omitted_repair_reverts_to_null() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let brand = create_brand(&db, "Apple", "").await?;
        let m = create_model(&db, NewModel::named(brand.id, "iPhone 15")).await?;
        create_repair_type(&db, NewRepair::named("Screen")).await?;
        create_repair_type(&db, NewRepair::named("Battery")).await?;

        set_model_repair_prices(&db, m.id, &[RepairPriceEntry::priced("Screen", 199.0), RepairPriceEntry::priced("Battery", 79.0)]).await?;
        set_model_repair_prices(&db, m.id, &[RepairPriceEntry::priced("Battery", 89.0)]).await?;

        let resolved = resolve_model_repairs(&db, m.id).await?;
        let prices: Vec<_> = resolved.entries.iter().map(|e| (e.name.as_str(), e.price)).collect();
        assert_eq!(prices, vec![("Screen", None), ("Battery", Some(89.0))]);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_names_are_rejected_without_writing() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let brand = create_brand(&db, "Apple", "").await?;
        let m = create_model(&db, NewModel::named(brand.id, "iPhone 15")).await?;
        create_repair_type(&db, NewRepair::named("Screen")).await?;
        set_model_repair_prices(&db, m.id, &[RepairPriceEntry::priced("Screen", 150.0)]).await?;

        let res = set_model_repair_prices(&db, m.id, &[RepairPriceEntry::priced("screen", 99.0), RepairPriceEntry::priced("Lens", 20.0)]).await;
        match res {
            Err(ServiceError::BadRequest(msg)) => {
                assert!(msg.contains("screen"));
                assert!(msg.contains("Lens"));
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }

        let resolved = resolve_model_repairs(&db, m.id).await?;
        assert_eq!(resolved.entries[0].price, Some(150.0));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_model_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let res = set_model_repair_prices(&db, Uuid::new_v4(), &[]).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert!(matches!(resolve_model_repairs(&db, Uuid::new_v4()).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn overrides_follow_renames_and_deletes() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let brand = create_brand(&db, "Apple", "").await?;
        let m = create_model(&db, NewModel::named(brand.id, "iPhone 15")).await?;
        let screen = create_repair_type(&db, NewRepair::named("Screen")).await?;
        let battery = create_repair_type(&db, NewRepair::named("Battery")).await?;
        set_model_repair_prices(
            &db,
            m.id,
            &[
                RepairPriceEntry::priced("Screen", 199.0),
                entry(json!({"typeNaam": "Battery", "prijs": 59, "verborgen": true})),
            ],
        )
        .await?;

        update_repair_type(&db, screen.id, RepairPatch { name: Some("Display".into()), ..Default::default() }).await?;
        let renamed = resolve_model_repairs(&db, m.id).await?;
        assert_eq!(renamed.entries[0].name, "Display");
        assert_eq!(renamed.entries[0].price, Some(199.0));
        assert!(renamed.entries[1].hidden);
        assert_eq!(renamed.visible().len(), 1);

        delete_repair_type(&db, battery.id).await?;
        let after = resolve_model_repairs(&db, m.id).await?;
        assert_eq!(after.entries.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn entry_count_tracks_catalog_size() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let brand = create_brand(&db, "Apple", "").await?;
        let a = create_model(&db, NewModel::named(brand.id, "iPhone 14")).await?;
        let b = create_model(&db, NewModel::named(brand.id, "iPhone 15")).await?;
        for (i, name) in ["Screen", "Battery", "Camera", "Port"].iter().enumerate() {
            create_repair_type(&db, NewRepair::named(name)).await?;
            let count = repair_type_service::list_repair_types(&db).await?.len();
            assert_eq!(count, i + 1);
            for model in [&a, &b] {
                assert_eq!(resolve_model_repairs(&db, model.id).await?.entries.len(), count);
            }
        }
        Ok(())
    }
}
