use std::collections::{HashMap, HashSet};

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use common::pagination::Pagination;
use models::{booking, booking_line};
use crate::errors::ServiceError;
use crate::pricing::{resolve_model_repairs, ResolvedModelRepairs, ResolvedRepairEntry};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub model_id: Uuid,
    #[serde(default)]
    pub repair_type_ids: Vec<Uuid>,
    pub customer_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub preferred_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl BookingRequest {
    pub fn new(model_id: Uuid, repair_type_ids: Vec<Uuid>, customer_name: &str, email: &str) -> Self {
        Self {
            model_id,
            repair_type_ids,
            customer_name: customer_name.to_string(),
            email: email.to_string(),
            phone: None,
            preferred_date: None,
            notes: None,
        }
    }
}

/// A booking with its lines in selection order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    #[serde(flatten)]
    pub booking: booking::Model,
    pub lines: Vec<booking_line::Model>,
}

/// Pick the selected, non-hidden entries, keeping request order
/// and dropping repeated ids.
fn select_lines<'a>(resolved: &'a ResolvedModelRepairs, requested: &[Uuid]) -> Result<Vec<&'a ResolvedRepairEntry>, ServiceError> {
    if requested.is_empty() {
        return Err(ServiceError::BadRequest("select at least one repair".into()));
    }
    let mut seen = HashSet::new();
    let mut picked = Vec::new();
    let mut unavailable = Vec::new();
    for id in requested.iter().filter(|id| seen.insert(**id)) {
        match resolved.entry(*id).filter(|e| !e.hidden) {
            Some(e) => picked.push(e),
            None => unavailable.push(id.to_string()),
        }
    }
    if !unavailable.is_empty() {
        return Err(ServiceError::BadRequest(format!("repairs not offered for this model: {}", unavailable.join(", "))));
    }
    Ok(picked)
}

/// Persist a booking with the prices quoted right now.
///
/// The selection is checked against the model's visible repairs inside the
/// same transaction that writes the booking.
#[instrument(skip(db, req), fields(model_id = %req.model_id, repairs = req.repair_type_ids.len()))]
pub async fn create_booking(db: &DatabaseConnection, req: BookingRequest) -> Result<BookingSummary, ServiceError> {
    booking::validate_customer_name(&req.customer_name)?;
    booking::validate_email(&req.email)?;

    let txn = db.begin().await?;
    let resolved = resolve_model_repairs(&txn, req.model_id).await?;
    if resolved.visible().is_empty() {
        return Err(ServiceError::BadRequest(format!("no repairs are offered for '{}'", resolved.model_name)));
    }
    let picked = select_lines(&resolved, &req.repair_type_ids)?;

    let total: f64 = picked.iter().filter_map(|e| e.price).sum();
    let price_on_request = picked.iter().any(|e| e.price.is_none());
    let am = booking::new_active(booking::NewBooking {
        model_id: resolved.model_id,
        model_name: &resolved.model_name,
        customer_name: &req.customer_name,
        email: &req.email,
        phone: req.phone.as_deref(),
        preferred_date: req.preferred_date.as_deref(),
        notes: req.notes.as_deref(),
        total_price: Some(total),
        price_on_request,
    })?;
    let saved = am.insert(&txn).await?;

    let mut lines = Vec::with_capacity(picked.len());
    for (position, e) in picked.iter().enumerate() {
        let position = i32::try_from(position).map_err(|_| ServiceError::BadRequest("too many repairs".into()))?;
        let line = booking_line::new_active(saved.id, e.repair_type_id, &e.name, e.price, position).insert(&txn).await?;
        lines.push(line);
    }
    txn.commit().await?;
    info!(booking_id = %saved.id, lines = lines.len(), total, price_on_request, "booking_created");
    Ok(BookingSummary { booking: saved, lines })
}

async fn attach_lines(db: &DatabaseConnection, bookings: Vec<booking::Model>) -> Result<Vec<BookingSummary>, ServiceError> {
    let ids: Vec<Uuid> = bookings.iter().map(|b| b.id).collect();
    let mut by_booking: HashMap<Uuid, Vec<booking_line::Model>> = HashMap::new();
    if !ids.is_empty() {
        let lines = booking_line::Entity::find()
            .filter(booking_line::Column::BookingId.is_in(ids))
            .order_by_asc(booking_line::Column::Position)
            .all(db)
            .await?;
        for l in lines {
            by_booking.entry(l.booking_id).or_default().push(l);
        }
    }
    Ok(bookings
        .into_iter()
        .map(|b| {
            let lines = by_booking.remove(&b.id).unwrap_or_default();
            BookingSummary { booking: b, lines }
        })
        .collect())
}

/// Newest first.
pub async fn list_bookings(db: &DatabaseConnection, page: Pagination) -> Result<Vec<BookingSummary>, ServiceError> {
    let (index, per_page) = page.normalize();
    let rows = booking::Entity::find()
        .order_by_desc(booking::Column::CreatedAt)
        .offset(index * per_page)
        .limit(per_page)
        .all(db)
        .await?;
    attach_lines(db, rows).await
}

pub async fn get_booking(db: &DatabaseConnection, id: Uuid) -> Result<BookingSummary, ServiceError> {
    let found = booking::Entity::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found("booking"))?;
    let mut summaries = attach_lines(db, vec![found]).await?;
    summaries.pop().ok_or_else(|| ServiceError::not_found("booking"))
}
