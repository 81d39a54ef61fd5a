//! Customer intake: bookings and contact messages.
//!
//! The selection (model plus repairs) travels in the request itself; the
//! server keeps no per-visitor state between form screens.

pub mod booking_service;
pub mod contact_service;

use sea_orm::DatabaseConnection;
use tracing::instrument;

use crate::errors::ServiceError;
use crate::notify::{Notification, NotificationDispatcher};
use booking_service::{BookingRequest, BookingSummary};
use contact_service::ContactRequest;

/// Persists intake submissions, then hands a notification to the dispatcher.
#[derive(Clone)]
pub struct IntakeService {
    db: DatabaseConnection,
    dispatcher: NotificationDispatcher,
}

impl IntakeService {
    pub fn new(db: DatabaseConnection, dispatcher: NotificationDispatcher) -> Self { Self { db, dispatcher } }

    #[instrument(skip_all, fields(model_id = %req.model_id))]
    pub async fn submit_booking(&self, req: BookingRequest) -> Result<BookingSummary, ServiceError> {
        let summary = booking_service::create_booking(&self.db, req).await?;
        self.dispatcher.dispatch(Notification::from(&summary));
        Ok(summary)
    }

    #[instrument(skip_all)]
    pub async fn submit_contact(&self, req: ContactRequest) -> Result<models::contact_message::Model, ServiceError> {
        let saved = contact_service::create_contact(&self.db, req).await?;
        self.dispatcher.dispatch(Notification::ContactReceived {
            message_id: saved.id,
            name: saved.name.clone(),
            email: saved.email.clone(),
        });
        Ok(saved)
    }
}

impl From<&BookingSummary> for Notification {
    fn from(s: &BookingSummary) -> Self {
        Notification::BookingReceived {
            booking_id: s.booking.id,
            model_name: s.booking.model_name.clone(),
            customer_name: s.booking.customer_name.clone(),
            email: s.booking.email.clone(),
            repairs: s.lines.iter().map(|l| l.repair_name.clone()).collect(),
            total_price: s.booking.total_price,
            price_on_request: s.booking.price_on_request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use crate::catalog::brand_service::create_brand;
    use crate::catalog::model_service::{create_model, NewModel};
    use crate::catalog::repair_type_service::{create_repair_type, NewRepair};
    use crate::notify::{Notifier, NotifyError, RetryPolicy};
    use crate::pricing::{set_model_repair_prices, RepairPriceEntry};
    use crate::test_support::get_db;

    struct Channel(mpsc::UnboundedSender<Notification>);

    #[async_trait]
    impl Notifier for Channel {
        async fn send(&self, n: &Notification) -> Result<(), NotifyError> {
            let _ = self.0.send(n.clone());
            Ok(())
        }
    }

    struct Down;

    #[async_trait]
    impl Notifier for Down {
        async fn send(&self, _n: &Notification) -> Result<(), NotifyError> {
            Err(NotifyError::Status(502))
        }
    }

    fn policy() -> RetryPolicy { RetryPolicy::new(2, Duration::from_millis(1), Duration::from_millis(1)) }

    #[tokio::test]
    async fn booking_is_persisted_then_notified() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let brand = create_brand(&db, "Acme", "").await?;
        let x1 = create_model(&db, NewModel::named(brand.id, "X1")).await?;
        let battery = create_repair_type(&db, NewRepair::named("Battery")).await?;
        set_model_repair_prices(&db, x1.id, &[RepairPriceEntry::priced("Battery", 49.0)]).await?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let intake = IntakeService::new(db.clone(), NotificationDispatcher::new(Arc::new(Channel(tx)), policy()));
        let summary = intake
            .submit_booking(BookingRequest::new(x1.id, vec![battery.id], "Jan", "jan@example.nl"))
            .await?;

        let sent = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await?.expect("notification");
        assert_eq!(sent, Notification::from(&summary));
        assert_eq!(summary.booking.total_price, Some(49.0));
        Ok(())
    }

    #[tokio::test]
    async fn notifier_failure_does_not_fail_submission() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let intake = IntakeService::new(db.clone(), NotificationDispatcher::new(Arc::new(Down), policy()));
        let saved = intake
            .submit_contact(ContactRequest {
                name: "Jan".into(),
                email: "jan@example.nl".into(),
                phone: None,
                message: "Is my screen ready?".into(),
            })
            .await?;
        let found = contact_service::get_contact(&db, saved.id).await?;
        assert_eq!(found.message, "Is my screen ready?");
        Ok(())
    }
}
