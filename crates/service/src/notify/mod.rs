//! Best-effort outbound notifications for bookings and contact messages.
//!
//! Delivery runs on its own tokio task after the triggering write has
//! committed. It retries on its own policy, and a final failure is logged
//! and dropped. The request that caused it never sees the outcome.

mod retry;
mod webhook;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

pub use retry::RetryPolicy;
pub use webhook::WebhookNotifier;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Notification {
    #[serde(rename_all = "camelCase")]
    BookingReceived {
        booking_id: Uuid,
        model_name: String,
        customer_name: String,
        email: String,
        repairs: Vec<String>,
        total_price: Option<f64>,
        price_on_request: bool,
    },
    #[serde(rename_all = "camelCase")]
    ContactReceived {
        message_id: Uuid,
        name: String,
        email: String,
    },
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::BookingReceived { .. } => "booking_received",
            Notification::ContactReceived { .. } => "contact_received",
        }
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("receiver answered {0}")]
    Status(u16),
    #[error("notifier misconfigured: {0}")]
    Config(String),
}

impl NotifyError {
    /// Transport failures and 5xx answers may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            NotifyError::Transport(_) => true,
            NotifyError::Status(code) => *code >= 500,
            NotifyError::Config(_) => false,
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Writes notifications to the log only. Used when no webhook is configured.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        info!(kind = notification.kind(), payload = ?notification, "notification");
        Ok(())
    }
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
    policy: RetryPolicy,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>, policy: RetryPolicy) -> Self { Self { notifier, policy } }

    /// Webhook delivery when `webhook_url` is set, log-only otherwise.
    pub fn from_config(cfg: &configs::NotifyConfig) -> Result<Self, NotifyError> {
        let notifier: Arc<dyn Notifier> = match cfg.webhook_url.as_deref() {
            Some(url) => Arc::new(WebhookNotifier::new(url)?),
            None => Arc::new(LogNotifier),
        };
        Ok(Self::new(notifier, RetryPolicy::from_config(cfg)))
    }

    /// Spawn delivery and return at once. The handle resolves to whether the
    /// notification was delivered; aborting it cancels delivery.
    pub fn dispatch(&self, notification: Notification) -> JoinHandle<bool> {
        let notifier = Arc::clone(&self.notifier);
        let policy = self.policy.clone();
        tokio::spawn(async move { deliver(notifier.as_ref(), &policy, &notification).await })
    }
}

async fn deliver(notifier: &dyn Notifier, policy: &RetryPolicy, notification: &Notification) -> bool {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match notifier.send(notification).await {
            Ok(()) => {
                info!(kind = notification.kind(), attempt, "notification_delivered");
                return true;
            }
            Err(e) if e.is_retryable() && attempt < policy.max_attempts() => {
                warn!(kind = notification.kind(), attempt, error = %e, "notification_retry");
                policy.wait_before_retry(attempt).await;
            }
            Err(e) => {
                error!(kind = notification.kind(), attempt, error = %e, "notification_dropped");
                return false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    struct Flaky {
        calls: AtomicU32,
        failures: u32,
        error: fn() -> NotifyError,
    }

    #[async_trait]
    impl Notifier for Flaky {
        async fn send(&self, _n: &Notification) -> Result<(), NotifyError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures { Err((self.error)()) } else { Ok(()) }
        }
    }

    struct Stalled;

    #[async_trait]
    impl Notifier for Stalled {
        async fn send(&self, _n: &Notification) -> Result<(), NotifyError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }
    }

    fn contact() -> Notification {
        Notification::ContactReceived { message_id: Uuid::new_v4(), name: "Jan".into(), email: "jan@example.nl".into() }
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_millis(1), Duration::from_millis(2))
    }

    #[tokio::test]
    async fn retries_transient_failures() {
        let flaky = Arc::new(Flaky { calls: AtomicU32::new(0), failures: 2, error: || NotifyError::Status(503) });
        let dispatcher = NotificationDispatcher::new(flaky.clone(), fast_policy(3));
        assert!(dispatcher.dispatch(contact()).await.unwrap());
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let flaky = Arc::new(Flaky { calls: AtomicU32::new(0), failures: 10, error: || NotifyError::Transport("refused".into()) });
        let dispatcher = NotificationDispatcher::new(flaky.clone(), fast_policy(3));
        assert!(!dispatcher.dispatch(contact()).await.unwrap());
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let flaky = Arc::new(Flaky { calls: AtomicU32::new(0), failures: 10, error: || NotifyError::Status(400) });
        let dispatcher = NotificationDispatcher::new(flaky.clone(), fast_policy(5));
        assert!(!dispatcher.dispatch(contact()).await.unwrap());
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn dispatch_can_be_cancelled() {
        let dispatcher = NotificationDispatcher::new(Arc::new(Stalled), fast_policy(1));
        let handle = dispatcher.dispatch(contact());
        handle.abort();
        let res = handle.await;
        assert!(res.unwrap_err().is_cancelled());
    }

    #[test]
    fn notification_wire_shape() {
        let n = Notification::BookingReceived {
            booking_id: Uuid::nil(),
            model_name: "X1".into(),
            customer_name: "Jan".into(),
            email: "jan@example.nl".into(),
            repairs: vec!["Battery".into()],
            total_price: Some(49.0),
            price_on_request: false,
        };
        let v = serde_json::to_value(&n).unwrap();
        assert_eq!(v["kind"], "bookingReceived");
        assert_eq!(v["modelName"], "X1");
        assert_eq!(v["totalPrice"], 49.0);
    }

    #[test]
    fn log_only_without_webhook() {
        let cfg = configs::NotifyConfig::default();
        assert!(NotificationDispatcher::from_config(&cfg).is_ok());
    }
}
