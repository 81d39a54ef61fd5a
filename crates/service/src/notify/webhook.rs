use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::{Notification, Notifier, NotifyError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// POSTs each notification as JSON to a fixed URL.
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: &str) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NotifyError::Config(e.to_string()))?;
        Ok(Self { client, url: url.to_string() })
    }
}

fn check_status(status: StatusCode) -> Result<(), NotifyError> {
    if status.is_success() { Ok(()) } else { Err(NotifyError::Status(status.as_u16())) }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let resp = self
            .client
            .post(&self.url)
            .json(notification)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        check_status(resp.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn status_classification() {
        assert!(check_status(StatusCode::NO_CONTENT).is_ok());
        let unavailable = check_status(StatusCode::SERVICE_UNAVAILABLE).unwrap_err();
        assert!(unavailable.is_retryable());
        let rejected = check_status(StatusCode::UNPROCESSABLE_ENTITY).unwrap_err();
        assert!(!rejected.is_retryable());
    }

    #[tokio::test]
    async fn refused_connection_is_retryable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let notifier = WebhookNotifier::new(&format!("http://{addr}/hook")).unwrap();
        let n = Notification::ContactReceived { message_id: Uuid::new_v4(), name: "Jan".into(), email: "jan@example.nl".into() };
        let err = notifier.send(&n).await.unwrap_err();
        assert!(matches!(err, NotifyError::Transport(_)));
        assert!(err.is_retryable());
    }
}
