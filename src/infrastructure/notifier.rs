use crate::domain::notification::AllowanceChangeEvent;
use crate::domain::ports::Notifier;
use crate::error::{PayrollError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

/// Publishes allowance change events by POSTing their JSON body to a fixed
/// destination, such as the HTTP ingestion endpoint of a message queue.
///
/// The request carries `Content-Type: application/json`. Any transport error or
/// non-success status is reported as `PayrollError::DispatchFailure`; retries are
/// left to the channel behind the URL.
#[derive(Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    destination: String,
}

impl HttpNotifier {
    /// Creates a notifier that sends to `destination` with the given request timeout.
    pub fn new(destination: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PayrollError::InternalError(Box::new(e)))?;

        Ok(Self {
            client,
            destination: destination.into(),
        })
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send(&self, event: &AllowanceChangeEvent) -> Result<()> {
        self.client
            .post(&self.destination)
            .json(event)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| PayrollError::DispatchFailure(e.to_string()))?;

        info!(destination = %self.destination, event = ?event, "Sent allowance update message");
        Ok(())
    }
}

/// Writes allowance change events to the log instead of a remote channel.
///
/// Used when no notification destination is configured.
#[derive(Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, event: &AllowanceChangeEvent) -> Result<()> {
        let body = serde_json::to_string(event)?;
        info!(message = %body, "Allowance update message (no destination configured)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, extract::State, http::HeaderMap, http::StatusCode, routing::post};
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    type Captured = Arc<Mutex<Vec<(Option<String>, String)>>>;

    async fn capture(State(captured): State<Captured>, headers: HeaderMap, body: String) -> StatusCode {
        let content_type = headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        captured.lock().await.push((content_type, body));
        StatusCode::OK
    }

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/queue", addr)
    }

    fn event() -> AllowanceChangeEvent {
        AllowanceChangeEvent {
            id: 1,
            first_name: "David".to_string(),
            last_name: "Kilan".to_string(),
            current_monthly_allowance: dec!(300.00),
            new_monthly_allowance: dec!(600.00),
            email: "david.kilan@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_http_notifier_posts_json_body() {
        let captured: Captured = Arc::default();
        let router = Router::new()
            .route("/queue", post(capture))
            .with_state(captured.clone());
        let url = spawn_server(router).await;

        let notifier = HttpNotifier::new(url, Duration::from_secs(5)).unwrap();
        notifier.send(&event()).await.unwrap();

        let captured = captured.lock().await;
        assert_eq!(captured.len(), 1);
        let (content_type, body) = &captured[0];
        assert_eq!(content_type.as_deref(), Some("application/json"));

        let value: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 6);
        assert_eq!(value["currentMonthlyAllowance"].to_string(), "300.00");
        assert_eq!(value["newMonthlyAllowance"].to_string(), "600.00");
    }

    #[tokio::test]
    async fn test_http_notifier_reports_rejection_as_dispatch_failure() {
        let router = Router::new().route("/queue", post(|| async { StatusCode::SERVICE_UNAVAILABLE }));
        let url = spawn_server(router).await;

        let notifier = HttpNotifier::new(url, Duration::from_secs(5)).unwrap();
        let result = notifier.send(&event()).await;
        assert!(matches!(result, Err(PayrollError::DispatchFailure(_))));
    }

    #[tokio::test]
    async fn test_http_notifier_reports_unreachable_destination() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let notifier = HttpNotifier::new(format!("http://{}/queue", addr), Duration::from_secs(2)).unwrap();
        let result = notifier.send(&event()).await;
        assert!(matches!(result, Err(PayrollError::DispatchFailure(_))));
    }

    #[tokio::test]
    async fn test_log_notifier_accepts_events() {
        assert!(LogNotifier.send(&event()).await.is_ok());
    }
}
