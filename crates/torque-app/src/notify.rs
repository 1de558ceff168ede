//! Best-effort webhook notifier.
//!
//! Business events (sales, clock in/out, new staff) are announced to an
//! external chat webhook. Delivery is fire-and-forget: the target URL is
//! re-read from settings on every dispatch, an empty URL disables dispatch
//! entirely, and failures are logged but never surfaced or retried.

use serde_json::json;
use tracing::{debug, warn};

use torque_db::Database;

/// Outbound webhook dispatcher.
#[derive(Clone)]
pub struct Notifier {
    db: Database,
    client: reqwest::Client,
}

impl Notifier {
    /// Create a new notifier over the given database handle.
    pub fn new(db: Database) -> Self {
        Notifier {
            db,
            client: reqwest::Client::new(),
        }
    }

    /// Dispatch a notification message.
    ///
    /// Returns immediately; the HTTP request (if any) runs on a spawned task.
    pub fn notify(&self, message: impl Into<String>) {
        let message = message.into();
        let db = self.db.clone();
        let client = self.client.clone();

        tokio::spawn(async move {
            let webhook_url = match db.settings().get().await {
                Ok(settings) => settings.webhook_url,
                Err(e) => {
                    warn!(error = %e, "Could not read settings for notification");
                    return;
                }
            };

            if webhook_url.is_empty() {
                debug!("No webhook configured, notification skipped");
                return;
            }

            let payload = json!({ "content": message });

            match client.post(&webhook_url).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {
                    debug!("Notification delivered");
                }
                Ok(response) => {
                    warn!(status = %response.status(), "Webhook rejected notification");
                }
                Err(e) => {
                    warn!(error = %e, "Failed to deliver notification");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use torque_db::DbConfig;

    async fn db_with_webhook(url: &str) -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut settings = db.settings().get().await.unwrap();
        settings.webhook_url = url.to_string();
        db.settings().save(&settings).await.unwrap();
        db
    }

    /// Accepts one HTTP request and hands back its raw bytes.
    async fn accept_one(listener: TcpListener) -> Vec<u8> {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if request_complete(&buf) {
                break;
            }
        }
        stream
            .write_all(b"HTTP/1.1 204 No Content\r\ncontent-length: 0\r\n\r\n")
            .await
            .unwrap();
        buf
    }

    fn request_complete(buf: &[u8]) -> bool {
        let text = String::from_utf8_lossy(buf);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length: usize = text
            .lines()
            .find_map(|l| l.to_ascii_lowercase().strip_prefix("content-length:").map(str::to_string))
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);
        buf.len() >= header_end + 4 + content_length
    }

    #[tokio::test]
    async fn test_notify_without_webhook_is_noop() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let notifier = Notifier::new(db);

        // Default settings carry an empty webhook URL; this must neither
        // panic nor attempt any network I/O.
        notifier.notify("New sale: 2x Oil Change");
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn test_notify_posts_content_payload() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(accept_one(listener));

        let db = db_with_webhook(&format!("http://{}/hook", addr)).await;
        let notifier = Notifier::new(db);
        notifier.notify("Ana clocked in");

        let raw = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .unwrap()
            .unwrap();
        let text = String::from_utf8(raw).unwrap();
        assert!(text.starts_with("POST /hook"));

        let body = text.split("\r\n\r\n").nth(1).unwrap();
        let payload: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(payload, json!({ "content": "Ana clocked in" }));
    }

    #[tokio::test]
    async fn test_delivery_failure_never_surfaces() {
        // Grab a free port, then close the listener so the POST is refused.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let db = db_with_webhook(&format!("http://{}/hook", addr)).await;
        let notifier = Notifier::new(db);

        // Must not panic; the failure stays on the diagnostic channel.
        notifier.notify("New sale: 1x Inspection");
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}
