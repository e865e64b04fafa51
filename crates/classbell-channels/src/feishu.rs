//! Feishu (Lark) webhook channel.
//!
//! One outbound surface: POST a text payload to the group-bot webhook URL.
//! Delivery problems collapse to `false` so a failed push never aborts a
//! reminder pass.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use classbell_core::traits::Notifier;

/// Request timeout for a single webhook POST.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Spacing between messages in a batch, to stay under the bot rate limit.
const BATCH_SPACING: Duration = Duration::from_secs(1);
/// Default attempt cap per message in a batch.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Feishu group-bot text payload: `{"msg_type":"text","content":{"text":…}}`.
#[derive(Debug, Serialize)]
pub struct TextPayload<'a> {
    pub msg_type: &'static str,
    pub content: TextContent<'a>,
}

#[derive(Debug, Serialize)]
pub struct TextContent<'a> {
    pub text: &'a str,
}

impl<'a> TextPayload<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            msg_type: "text",
            content: TextContent { text },
        }
    }
}

/// Outcome of a batch send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

/// Feishu webhook channel.
pub struct FeishuChannel {
    webhook_url: String,
    client: reqwest::Client,
}

impl FeishuChannel {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            webhook_url: webhook_url.into(),
            client,
        }
    }

    /// POST one text message. Success is any 2xx status; everything else
    /// (transport error, timeout, non-2xx) logs and returns `false`.
    pub async fn push_text(&self, text: &str) -> bool {
        let payload = TextPayload::new(text);
        let response = match self.client.post(&self.webhook_url).json(&payload).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("Feishu push failed: {e}");
                return false;
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(%status, %body, "Feishu response");

        if status.is_success() {
            true
        } else {
            tracing::error!(%status, %body, "Feishu push rejected");
            false
        }
    }

    /// Send each message with the default attempt cap
    /// ([`DEFAULT_MAX_RETRIES`]).
    pub async fn push_batch(&self, messages: &[String]) -> BatchReport {
        self.push_batch_with_retries(messages, DEFAULT_MAX_RETRIES).await
    }

    /// Send each message with up to `max_retries` attempts, exponential
    /// backoff (2^n seconds after the nth failure) and 1 s spacing between
    /// messages.
    pub async fn push_batch_with_retries(&self, messages: &[String], max_retries: u32) -> BatchReport {
        let mut report = BatchReport {
            total: messages.len(),
            ..Default::default()
        };

        for (i, message) in messages.iter().enumerate() {
            let mut sent = false;
            let mut attempt = 0;
            while !sent && attempt < max_retries {
                sent = self.push_text(message).await;
                if !sent {
                    attempt += 1;
                    if attempt < max_retries {
                        let wait = backoff_after(attempt);
                        tracing::warn!(
                            "message {}/{} failed, retrying in {}s ({attempt}/{max_retries})",
                            i + 1,
                            report.total,
                            wait.as_secs()
                        );
                        tokio::time::sleep(wait).await;
                    }
                }
            }

            if sent {
                report.success += 1;
            } else {
                report.failed += 1;
                report
                    .errors
                    .push(format!("message {}: gave up after {max_retries} attempts", i + 1));
            }

            if i + 1 < messages.len() {
                tokio::time::sleep(BATCH_SPACING).await;
            }
        }
        report
    }
}

/// Backoff before retry n (1-based): 2^n seconds.
fn backoff_after(attempt: u32) -> Duration {
    Duration::from_secs(2u64.saturating_pow(attempt))
}

#[async_trait]
impl Notifier for FeishuChannel {
    fn name(&self) -> &str {
        "feishu"
    }

    async fn send_text(&self, text: &str) -> bool {
        self.push_text(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_wire_shape() {
        let payload = TextPayload::new("上课提醒");
        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "msg_type": "text",
                "content": { "text": "上课提醒" }
            })
        );
    }

    #[test]
    fn test_backoff_schedule() {
        assert_eq!(backoff_after(1), Duration::from_secs(2));
        assert_eq!(backoff_after(2), Duration::from_secs(4));
        assert_eq!(backoff_after(3), Duration::from_secs(8));
    }

    #[tokio::test]
    async fn test_push_text_unreachable_is_false() {
        // Nothing listens on the discard port; refusal is immediate and the
        // 10s client timeout bounds the worst case.
        let channel = FeishuChannel::new("http://127.0.0.1:9/hook");
        assert!(!channel.push_text("ping").await);
    }

    #[tokio::test]
    async fn test_batch_counts_failures() {
        let channel = FeishuChannel::new("http://127.0.0.1:9/hook");
        let messages = vec!["a".to_string()];
        let report = channel.push_batch_with_retries(&messages, 1).await;
        assert_eq!(report.total, 1);
        assert_eq!(report.success, 0);
        assert_eq!(report.failed, 1);
        assert_eq!(report.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_batch_empty_uses_default_cap() {
        // No messages, no sends: the default-retry path returns a clean
        // zero report without touching the network.
        let channel = FeishuChannel::new("http://127.0.0.1:9/hook");
        let report = channel.push_batch(&[]).await;
        assert_eq!(report, BatchReport::default());
    }
}
