//! Trait seams shared across crates.

use async_trait::async_trait;

/// An outbound notification channel.
///
/// Delivery failures are reported as `false`, never as an error — a failed
/// push must not abort the reminder pass.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    /// Send a plain-text message. Returns whether delivery succeeded.
    async fn send_text(&self, text: &str) -> bool;
}
