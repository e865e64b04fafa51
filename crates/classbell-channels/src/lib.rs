//! # classbell-channels
//!
//! Outbound notification channels. Currently only the Feishu group-bot
//! webhook; anything implementing `classbell_core::Notifier` can stand in.

pub mod feishu;

pub use feishu::{BatchReport, FeishuChannel, DEFAULT_MAX_RETRIES};
