//! Unified error types for classbell.

use thiserror::Error;

/// Result type alias using ClassbellError.
pub type Result<T> = std::result::Result<T, ClassbellError>;

#[derive(Error, Debug)]
pub enum ClassbellError {
    // Config errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    // Timetable errors
    #[error("Invalid week expression: {0}")]
    WeekExpr(String),

    #[error("Unknown period number: {0}")]
    UnknownPeriod(u32),

    #[error("Invalid clock time: {0}")]
    ClockTime(String),

    // Channel errors
    #[error("Channel error: {0}")]
    Channel(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl ClassbellError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    pub fn week_expr(msg: impl Into<String>) -> Self {
        Self::WeekExpr(msg.into())
    }
}
