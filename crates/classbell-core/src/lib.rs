//! # classbell-core
//!
//! Shared foundation for the classbell workspace: the error type, the
//! timetable data model and its configuration loader, and the `Notifier`
//! trait implemented by outbound channels.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;
pub mod weeks;

pub use config::{Timetable, webhook_url_from_env, WEBHOOK_URL_ENV};
pub use error::{ClassbellError, Result};
pub use traits::Notifier;
pub use types::{Course, CourseTime, TimeSlot};
