//! # classbell-schedule
//!
//! The scheduling brain: semester week arithmetic, clock-time resolution,
//! upcoming-class matching, and reminder text rendering. Everything is a
//! pure function over an explicit "now" so a cron-driven binary and the
//! tests share the exact same code path.

pub mod clock;
pub mod format;
pub mod matcher;
pub mod weeks;

pub use matcher::{
    should_send_preview, tomorrow_classes, upcoming_classes, TomorrowClass, UpcomingClass,
};
