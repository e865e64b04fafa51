//! Semester week arithmetic.
//!
//! Week expression parsing lives in `classbell_core::weeks` so the config
//! loader validates it; this module re-exports it alongside the calendar
//! math.

use chrono::{DateTime, FixedOffset};

use classbell_core::error::Result;
use classbell_core::types::Course;

pub use classbell_core::weeks::parse_weeks;

/// Semester week number for `now`: week 1 covers the first seven days from
/// `semester_start`. Dates before the semester clamp to week 1.
pub fn current_week(now: DateTime<FixedOffset>, semester_start: DateTime<FixedOffset>) -> u32 {
    let days = (now - semester_start).num_days();
    if days < 0 {
        return 1;
    }
    (days / 7) as u32 + 1
}

/// Whether a course meets in the given semester week.
pub fn is_active_in_week(course: &Course, week: u32) -> Result<bool> {
    Ok(parse_weeks(&course.weeks)?.contains(&week))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).expect("valid rfc3339")
    }

    const START: &str = "2025-09-15T00:00:00+08:00";

    #[test]
    fn test_current_week_boundaries() {
        let start = at(START);
        // Day 1 of the semester.
        assert_eq!(current_week(at("2025-09-15T08:00:00+08:00"), start), 1);
        // Day 7, still week 1.
        assert_eq!(current_week(at("2025-09-21T23:59:00+08:00"), start), 1);
        // Day 8, week 2.
        assert_eq!(current_week(at("2025-09-22T00:10:00+08:00"), start), 2);
        // Mid-semester spot check.
        assert_eq!(current_week(at("2025-10-20T12:00:00+08:00"), start), 6);
    }

    #[test]
    fn test_current_week_floors_at_one() {
        let start = at(START);
        assert_eq!(current_week(at("2025-09-01T12:00:00+08:00"), start), 1);
    }

    #[test]
    fn test_is_active_in_week() {
        let course = Course {
            name: "药学实验室安全与科研伦理".into(),
            class_id: "202511868".into(),
            weeks: "5-10".into(),
            day_of_week: 3,
            periods: vec![6, 7, 8],
            location: "闵行，闵一教223".into(),
            campus: "闵行".into(),
        };
        assert!(!is_active_in_week(&course, 4).expect("parse"));
        assert!(is_active_in_week(&course, 5).expect("parse"));
        assert!(is_active_in_week(&course, 10).expect("parse"));
        assert!(!is_active_in_week(&course, 11).expect("parse"));
    }
}
