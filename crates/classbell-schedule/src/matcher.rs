//! Upcoming-class detection and tomorrow's schedule.
//!
//! All matchers are pure over an explicit `now`; callers pass
//! [`clock::beijing_now()`](crate::clock::beijing_now) in production and a
//! pinned timestamp in tests.

use chrono::{DateTime, Duration, FixedOffset, Timelike};

use classbell_core::config::Timetable;
use classbell_core::error::Result;
use classbell_core::types::{Course, CourseTime};

use crate::clock::{course_time, day_of_week, minutes_of_day, minutes_to_time};
use crate::weeks::{current_week, is_active_in_week};

/// How far off the exact trigger minute a run may be and still fire.
/// Cron-driven invocations are not minute-precise.
const TRIGGER_SLACK_MINUTES: i64 = 5;

/// A course whose reminder is due now.
#[derive(Debug, Clone)]
pub struct UpcomingClass {
    pub course: Course,
    pub time: CourseTime,
    pub lead_minutes: u32,
    /// The trigger clock time, rendered "HH:MM".
    pub reminder_time: String,
}

/// A course on tomorrow's schedule.
#[derive(Debug, Clone)]
pub struct TomorrowClass {
    pub course: Course,
    pub time: CourseTime,
    pub date: DateTime<FixedOffset>,
}

/// Courses whose reminder window covers `now`: active this week, scheduled
/// today, and within [`TRIGGER_SLACK_MINUTES`] of start minus campus lead.
pub fn upcoming_classes(
    timetable: &Timetable,
    now: DateTime<FixedOffset>,
) -> Result<Vec<UpcomingClass>> {
    let week = current_week(now, timetable.semester_start);
    let today = day_of_week(now);
    let current_minutes = minutes_of_day(now) as i64;

    let mut upcoming = Vec::new();
    for course in &timetable.courses {
        if !is_active_in_week(course, week)? || course.day_of_week != today {
            continue;
        }

        let Some(lead_minutes) = timetable.lead_minutes(&course.campus) else {
            tracing::warn!(course = %course.name, campus = %course.campus,
                "no lead time configured for campus, skipping");
            continue;
        };

        let time = course_time(course, &timetable.time_slots)?;
        let trigger = time.start_minutes as i64 - lead_minutes as i64;
        if (current_minutes - trigger).abs() <= TRIGGER_SLACK_MINUTES {
            upcoming.push(UpcomingClass {
                course: course.clone(),
                time,
                lead_minutes,
                reminder_time: minutes_to_time(trigger.max(0) as u32),
            });
        }
    }
    Ok(upcoming)
}

/// Tomorrow's courses, sorted by start time ascending.
///
/// The week number is taken from the current date, so a Sunday-night preview
/// reads next Monday against the week that is just ending. That mirrors how
/// the timetable is published (weeks run Monday through Sunday).
pub fn tomorrow_classes(
    timetable: &Timetable,
    now: DateTime<FixedOffset>,
) -> Result<Vec<TomorrowClass>> {
    let tomorrow = now + Duration::days(1);
    let week = current_week(now, timetable.semester_start);
    let day = day_of_week(tomorrow);

    let mut classes = Vec::new();
    for course in &timetable.courses {
        if !is_active_in_week(course, week)? || course.day_of_week != day {
            continue;
        }
        classes.push(TomorrowClass {
            course: course.clone(),
            time: course_time(course, &timetable.time_slots)?,
            date: tomorrow,
        });
    }
    classes.sort_by_key(|c| c.time.start_minutes);
    Ok(classes)
}

/// The nightly preview fires in the 23:00–23:05 window.
pub fn should_send_preview(now: DateTime<FixedOffset>) -> bool {
    now.hour() == 23 && now.minute() <= 5
}
