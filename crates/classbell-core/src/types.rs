//! Domain types: courses, period time slots, resolved course times.

use serde::{Deserialize, Serialize};

/// A course in the semester timetable.
///
/// `weeks` is a comma-separated list of single week numbers or inclusive
/// ranges, e.g. `"1-18"` or `"2-13"` or `"1,3,5-9"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub class_id: String,
    pub weeks: String,
    /// 1 = Monday … 7 = Sunday.
    pub day_of_week: u32,
    /// Ordered, contiguous period numbers, e.g. `[3, 4]`.
    pub periods: Vec<u32>,
    /// "campus，room" as printed on the timetable.
    pub location: String,
    pub campus: String,
}

impl Course {
    /// Room part of the location (text after the fullwidth comma),
    /// or the whole location when no comma is present.
    pub fn room(&self) -> &str {
        match self.location.split_once('，') {
            Some((_, room)) => room,
            None => &self.location,
        }
    }

    /// "第a-b节" style label for the period sequence.
    pub fn period_label(&self) -> String {
        self.periods
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// One numbered class slot within a day, with its clock times as "H:MM".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub period: u32,
    pub start: String,
    pub end: String,
}

/// Resolved start/end of a course: first period's start, last period's end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseTime {
    pub start: String,
    pub end: String,
    pub start_minutes: u32,
    pub end_minutes: u32,
}
