//! Clock-time helpers: "H:MM" parsing, minutes-since-midnight math,
//! weekday numbering, and the Beijing-time anchor.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Utc};

use classbell_core::error::{ClassbellError, Result};
use classbell_core::types::{Course, CourseTime, TimeSlot};

/// "9:50" → minutes since midnight.
pub fn time_to_minutes(text: &str) -> Result<u32> {
    let (h, m) = text
        .split_once(':')
        .ok_or_else(|| ClassbellError::ClockTime(text.to_string()))?;
    let hours: u32 = h
        .parse()
        .map_err(|_| ClassbellError::ClockTime(text.to_string()))?;
    let minutes: u32 = m
        .parse()
        .map_err(|_| ClassbellError::ClockTime(text.to_string()))?;
    if hours > 23 || minutes > 59 {
        return Err(ClassbellError::ClockTime(text.to_string()));
    }
    Ok(hours * 60 + minutes)
}

/// Minutes since midnight → zero-padded "HH:MM".
pub fn minutes_to_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Resolve a course's clock span: start of its first period, end of its last.
pub fn course_time(course: &Course, slots: &[TimeSlot]) -> Result<CourseTime> {
    let first = *course
        .periods
        .first()
        .ok_or_else(|| ClassbellError::config(format!("course '{}' has no periods", course.name)))?;
    let last = *course
        .periods
        .last()
        .ok_or_else(|| ClassbellError::config(format!("course '{}' has no periods", course.name)))?;

    let start_slot = find_slot(slots, first)?;
    let end_slot = find_slot(slots, last)?;

    Ok(CourseTime {
        start: start_slot.start.clone(),
        end: end_slot.end.clone(),
        start_minutes: time_to_minutes(&start_slot.start)?,
        end_minutes: time_to_minutes(&end_slot.end)?,
    })
}

fn find_slot(slots: &[TimeSlot], period: u32) -> Result<&TimeSlot> {
    slots
        .iter()
        .find(|s| s.period == period)
        .ok_or(ClassbellError::UnknownPeriod(period))
}

/// Timetable weekday numbering: Monday = 1 … Sunday = 7.
pub fn day_of_week(date: DateTime<FixedOffset>) -> u32 {
    date.weekday().number_from_monday()
}

/// Minutes since local midnight at `now`.
pub fn minutes_of_day(now: DateTime<FixedOffset>) -> u32 {
    use chrono::Timelike;
    now.hour() * 60 + now.minute()
}

/// Beijing is UTC+8 year-round, no DST.
pub fn beijing_tz() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).expect("UTC+8 is a valid offset")
}

/// Current instant in Beijing time.
pub fn beijing_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&beijing_tz())
}

/// "M月D日 (周X)" as printed in preview headers.
pub fn format_date_cn(date: DateTime<FixedOffset>) -> String {
    const WEEKDAYS: [&str; 7] = ["周一", "周二", "周三", "周四", "周五", "周六", "周日"];
    let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
    format!("{}月{}日 ({})", date.month(), date.day(), weekday)
}

/// Calendar date of a given semester week and weekday (both 1-based).
pub fn date_of_week_day(
    semester_start: DateTime<FixedOffset>,
    week: u32,
    day: u32,
) -> DateTime<FixedOffset> {
    semester_start + Duration::days(((week - 1) * 7 + (day - 1)) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use classbell_core::Timetable;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).expect("valid rfc3339")
    }

    #[test]
    fn test_time_to_minutes() {
        assert_eq!(time_to_minutes("8:00").expect("parse"), 480);
        assert_eq!(time_to_minutes("9:50").expect("parse"), 590);
        assert_eq!(time_to_minutes("21:15").expect("parse"), 1275);
    }

    #[test]
    fn test_time_to_minutes_rejects_garbage() {
        assert!(time_to_minutes("950").is_err());
        assert!(time_to_minutes("25:00").is_err());
        assert!(time_to_minutes("9:60").is_err());
        assert!(time_to_minutes("a:b").is_err());
    }

    #[test]
    fn test_minutes_to_time_pads() {
        assert_eq!(minutes_to_time(480), "08:00");
        assert_eq!(minutes_to_time(1275), "21:15");
        assert_eq!(minutes_to_time(5), "00:05");
    }

    #[test]
    fn test_course_time_spans_periods() {
        let t = Timetable::default();
        let course = Course {
            name: "电子材料与器件".into(),
            class_id: "202510588".into(),
            weeks: "1-18".into(),
            day_of_week: 1,
            periods: vec![3, 4],
            location: "闵行，闵一教230".into(),
            campus: "闵行".into(),
        };
        let ct = course_time(&course, &t.time_slots).expect("resolve");
        assert_eq!(ct.start, "9:50");
        assert_eq!(ct.end, "11:25");
        assert_eq!(ct.start_minutes, 590);
        assert_eq!(ct.end_minutes, 685);
    }

    #[test]
    fn test_course_time_unknown_period() {
        let t = Timetable::default();
        let mut course = t.courses[0].clone();
        course.periods = vec![99];
        let err = course_time(&course, &t.time_slots).expect_err("unknown period");
        assert!(matches!(err, ClassbellError::UnknownPeriod(99)));
    }

    #[test]
    fn test_day_of_week_sunday_is_seven() {
        // 2025-09-21 is a Sunday.
        assert_eq!(day_of_week(at("2025-09-21T12:00:00+08:00")), 7);
        // 2025-09-15 is a Monday.
        assert_eq!(day_of_week(at("2025-09-15T12:00:00+08:00")), 1);
    }

    #[test]
    fn test_minutes_of_day() {
        assert_eq!(minutes_of_day(at("2025-09-15T09:20:00+08:00")), 560);
    }

    #[test]
    fn test_format_date_cn() {
        assert_eq!(format_date_cn(at("2025-09-21T00:00:00+08:00")), "9月21日 (周日)");
        assert_eq!(format_date_cn(at("2025-10-01T00:00:00+08:00")), "10月1日 (周三)");
    }

    #[test]
    fn test_date_of_week_day() {
        let start = at("2025-09-15T00:00:00+08:00");
        // Week 1 Monday is the semester start itself.
        assert_eq!(date_of_week_day(start, 1, 1), start);
        // Week 2 Wednesday is nine days in.
        assert_eq!(
            date_of_week_day(start, 2, 3),
            at("2025-09-24T00:00:00+08:00")
        );
    }
}
