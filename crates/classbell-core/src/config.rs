//! Timetable configuration: semester anchor, campus lead times, courses,
//! and the fixed period table.
//!
//! Everything here is read-only after load. The built-in defaults carry the
//! full semester dataset so the binary works with no config file at all;
//! `~/.classbell/timetable.toml` overrides it when present.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{ClassbellError, Result};
use crate::types::{Course, TimeSlot};

/// Environment variable holding the Feishu webhook URL.
pub const WEBHOOK_URL_ENV: &str = "FEISHU_WEBHOOK_URL";

/// The whole static timetable, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timetable {
    /// First day (Monday, 00:00 local) of semester week 1.
    pub semester_start: DateTime<FixedOffset>,
    /// Campus tag → reminder lead time in minutes.
    pub campus_lead_minutes: HashMap<String, u32>,
    pub courses: Vec<Course>,
    pub time_slots: Vec<TimeSlot>,
}

impl Default for Timetable {
    fn default() -> Self {
        Self {
            semester_start: DateTime::parse_from_rfc3339("2025-09-15T00:00:00+08:00")
                .expect("valid semester start"),
            campus_lead_minutes: HashMap::from([
                ("闵行".to_string(), 30),   // on-campus: 30 minutes ahead
                ("中北".to_string(), 120),  // other campus: 2 hours ahead (travel)
            ]),
            courses: default_courses(),
            time_slots: default_time_slots(),
        }
    }
}

impl Timetable {
    /// Default config file location: `~/.classbell/timetable.toml`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".classbell")
            .join("timetable.toml")
    }

    /// Load from the default path if a file exists there, else built-in defaults.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load from an explicit path. Missing or malformed files are fatal.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ClassbellError::ConfigNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let timetable: Timetable = toml::from_str(&content)?;
        timetable.validate()?;
        tracing::debug!(path = %path.display(), courses = timetable.courses.len(),
            "timetable loaded");
        Ok(timetable)
    }

    /// Reject timetables that would only fail later, mid-pass.
    pub fn validate(&self) -> Result<()> {
        for course in &self.courses {
            crate::weeks::parse_weeks(&course.weeks)?;
            if !(1..=7).contains(&course.day_of_week) {
                return Err(ClassbellError::config(format!(
                    "course '{}': day_of_week {} out of range 1-7",
                    course.name, course.day_of_week
                )));
            }
            if course.periods.is_empty() {
                return Err(ClassbellError::config(format!(
                    "course '{}': empty period list",
                    course.name
                )));
            }
            for period in &course.periods {
                if !self.time_slots.iter().any(|s| s.period == *period) {
                    return Err(ClassbellError::UnknownPeriod(*period));
                }
            }
        }
        Ok(())
    }

    /// Lead time for a campus tag, if configured.
    pub fn lead_minutes(&self, campus: &str) -> Option<u32> {
        self.campus_lead_minutes.get(campus).copied()
    }
}

/// Read the webhook URL from the environment. Absence is fatal for any mode
/// that sends.
pub fn webhook_url_from_env() -> Result<String> {
    std::env::var(WEBHOOK_URL_ENV)
        .map_err(|_| ClassbellError::config(format!("{WEBHOOK_URL_ENV} is not set")))
}

fn default_courses() -> Vec<Course> {
    let raw: &[(&str, &str, &str, u32, &[u32], &str, &str)] = &[
        ("电子材料与器件", "202510588", "1-18", 1, &[3, 4], "闵行，闵一教230", "闵行"),
        ("药物化学生物学", "202511878", "1-18", 5, &[3, 4], "闵行，闵二教316", "闵行"),
        ("人工智能药物设计", "202511867", "1-18", 1, &[6, 7], "中北，田家炳教书院132", "中北"),
        ("药学实验室安全与科研伦理", "202511868", "5-10", 3, &[6, 7, 8], "闵行，闵一教223", "闵行"),
        ("博士英语演讲", "202510232", "1-18", 4, &[6, 7], "闵行，闵一教128", "闵行"),
        ("中国马克思主义与当代", "202510656", "2-13", 1, &[11, 12, 13], "闵行，闵四教110", "闵行"),
        ("创新药物与前沿技术", "202511865", "1-18", 3, &[11, 12, 13], "中北，文史楼215", "中北"),
    ];
    raw.iter()
        .map(|(name, class_id, weeks, day, periods, location, campus)| Course {
            name: (*name).into(),
            class_id: (*class_id).into(),
            weeks: (*weeks).into(),
            day_of_week: *day,
            periods: periods.to_vec(),
            location: (*location).into(),
            campus: (*campus).into(),
        })
        .collect()
}

fn default_time_slots() -> Vec<TimeSlot> {
    let raw: &[(u32, &str, &str)] = &[
        (1, "8:00", "8:45"),
        (2, "8:50", "9:35"),
        (3, "9:50", "10:35"),
        (4, "10:40", "11:25"),
        (5, "11:30", "12:15"),
        (6, "13:00", "13:45"),
        (7, "13:50", "14:35"),
        (8, "14:50", "15:35"),
        (9, "15:40", "16:25"),
        (10, "16:30", "17:15"),
        (11, "18:00", "18:45"),
        (12, "18:50", "19:35"),
        (13, "19:40", "20:25"),
        (14, "20:30", "21:15"),
    ];
    raw.iter()
        .map(|(period, start, end)| TimeSlot {
            period: *period,
            start: (*start).into(),
            end: (*end).into(),
        })
        .collect()
}
