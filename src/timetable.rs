use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// One recurring weekly class slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSession {
    pub id: i32,
    pub subject: String,
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ClassSession {
    pub fn new(
        id: i32,
        subject: impl Into<String>,
        weekday: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Self {
        Self {
            id,
            subject: subject.into(),
            weekday,
            start,
            end,
            location: None,
        }
    }

    /// Length of the slot in hours. Zero when `end` is not after `start`.
    pub fn duration_hours(&self) -> f64 {
        let minutes = (self.end - self.start).num_minutes();
        if minutes <= 0 {
            0.0
        } else {
            minutes as f64 / 60.0
        }
    }
}

pub fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

pub fn parse_weekday(s: &str) -> Option<Weekday> {
    s.trim().parse::<Weekday>().ok()
}
