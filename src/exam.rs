use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exam {
    pub id: i32,
    pub subject: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Exam {
    pub fn new(id: i32, subject: impl Into<String>, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            subject: subject.into(),
            title: title.into(),
            date,
            notes: None,
        }
    }

    /// Whole days from `today` until the exam; negative once it has passed.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.date - today).num_days()
    }
}

/// An exam paired with its countdown, as listed by `Planner::upcoming_exams`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamCountdown {
    pub exam: Exam,
    pub days_left: i64,
}
