use crate::dates;
use chrono::NaiveDate;
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Whether a plan run draws down task effort and replaces the stored plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanMode {
    #[default]
    Commit,
    Preview,
}

impl PlanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanMode::Commit => "commit",
            PlanMode::Preview => "preview",
        }
    }
}

impl fmt::Display for PlanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commit" => Ok(PlanMode::Commit),
            "preview" => Ok(PlanMode::Preview),
            other => Err(format!("unknown plan mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub daily_hours: f64,
    pub horizon_days: u32,
    #[serde(default)]
    pub mode: PlanMode,
    /// First planned day; urgency is measured from here.
    pub start: NaiveDate,
}

impl PlanRequest {
    pub fn new(daily_hours: f64, horizon_days: u32, start: NaiveDate) -> Self {
        Self {
            daily_hours,
            horizon_days,
            mode: PlanMode::Commit,
            start,
        }
    }

    pub fn preview(mut self) -> Self {
        self.mode = PlanMode::Preview;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub date: NaiveDate,
    pub session: String,
    pub subject: String,
    pub task_id: i32,
    pub task_title: String,
    pub hours: f64,
}

impl ScheduleEntry {
    pub fn session_label(ordinal: usize) -> String {
        format!("Session {ordinal}")
    }

    pub fn frame_schema() -> Schema {
        Schema::from_iter(vec![
            Field::new("date".into(), DataType::Date),
            Field::new("session".into(), DataType::String),
            Field::new("subject".into(), DataType::String),
            Field::new("task_id".into(), DataType::Int32),
            Field::new("task".into(), DataType::String),
            Field::new("hours".into(), DataType::Float64),
        ])
    }

    pub fn to_dataframe(entries: &[ScheduleEntry]) -> PolarsResult<DataFrame> {
        if entries.is_empty() {
            return Ok(DataFrame::empty_with_schema(&Self::frame_schema()));
        }
        let dates: Vec<i32> = entries.iter().map(|e| dates::date_to_i32(e.date)).collect();
        let sessions: Vec<&str> = entries.iter().map(|e| e.session.as_str()).collect();
        let subjects: Vec<&str> = entries.iter().map(|e| e.subject.as_str()).collect();
        let task_ids: Vec<i32> = entries.iter().map(|e| e.task_id).collect();
        let titles: Vec<&str> = entries.iter().map(|e| e.task_title.as_str()).collect();
        let hours: Vec<f64> = entries.iter().map(|e| e.hours).collect();

        let columns: Vec<Column> = vec![
            Series::new(PlSmallStr::from_static("date"), dates)
                .cast(&DataType::Date)?
                .into_column(),
            Series::new(PlSmallStr::from_static("session"), sessions).into_column(),
            Series::new(PlSmallStr::from_static("subject"), subjects).into_column(),
            Series::new(PlSmallStr::from_static("task_id"), task_ids).into_column(),
            Series::new(PlSmallStr::from_static("task"), titles).into_column(),
            Series::new(PlSmallStr::from_static("hours"), hours).into_column(),
        ];
        DataFrame::new(columns)
    }
}

/// Hours a task still needed when the horizon ran out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unscheduled {
    pub task_id: i32,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    pub mode: PlanMode,
    pub entries: Vec<ScheduleEntry>,
    pub total_hours: f64,
    /// Allocated hours per planned day.
    pub per_day: BTreeMap<NaiveDate, f64>,
    pub unscheduled: Vec<Unscheduled>,
}

impl PlanReport {
    pub fn new(mode: PlanMode, entries: Vec<ScheduleEntry>, unscheduled: Vec<Unscheduled>) -> Self {
        let total_hours = entries.iter().map(|e| e.hours).sum();
        let per_day = hours_per_day(&entries);
        Self {
            mode,
            entries,
            total_hours,
            per_day,
            unscheduled,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("mode={}", self.mode));
        parts.push(format!("entries={}", self.entries.len()));
        parts.push(format!("hours={:.2}", self.total_hours));
        if let (Some(first), Some(last)) = (self.per_day.keys().next(), self.per_day.keys().next_back()) {
            parts.push(format!("days={}..{}", first, last));
        }
        if !self.unscheduled.is_empty() {
            let left: f64 = self.unscheduled.iter().map(|u| u.hours).sum();
            parts.push(format!("unscheduled={:.2}", left));
        }
        parts.join(", ")
    }
}

pub fn hours_per_day(entries: &[ScheduleEntry]) -> BTreeMap<NaiveDate, f64> {
    let mut totals = BTreeMap::new();
    for entry in entries {
        *totals.entry(entry.date).or_insert(0.0) += entry.hours;
    }
    totals
}

pub fn hours_per_task(entries: &[ScheduleEntry]) -> BTreeMap<i32, f64> {
    let mut totals = BTreeMap::new();
    for entry in entries {
        *totals.entry(entry.task_id).or_insert(0.0) += entry.hours;
    }
    totals
}
