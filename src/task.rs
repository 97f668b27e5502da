use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "completed" | "done" => Ok(TaskStatus::Completed),
            other => Err(format!("unknown task status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    /// Higher rank sorts first in task listings.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
            Priority::Urgent => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Priority::ALL.iter().map(Priority::as_str).collect();
                format!("unknown priority '{wanted}', expected one of {}", known.join(", "))
            })
    }
}

/// Ordinal 1-5 used for importance and difficulty. Out-of-range input is
/// clamped rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(3)
    }
}

impl From<u8> for Rating {
    fn from(value: u8) -> Self {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub project: String,
    /// Remaining effort in hours. Committed plan runs draw this down.
    pub estimated_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub importance: Rating,
    #[serde(default)]
    pub difficulty: Rating,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub status: TaskStatus,
    pub created_at: NaiveDateTime,
}

impl Task {
    pub fn new(
        id: i32,
        title: impl Into<String>,
        project: impl Into<String>,
        estimated_hours: f64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            project: project.into(),
            estimated_hours,
            due_date: None,
            importance: Rating::default(),
            difficulty: Rating::default(),
            priority: Priority::default(),
            labels: Vec::new(),
            status: TaskStatus::Pending,
            created_at: chrono::Local::now().naive_local(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_pending() && self.due_date.is_some_and(|due| due < today)
    }

    /// Split comma separated label text, trimming and dropping empties.
    pub fn parse_labels(text: &str) -> Vec<String> {
        text.split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }

    pub fn frame_schema() -> Schema {
        Schema::from_iter(vec![
            Field::new("id".into(), DataType::Int32),
            Field::new("title".into(), DataType::String),
            Field::new("project".into(), DataType::String),
            Field::new("priority".into(), DataType::String),
            Field::new("status".into(), DataType::String),
            Field::new("due_date".into(), DataType::Date),
            Field::new("estimated_hours".into(), DataType::Float64),
            Field::new("importance".into(), DataType::Int32),
            Field::new("difficulty".into(), DataType::Int32),
            Field::new("labels".into(), DataType::String),
        ])
    }

    /// Column-wise frame of the given tasks, one row per task in slice order.
    pub fn to_dataframe(tasks: &[Task]) -> PolarsResult<DataFrame> {
        if tasks.is_empty() {
            return Ok(DataFrame::empty_with_schema(&Self::frame_schema()));
        }

        let ids: Vec<i32> = tasks.iter().map(|t| t.id).collect();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        let projects: Vec<&str> = tasks.iter().map(|t| t.project.as_str()).collect();
        let priorities: Vec<&str> = tasks.iter().map(|t| t.priority.as_str()).collect();
        let statuses: Vec<&str> = tasks.iter().map(|t| t.status.as_str()).collect();
        let due_dates: Vec<Option<i32>> = tasks
            .iter()
            .map(|t| t.due_date.map(crate::dates::date_to_i32))
            .collect();
        let hours: Vec<f64> = tasks.iter().map(|t| t.estimated_hours).collect();
        let importance: Vec<i32> = tasks.iter().map(|t| t.importance.value() as i32).collect();
        let difficulty: Vec<i32> = tasks.iter().map(|t| t.difficulty.value() as i32).collect();
        let labels: Vec<String> = tasks.iter().map(|t| t.labels.join(",")).collect();

        let columns: Vec<Column> = vec![
            Series::new(PlSmallStr::from_static("id"), ids).into_column(),
            Series::new(PlSmallStr::from_static("title"), titles).into_column(),
            Series::new(PlSmallStr::from_static("project"), projects).into_column(),
            Series::new(PlSmallStr::from_static("priority"), priorities).into_column(),
            Series::new(PlSmallStr::from_static("status"), statuses).into_column(),
            Series::new(PlSmallStr::from_static("due_date"), due_dates)
                .cast(&DataType::Date)?
                .into_column(),
            Series::new(PlSmallStr::from_static("estimated_hours"), hours).into_column(),
            Series::new(PlSmallStr::from_static("importance"), importance).into_column(),
            Series::new(PlSmallStr::from_static("difficulty"), difficulty).into_column(),
            Series::new(PlSmallStr::from_static("labels"), labels).into_column(),
        ];

        DataFrame::new(columns)
    }
}
