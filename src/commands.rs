use crate::schedule::{PlanReport, PlanRequest};
use crate::task::{Priority, Rating, TaskStatus};
use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl NewProject {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Blank or missing falls back to the configured default project.
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub importance: Rating,
    #[serde(default)]
    pub difficulty: Rating,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, estimated_hours: f64) -> Self {
        Self {
            title: title.into(),
            estimated_hours,
            ..Self::default()
        }
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn due(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn importance(mut self, value: u8) -> Self {
        self.importance = Rating::new(value);
        self
    }

    pub fn difficulty(mut self, value: u8) -> Self {
        self.difficulty = Rating::new(value);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExam {
    pub subject: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClass {
    pub subject: String,
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
    #[serde(default)]
    pub location: Option<String>,
}

/// One user action against a `Planner`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    AddProject(NewProject),
    AddTask(NewTask),
    SetTaskStatus { task_id: i32, status: TaskStatus },
    ToggleTask { task_id: i32 },
    DeleteTask { task_id: i32 },
    AddExam(NewExam),
    DeleteExam { exam_id: i32 },
    AddClass(NewClass),
    DeleteClass { class_id: i32 },
    GeneratePlan(PlanRequest),
    ClearPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    Created { id: i32 },
    StatusChanged { id: i32, status: TaskStatus },
    Deleted { id: i32 },
    Planned(PlanReport),
    PlanCleared,
}
