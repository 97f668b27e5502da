use crate::task::{Task, TaskStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::str::FromStr;

/// Quick views over the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskView {
    Today,
    Upcoming,
    Overdue,
    #[default]
    All,
    Completed,
}

impl TaskView {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskView::Today => "today",
            TaskView::Upcoming => "upcoming",
            TaskView::Overdue => "overdue",
            TaskView::All => "all",
            TaskView::Completed => "completed",
        }
    }

    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            TaskView::Today => task.due_date == Some(today),
            TaskView::Upcoming => task.due_date.is_some_and(|due| due > today),
            TaskView::Overdue => task.is_overdue(today),
            TaskView::All => true,
            TaskView::Completed => task.status == TaskStatus::Completed,
        }
    }
}

impl fmt::Display for TaskView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(TaskView::Today),
            "upcoming" => Ok(TaskView::Upcoming),
            "overdue" => Ok(TaskView::Overdue),
            "all" => Ok(TaskView::All),
            "completed" => Ok(TaskView::Completed),
            other => Err(format!("unknown view '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn matches(&self, status: TaskStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == TaskStatus::Pending,
            StatusFilter::Completed => status == TaskStatus::Completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(format!("unknown status filter '{other}'")),
        }
    }
}

/// View, project and status filters applied together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaskFilter {
    #[serde(default)]
    pub view: TaskView,
    /// `None` means every project.
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
}

impl TaskFilter {
    pub fn view(view: TaskView) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        if let Some(project) = &self.project {
            if &task.project != project {
                return false;
            }
        }
        self.status.matches(task.status) && self.view.matches(task, today)
    }

    /// Matching tasks, earliest due date first. Undated tasks go last; ties
    /// break on priority (urgent first) and then id.
    pub fn apply<'a>(&self, tasks: &'a [Task], today: NaiveDate) -> Vec<&'a Task> {
        let mut matched: Vec<&Task> = tasks.iter().filter(|t| self.matches(t, today)).collect();
        matched.sort_by(|a, b| listing_order(a, b));
        matched
    }
}

fn listing_order(a: &Task, b: &Task) -> Ordering {
    let due_key = |t: &Task| (t.due_date.is_none(), t.due_date);
    due_key(a)
        .cmp(&due_key(b))
        .then_with(|| Reverse(a.priority.rank()).cmp(&Reverse(b.priority.rank())))
        .then_with(|| a.id.cmp(&b.id))
}
