use crate::task::Task;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub key: String,
    pub tasks: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BoardSummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
    pub by_project: Vec<GroupCount>,
    pub by_priority: Vec<GroupCount>,
}

impl BoardSummary {
    pub fn from_tasks(tasks: &[Task], today: NaiveDate) -> PolarsResult<Self> {
        if tasks.is_empty() {
            return Ok(Self::default());
        }
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| !t.is_pending()).count();
        let overdue = tasks.iter().filter(|t| t.is_overdue(today)).count();

        let frame = Task::to_dataframe(tasks)?;
        Ok(Self {
            total,
            completed,
            pending: total - completed,
            overdue,
            by_project: count_by(&frame, "project")?,
            by_priority: count_by(&frame, "priority")?,
        })
    }

    pub fn to_cli_summary(&self) -> String {
        let mut parts = vec![
            format!("total={}", self.total),
            format!("completed={}", self.completed),
            format!("pending={}", self.pending),
            format!("overdue={}", self.overdue),
        ];
        if !self.by_project.is_empty() {
            let projects = self
                .by_project
                .iter()
                .map(|g| format!("{}:{}", g.key, g.tasks))
                .collect::<Vec<_>>()
                .join(",");
            parts.push(format!("projects={projects}"));
        }
        if !self.by_priority.is_empty() {
            let priorities = self
                .by_priority
                .iter()
                .map(|g| format!("{}:{}", g.key, g.tasks))
                .collect::<Vec<_>>()
                .join(",");
            parts.push(format!("priorities={priorities}"));
        }
        parts.join(", ")
    }
}

/// Task counts per distinct value of `column`, sorted by that value.
pub fn count_by(frame: &DataFrame, column: &str) -> PolarsResult<Vec<GroupCount>> {
    let counts = frame
        .clone()
        .lazy()
        .group_by([col(column)])
        .agg([col("id").count().cast(DataType::Int64).alias("tasks")])
        .sort([column], SortMultipleOptions::default())
        .collect()?;

    let keys = counts.column(column)?.str()?;
    let values = counts.column("tasks")?.i64()?;
    let mut groups = Vec::with_capacity(counts.height());
    for idx in 0..counts.height() {
        if let (Some(key), Some(tasks)) = (keys.get(idx), values.get(idx)) {
            groups.push(GroupCount {
                key: key.to_string(),
                tasks,
            });
        }
    }
    Ok(groups)
}
