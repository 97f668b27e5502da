use crate::task::Task;
use chrono::NaiveDate;

/// Days assumed for a task without a due date.
pub const DEFAULT_DAYS_LEFT: i64 = 30;

pub const IMPORTANCE_WEIGHT: f64 = 2.0;
pub const DIFFICULTY_WEIGHT: f64 = 1.0;
pub const URGENCY_WEIGHT: f64 = 5.0;

/// Days until `due`, never below 1. Overdue tasks count as due tomorrow.
pub fn days_left(due: Option<NaiveDate>, today: NaiveDate) -> i64 {
    match due {
        Some(due) => (due - today).num_days().max(1),
        None => DEFAULT_DAYS_LEFT,
    }
}

pub fn urgency(due: Option<NaiveDate>, today: NaiveDate) -> f64 {
    1.0 / days_left(due, today) as f64
}

/// Linear weighting: importance dominates, urgency is secondary and
/// difficulty is the weakest signal.
pub fn task_score(task: &Task, today: NaiveDate) -> f64 {
    task.importance.value() as f64 * IMPORTANCE_WEIGHT
        + task.difficulty.value() as f64 * DIFFICULTY_WEIGHT
        + urgency(task.due_date, today) * URGENCY_WEIGHT
}
