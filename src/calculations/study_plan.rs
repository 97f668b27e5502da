use crate::schedule::{ScheduleEntry, Unscheduled};
use crate::scoring;
use crate::task::Task;
use chrono::{Days, NaiveDate};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Hour amounts at or below this are treated as zero.
pub const EPSILON: f64 = 1e-9;

fn snap(hours: f64) -> f64 {
    if hours.abs() <= EPSILON { 0.0 } else { hours }
}

fn has_effort(task: &Task) -> bool {
    task.estimated_hours > EPSILON
}

/// Greedy daily allocation of study hours over a fixed horizon.
///
/// Tasks are ranked once by score and the ranking is reused for every day.
/// Each day starts with the full capacity, visits every task at most once
/// in rank order and hands each one `min(capacity left, effort left)`.
/// Unused capacity does not carry over.
pub struct StudyPlanPass {
    daily_hours: f64,
    horizon_days: u32,
}

#[derive(Debug, Clone, Default)]
pub struct StudyPlanOutput {
    pub entries: Vec<ScheduleEntry>,
    pub unscheduled: Vec<Unscheduled>,
}

impl StudyPlanPass {
    pub fn new(daily_hours: f64, horizon_days: u32) -> Self {
        Self {
            daily_hours,
            horizon_days,
        }
    }

    fn capacity(&self) -> f64 {
        if self.daily_hours.is_nan() || self.daily_hours <= EPSILON {
            warn!(
                daily_hours = self.daily_hours,
                "daily capacity too small, no hours will be allocated"
            );
            0.0
        } else {
            self.daily_hours
        }
    }

    /// Indices of `tasks` ordered by descending score. Equal scores keep
    /// their input order.
    pub fn rank(tasks: &[&mut Task], today: NaiveDate) -> Vec<usize> {
        let scores: Vec<f64> = tasks
            .par_iter()
            .map(|task| scoring::task_score(task, today))
            .collect();
        let mut order: Vec<usize> = (0..tasks.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        order
    }

    /// Allocate hours to `tasks`, drawing down their `estimated_hours` in place.
    /// Callers pass pending tasks only; the pass does not look at status.
    pub fn execute(&self, tasks: &mut [&mut Task], start: NaiveDate) -> StudyPlanOutput {
        if tasks.is_empty() {
            debug!("study plan requested with no pending tasks");
            return StudyPlanOutput::default();
        }

        let capacity = self.capacity();
        let order = Self::rank(tasks, start);
        let mut entries = Vec::new();

        for day in 0..self.horizon_days {
            if capacity <= EPSILON || !tasks.iter().any(|t| has_effort(t)) {
                break;
            }
            let Some(date) = start.checked_add_days(Days::new(u64::from(day))) else {
                warn!(%start, day, "horizon runs past the last representable date");
                break;
            };
            let mut remaining = capacity;
            let mut sessions = 0usize;

            for &idx in &order {
                if remaining <= EPSILON {
                    break;
                }
                let task = &mut *tasks[idx];
                if !has_effort(task) {
                    continue;
                }
                let hours = remaining.min(task.estimated_hours);
                task.estimated_hours = snap(task.estimated_hours - hours);
                remaining = snap(remaining - hours);
                sessions += 1;
                entries.push(ScheduleEntry {
                    date,
                    session: ScheduleEntry::session_label(sessions),
                    subject: task.project.clone(),
                    task_id: task.id,
                    task_title: task.title.clone(),
                    hours,
                });
            }
            debug!(%date, sessions, left = remaining, "planned day");
        }

        let unscheduled = order
            .iter()
            .map(|&idx| &*tasks[idx])
            .filter(|task| has_effort(task))
            .map(|task| Unscheduled {
                task_id: task.id,
                hours: task.estimated_hours,
            })
            .collect();

        StudyPlanOutput {
            entries,
            unscheduled,
        }
    }
}
