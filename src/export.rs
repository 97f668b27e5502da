use crate::error::PlannerResult;
use crate::exam::Exam;
use crate::planner::Planner;
use crate::project::Project;
use crate::schedule::ScheduleEntry;
use crate::task::Task;
use crate::timetable::ClassSession;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Everything on the board at export time. Written out, never read back.
#[derive(Serialize)]
struct BoardSnapshot<'a> {
    projects: &'a [Project],
    tasks: &'a [Task],
    exams: &'a [Exam],
    classes: &'a [ClassSession],
    plan: &'a [ScheduleEntry],
}

impl<'a> BoardSnapshot<'a> {
    fn from_planner(planner: &'a Planner) -> Self {
        Self {
            projects: planner.projects(),
            tasks: planner.tasks(),
            exams: planner.exams(),
            classes: planner.classes(),
            plan: planner.plan(),
        }
    }
}

pub fn save_board_to_json<P: AsRef<Path>>(planner: &Planner, path: P) -> PlannerResult<()> {
    let snapshot = BoardSnapshot::from_planner(planner);
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    debug!(path = %path.as_ref().display(), "board exported");
    Ok(())
}

pub fn save_plan_to_json<P: AsRef<Path>>(entries: &[ScheduleEntry], path: P) -> PlannerResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, entries)?;
    Ok(())
}

#[derive(Serialize)]
struct ScheduleCsvRecord<'a> {
    date: String,
    session: &'a str,
    subject: &'a str,
    task_id: i32,
    task: &'a str,
    hours: String,
}

impl<'a> From<&'a ScheduleEntry> for ScheduleCsvRecord<'a> {
    fn from(entry: &'a ScheduleEntry) -> Self {
        Self {
            date: entry.date.format("%Y-%m-%d").to_string(),
            session: &entry.session,
            subject: &entry.subject,
            task_id: entry.task_id,
            task: &entry.task_title,
            hours: format!("{:.2}", entry.hours),
        }
    }
}

pub fn save_plan_to_csv<P: AsRef<Path>>(entries: &[ScheduleEntry], path: P) -> PlannerResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for entry in entries {
        writer.serialize(ScheduleCsvRecord::from(entry))?;
    }
    writer.flush()?;
    Ok(())
}
