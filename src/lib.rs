pub mod analytics;
pub mod calculations;
pub mod commands;
pub mod config;
pub mod dates;
pub mod error;
pub mod exam;
pub mod export;
pub mod filter;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod ids;
pub mod planner;
pub mod project;
pub mod schedule;
pub mod scoring;
pub mod task;
pub mod timetable;
pub(crate) mod validation;

pub use analytics::{BoardSummary, GroupCount};
pub use commands::{Command, CommandOutcome, NewClass, NewExam, NewProject, NewTask};
pub use config::PlannerConfig;
pub use error::{PlannerError, PlannerResult};
pub use exam::{Exam, ExamCountdown};
pub use export::{save_board_to_json, save_plan_to_csv, save_plan_to_json};
pub use filter::{StatusFilter, TaskFilter, TaskView};
pub use ids::{IdSource, SequentialIds};
pub use planner::Planner;
pub use project::Project;
pub use schedule::{PlanMode, PlanReport, PlanRequest, ScheduleEntry, Unscheduled};
pub use task::{Priority, Rating, Task, TaskStatus};
pub use timetable::ClassSession;
