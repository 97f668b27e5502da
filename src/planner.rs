use crate::analytics::BoardSummary;
use crate::calculations::StudyPlanPass;
use crate::commands::{Command, CommandOutcome, NewClass, NewExam, NewProject, NewTask};
use crate::config::PlannerConfig;
use crate::error::{PlannerError, PlannerResult};
use crate::exam::{Exam, ExamCountdown};
use crate::filter::TaskFilter;
use crate::ids::{IdSource, SequentialIds};
use crate::project::Project;
use crate::schedule::{PlanMode, PlanReport, PlanRequest, ScheduleEntry};
use crate::task::{Task, TaskStatus};
use crate::timetable::ClassSession;
use crate::validation::{optional_text, require_text};
use chrono::{Datelike, NaiveDate, Weekday};
use polars::prelude::{DataFrame, PolarsError};
use tracing::{debug, info};

/// Session state: the record stores plus the last committed study plan.
///
/// One `Planner` lives for one interactive session. All mutation goes
/// through `&mut self`, either via the named handlers or `apply`.
pub struct Planner {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    exams: Vec<Exam>,
    classes: Vec<ClassSession>,
    plan: Vec<ScheduleEntry>,
    ids: Box<dyn IdSource>,
    default_project: String,
    default_project_color: String,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

impl Planner {
    pub fn new() -> Self {
        Self::with_config(&PlannerConfig::default())
    }

    pub fn with_config(config: &PlannerConfig) -> Self {
        Self::with_id_source(config, Box::new(SequentialIds::new()))
    }

    pub fn with_id_source(config: &PlannerConfig, ids: Box<dyn IdSource>) -> Self {
        Self {
            projects: Vec::new(),
            tasks: Vec::new(),
            exams: Vec::new(),
            classes: Vec::new(),
            plan: Vec::new(),
            ids,
            default_project: config.default_project.clone(),
            default_project_color: config.default_project_color.clone(),
        }
    }

    pub fn apply(&mut self, command: Command) -> PlannerResult<CommandOutcome> {
        debug!(?command, "applying command");
        match command {
            Command::AddProject(input) => {
                let id = self.add_project(input)?;
                Ok(CommandOutcome::Created { id })
            }
            Command::AddTask(input) => {
                let id = self.add_task(input)?;
                Ok(CommandOutcome::Created { id })
            }
            Command::SetTaskStatus { task_id, status } => {
                self.set_task_status(task_id, status)?;
                Ok(CommandOutcome::StatusChanged {
                    id: task_id,
                    status,
                })
            }
            Command::ToggleTask { task_id } => {
                let status = self.toggle_task(task_id)?;
                Ok(CommandOutcome::StatusChanged {
                    id: task_id,
                    status,
                })
            }
            Command::DeleteTask { task_id } => {
                self.delete_task(task_id)?;
                Ok(CommandOutcome::Deleted { id: task_id })
            }
            Command::AddExam(input) => {
                let id = self.add_exam(input)?;
                Ok(CommandOutcome::Created { id })
            }
            Command::DeleteExam { exam_id } => {
                self.delete_exam(exam_id)?;
                Ok(CommandOutcome::Deleted { id: exam_id })
            }
            Command::AddClass(input) => {
                let id = self.add_class(input)?;
                Ok(CommandOutcome::Created { id })
            }
            Command::DeleteClass { class_id } => {
                self.delete_class(class_id)?;
                Ok(CommandOutcome::Deleted { id: class_id })
            }
            Command::GeneratePlan(request) => Ok(CommandOutcome::Planned(self.generate_plan(request))),
            Command::ClearPlan => {
                self.clear_plan();
                Ok(CommandOutcome::PlanCleared)
            }
        }
    }

    // Projects

    pub fn add_project(&mut self, input: NewProject) -> PlannerResult<i32> {
        let name = require_text(&input.name, "project name")?;
        let color = optional_text(input.color.as_deref())
            .unwrap_or_else(|| self.default_project_color.clone());
        let id = self.ids.next_id()?;
        debug!(id, %name, "project added");
        self.projects.push(Project::new(id, name, color));
        Ok(id)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project_names(&self) -> Vec<&str> {
        self.projects.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn default_project(&self) -> &str {
        &self.default_project
    }

    // Tasks

    pub fn add_task(&mut self, input: NewTask) -> PlannerResult<i32> {
        let title = require_text(&input.title, "task title")?;
        let project = optional_text(input.project.as_deref())
            .unwrap_or_else(|| self.default_project.clone());
        let id = self.ids.next_id()?;

        let mut task = Task::new(id, title, project, input.estimated_hours);
        task.description = input.description.trim().to_string();
        task.due_date = input.due_date;
        task.importance = input.importance;
        task.difficulty = input.difficulty;
        task.priority = input.priority;
        task.labels = input
            .labels
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        debug!(id, title = %task.title, project = %task.project, "task added");
        self.tasks.push(task);
        Ok(id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn find_task(&self, task_id: i32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    fn task_mut(&mut self, task_id: i32) -> PlannerResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(PlannerError::TaskNotFound(task_id))
    }

    pub fn set_task_status(&mut self, task_id: i32, status: TaskStatus) -> PlannerResult<()> {
        self.task_mut(task_id)?.status = status;
        Ok(())
    }

    pub fn toggle_task(&mut self, task_id: i32) -> PlannerResult<TaskStatus> {
        let task = self.task_mut(task_id)?;
        task.status = task.status.toggled();
        Ok(task.status)
    }

    pub fn delete_task(&mut self, task_id: i32) -> PlannerResult<()> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != task_id);
        if self.tasks.len() == before {
            return Err(PlannerError::TaskNotFound(task_id));
        }
        Ok(())
    }

    pub fn pending_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.is_pending())
    }

    pub fn filter_tasks(&self, filter: &TaskFilter, today: NaiveDate) -> Vec<&Task> {
        filter.apply(&self.tasks, today)
    }

    pub fn tasks_frame(&self) -> Result<DataFrame, PolarsError> {
        Task::to_dataframe(&self.tasks)
    }

    pub fn summary(&self, today: NaiveDate) -> PlannerResult<BoardSummary> {
        Ok(BoardSummary::from_tasks(&self.tasks, today)?)
    }

    // Exams

    pub fn add_exam(&mut self, input: NewExam) -> PlannerResult<i32> {
        let subject = require_text(&input.subject, "exam subject")?;
        let title = require_text(&input.title, "exam title")?;
        let id = self.ids.next_id()?;
        let mut exam = Exam::new(id, subject, title, input.date);
        exam.notes = optional_text(input.notes.as_deref());
        self.exams.push(exam);
        Ok(id)
    }

    pub fn delete_exam(&mut self, exam_id: i32) -> PlannerResult<()> {
        let before = self.exams.len();
        self.exams.retain(|e| e.id != exam_id);
        if self.exams.len() == before {
            return Err(PlannerError::ExamNotFound(exam_id));
        }
        Ok(())
    }

    pub fn exams(&self) -> &[Exam] {
        &self.exams
    }

    /// Exams on or after `today`, soonest first.
    pub fn upcoming_exams(&self, today: NaiveDate) -> Vec<ExamCountdown> {
        let mut upcoming: Vec<ExamCountdown> = self
            .exams
            .iter()
            .filter(|e| e.date >= today)
            .map(|e| ExamCountdown {
                exam: e.clone(),
                days_left: e.days_until(today),
            })
            .collect();
        upcoming.sort_by(|a, b| a.exam.date.cmp(&b.exam.date).then(a.exam.id.cmp(&b.exam.id)));
        upcoming
    }

    // Timetable

    pub fn add_class(&mut self, input: NewClass) -> PlannerResult<i32> {
        let subject = require_text(&input.subject, "class subject")?;
        let id = self.ids.next_id()?;
        let mut class = ClassSession::new(id, subject, input.weekday, input.start, input.end);
        class.location = optional_text(input.location.as_deref());
        self.classes.push(class);
        Ok(id)
    }

    pub fn delete_class(&mut self, class_id: i32) -> PlannerResult<()> {
        let before = self.classes.len();
        self.classes.retain(|c| c.id != class_id);
        if self.classes.len() == before {
            return Err(PlannerError::ClassNotFound(class_id));
        }
        Ok(())
    }

    pub fn classes(&self) -> &[ClassSession] {
        &self.classes
    }

    pub fn timetable_for(&self, weekday: Weekday) -> Vec<&ClassSession> {
        let mut slots: Vec<&ClassSession> =
            self.classes.iter().filter(|c| c.weekday == weekday).collect();
        slots.sort_by(|a, b| a.start.cmp(&b.start).then(a.id.cmp(&b.id)));
        slots
    }

    pub fn classes_on(&self, date: NaiveDate) -> Vec<&ClassSession> {
        self.timetable_for(date.weekday())
    }

    // Study plan

    /// Run the greedy study plan over the pending tasks.
    ///
    /// `Commit` draws down task effort and replaces the stored plan, even
    /// when the result is empty. `Preview` leaves the planner untouched.
    pub fn generate_plan(&mut self, request: PlanRequest) -> PlanReport {
        let pass = StudyPlanPass::new(request.daily_hours, request.horizon_days);
        let output = match request.mode {
            PlanMode::Commit => {
                let mut pending: Vec<&mut Task> =
                    self.tasks.iter_mut().filter(|t| t.is_pending()).collect();
                pass.execute(&mut pending, request.start)
            }
            PlanMode::Preview => {
                let mut snapshot: Vec<Task> = self.pending_tasks().cloned().collect();
                let mut pending: Vec<&mut Task> = snapshot.iter_mut().collect();
                pass.execute(&mut pending, request.start)
            }
        };

        if request.mode == PlanMode::Commit {
            self.plan = output.entries.clone();
        }
        let report = PlanReport::new(request.mode, output.entries, output.unscheduled);
        info!(
            mode = %request.mode,
            entries = report.entries.len(),
            hours = report.total_hours,
            "study plan generated"
        );
        report
    }

    pub fn plan(&self) -> &[ScheduleEntry] {
        &self.plan
    }

    pub fn clear_plan(&mut self) {
        self.plan.clear();
    }

    pub fn plan_frame(&self) -> Result<DataFrame, PolarsError> {
        ScheduleEntry::to_dataframe(&self.plan)
    }
}
