use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use chrono::{NaiveDate, Weekday};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::{
    BoardSummary, ClassSession, Exam, ExamCountdown, NewClass, NewExam, NewProject, NewTask,
    PlanMode, PlanReport, PlanRequest, Planner, PlannerConfig, PlannerError, Project,
    ScheduleEntry, StatusFilter, Task, TaskFilter, TaskStatus, TaskView, dates,
};

#[derive(Clone)]
pub struct AppState {
    planner: Arc<RwLock<Planner>>,
    config: Arc<PlannerConfig>,
}

impl AppState {
    pub fn new(planner: Planner, config: PlannerConfig) -> Self {
        Self {
            planner: Arc::new(RwLock::new(planner)),
            config: Arc::new(config),
        }
    }

    pub fn with_shared(planner: Arc<RwLock<Planner>>, config: PlannerConfig) -> Self {
        Self {
            planner,
            config: Arc::new(config),
        }
    }

    fn planner(&self) -> Arc<RwLock<Planner>> {
        self.planner.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<PlannerError> for ApiError {
    fn from(value: PlannerError) -> Self {
        match value {
            err if err.is_not_found() => ApiError::NotFound(err.to_string()),
            err @ (PlannerError::EmptyField { .. } | PlannerError::InvalidInput(_)) => {
                ApiError::Invalid(err.to_string())
            }
            err => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
            ApiError::Internal(message) => {
                warn!(%message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

#[derive(Debug, Deserialize, Default)]
struct TaskQuery {
    view: Option<TaskView>,
    project: Option<String>,
    status: Option<StatusFilter>,
}

#[derive(Debug, Deserialize)]
struct StatusPayload {
    status: TaskStatus,
}

#[derive(Debug, Deserialize, Default)]
struct ExamQuery {
    #[serde(default)]
    upcoming: bool,
}

#[derive(Debug, Deserialize, Default)]
struct ClassQuery {
    weekday: Option<Weekday>,
}

/// Plan parameters; anything missing comes from the server config.
#[derive(Debug, Deserialize, Default)]
struct PlanPayload {
    daily_hours: Option<f64>,
    horizon_days: Option<u32>,
    mode: Option<PlanMode>,
    start: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ExamListing {
    All(Vec<Exam>),
    Upcoming(Vec<ExamCountdown>),
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/projects", get(list_projects).post(create_project))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/:id", get(get_task).delete(delete_task))
        .route("/tasks/:id/toggle", post(toggle_task))
        .route("/tasks/:id/status", put(set_task_status))
        .route("/exams", get(list_exams).post(create_exam))
        .route("/exams/:id", delete(delete_exam))
        .route("/classes", get(list_classes).post(create_class))
        .route("/classes/:id", delete(delete_class))
        .route("/plan", get(get_plan).post(generate_plan).delete(clear_plan))
        .route("/summary", get(summary))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, planner: Planner, config: PlannerConfig) -> std::io::Result<()> {
    let state = AppState::new(planner, config);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "http api listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn list_projects(State(state): State<AppState>) -> Json<Vec<Project>> {
    let planner = state.planner();
    let projects = planner.read().projects().to_vec();
    Json(projects)
}

async fn create_project(
    State(state): State<AppState>,
    Json(input): Json<NewProject>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let planner = state.planner();
    let mut guard = planner.write();
    let id = guard.add_project(input)?;
    let created = guard
        .projects()
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .ok_or_else(|| ApiError::internal("project not found after creation"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> Json<Vec<Task>> {
    let filter = TaskFilter {
        view: query.view.unwrap_or_default(),
        project: query.project,
        status: query.status.unwrap_or_default(),
    };
    let planner = state.planner();
    let tasks = {
        let guard = planner.read();
        guard
            .filter_tasks(&filter, dates::today())
            .into_iter()
            .cloned()
            .collect()
    };
    Json(tasks)
}

async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<i32>,
) -> Result<Json<Task>, ApiError> {
    let planner = state.planner();
    let guard = planner.read();
    guard
        .find_task(task_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| PlannerError::TaskNotFound(task_id).into())
}

async fn create_task(
    State(state): State<AppState>,
    Json(input): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let planner = state.planner();
    let mut guard = planner.write();
    let id = guard.add_task(input)?;
    let created = guard
        .find_task(id)
        .cloned()
        .ok_or_else(|| ApiError::internal("task not found after creation"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn toggle_task(
    State(state): State<AppState>,
    Path(task_id): Path<i32>,
) -> Result<Json<Task>, ApiError> {
    let planner = state.planner();
    let mut guard = planner.write();
    guard.toggle_task(task_id)?;
    guard
        .find_task(task_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::internal("task not found after toggle"))
}

async fn set_task_status(
    State(state): State<AppState>,
    Path(task_id): Path<i32>,
    Json(payload): Json<StatusPayload>,
) -> Result<Json<Task>, ApiError> {
    let planner = state.planner();
    let mut guard = planner.write();
    guard.set_task_status(task_id, payload.status)?;
    guard
        .find_task(task_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::internal("task not found after status update"))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let planner = state.planner();
    planner.write().delete_task(task_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_exams(
    State(state): State<AppState>,
    Query(query): Query<ExamQuery>,
) -> Json<ExamListing> {
    let planner = state.planner();
    let guard = planner.read();
    let listing = if query.upcoming {
        ExamListing::Upcoming(guard.upcoming_exams(dates::today()))
    } else {
        ExamListing::All(guard.exams().to_vec())
    };
    Json(listing)
}

async fn create_exam(
    State(state): State<AppState>,
    Json(input): Json<NewExam>,
) -> Result<(StatusCode, Json<Exam>), ApiError> {
    let planner = state.planner();
    let mut guard = planner.write();
    let id = guard.add_exam(input)?;
    let created = guard
        .exams()
        .iter()
        .find(|e| e.id == id)
        .cloned()
        .ok_or_else(|| ApiError::internal("exam not found after creation"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let planner = state.planner();
    planner.write().delete_exam(exam_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_classes(
    State(state): State<AppState>,
    Query(query): Query<ClassQuery>,
) -> Json<Vec<ClassSession>> {
    let planner = state.planner();
    let guard = planner.read();
    let classes = match query.weekday {
        Some(weekday) => guard.timetable_for(weekday).into_iter().cloned().collect(),
        None => guard.classes().to_vec(),
    };
    Json(classes)
}

async fn create_class(
    State(state): State<AppState>,
    Json(input): Json<NewClass>,
) -> Result<(StatusCode, Json<ClassSession>), ApiError> {
    let planner = state.planner();
    let mut guard = planner.write();
    let id = guard.add_class(input)?;
    let created = guard
        .classes()
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .ok_or_else(|| ApiError::internal("class not found after creation"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_class(
    State(state): State<AppState>,
    Path(class_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let planner = state.planner();
    planner.write().delete_class(class_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_plan(State(state): State<AppState>) -> Json<Vec<ScheduleEntry>> {
    let planner = state.planner();
    let entries = planner.read().plan().to_vec();
    Json(entries)
}

async fn generate_plan(
    State(state): State<AppState>,
    Json(payload): Json<PlanPayload>,
) -> Json<PlanReport> {
    let request = PlanRequest {
        daily_hours: payload.daily_hours.unwrap_or(state.config.daily_hours),
        horizon_days: payload.horizon_days.unwrap_or(state.config.horizon_days),
        mode: payload.mode.unwrap_or(state.config.plan_mode),
        start: payload.start.unwrap_or_else(dates::today),
    };
    let planner = state.planner();
    let report = planner.write().generate_plan(request);
    Json(report)
}

async fn clear_plan(State(state): State<AppState>) -> StatusCode {
    let planner = state.planner();
    planner.write().clear_plan();
    StatusCode::NO_CONTENT
}

async fn summary(State(state): State<AppState>) -> Result<Json<BoardSummary>, ApiError> {
    let planner = state.planner();
    let summary = planner.read().summary(dates::today())?;
    Ok(Json(summary))
}
