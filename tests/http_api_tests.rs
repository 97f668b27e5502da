#![cfg(feature = "http_api")]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use parking_lot::RwLock;
use planner_tool::{Planner, PlannerConfig, Task, TaskStatus, http_api};
use serde_json::{Value, json};
use tower::util::ServiceExt;

fn new_router() -> axum::Router {
    let state = http_api::AppState::new(Planner::new(), PlannerConfig::default());
    http_api::router(state)
}

async fn send(app: &axum::Router, method: &str, uri: &str, payload: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match payload {
        Some(payload) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn task_lifecycle_via_http_api() {
    let app = new_router();

    let (status, created) = send(
        &app,
        "POST",
        "/tasks",
        Some(json!({ "title": "HTTP Demo", "estimated_hours": 2.0, "project": "Math" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Task = serde_json::from_value(created).unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.project, "Math");

    let (status, fetched) = send(&app, "GET", "/tasks/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "HTTP Demo");

    let (status, toggled) = send(&app, "POST", "/tasks/1/toggle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["status"], "completed");

    let (status, updated) = send(&app, "PUT", "/tasks/1/status", Some(json!({ "status": "pending" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "pending");

    let (status, _) = send(&app, "DELETE", "/tasks/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", "/tasks/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "task 1 not found");
}

#[tokio::test]
async fn blank_title_is_a_bad_request() {
    let app = new_router();
    let (status, body) = send(&app, "POST", "/tasks", Some(json!({ "title": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn task_listing_applies_query_filters() {
    let app = new_router();
    for (title, project) in [("Essay", "English"), ("Algebra", "Math"), ("Poem", "English")] {
        let (status, _) = send(
            &app,
            "POST",
            "/tasks",
            Some(json!({ "title": title, "estimated_hours": 1.0, "project": project })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    send(&app, "POST", "/tasks/3/toggle", None).await;

    let (_, english) = send(&app, "GET", "/tasks?project=English", None).await;
    assert_eq!(english.as_array().unwrap().len(), 2);

    let (_, pending) = send(&app, "GET", "/tasks?project=English&status=pending", None).await;
    let titles: Vec<&str> = pending
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Essay"]);

    let (_, completed) = send(&app, "GET", "/tasks?view=completed", None).await;
    assert_eq!(completed[0]["title"], "Poem");
}

#[tokio::test]
async fn plan_endpoints_generate_preview_and_clear() {
    let app = new_router();
    send(
        &app,
        "POST",
        "/tasks",
        Some(json!({ "title": "Essay", "estimated_hours": 5.0, "project": "English" })),
    )
    .await;

    let (status, preview) = send(
        &app,
        "POST",
        "/plan",
        Some(json!({ "daily_hours": 2.0, "horizon_days": 3, "mode": "preview", "start": "2025-03-03" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["mode"], "preview");
    assert_eq!(preview["entries"].as_array().unwrap().len(), 3);
    let (_, stored) = send(&app, "GET", "/plan", None).await;
    assert!(stored.as_array().unwrap().is_empty());

    let (_, report) = send(
        &app,
        "POST",
        "/plan",
        Some(json!({ "daily_hours": 2.0, "horizon_days": 3, "start": "2025-03-03" })),
    )
    .await;
    assert_eq!(report["mode"], "commit");
    assert_eq!(report["total_hours"], 5.0);
    let hours: Vec<f64> = report["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["hours"].as_f64().unwrap())
        .collect();
    assert_eq!(hours, vec![2.0, 2.0, 1.0]);
    assert_eq!(report["per_day"]["2025-03-03"], 2.0);
    assert_eq!(report["per_day"]["2025-03-05"], 1.0);

    let (_, stored) = send(&app, "GET", "/plan", None).await;
    assert_eq!(stored.as_array().unwrap().len(), 3);
    assert_eq!(stored[0]["date"], "2025-03-03");

    let (_, task) = send(&app, "GET", "/tasks/1", None).await;
    assert_eq!(task["estimated_hours"], 0.0);

    let (status, _) = send(&app, "DELETE", "/plan", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, stored) = send(&app, "GET", "/plan", None).await;
    assert!(stored.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn exams_classes_and_projects() {
    let app = new_router();

    let (status, project) = send(&app, "POST", "/projects", Some(json!({ "name": "Physics" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(project["color"], "#ff6b6b");
    let (_, projects) = send(&app, "GET", "/projects", None).await;
    assert_eq!(projects.as_array().unwrap().len(), 1);

    let (status, exam) = send(
        &app,
        "POST",
        "/exams",
        Some(json!({ "subject": "Physics", "title": "Old final", "date": "2000-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, all) = send(&app, "GET", "/exams", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
    let (_, upcoming) = send(&app, "GET", "/exams?upcoming=true", None).await;
    assert!(upcoming.as_array().unwrap().is_empty());
    let exam_uri = format!("/exams/{}", exam["id"]);
    let (status, _) = send(&app, "DELETE", &exam_uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", &exam_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for (subject, weekday, start) in [("Lab", "Mon", "13:00:00"), ("Lecture", "Mon", "09:00:00"), ("Seminar", "Fri", "10:00:00")] {
        let (status, _) = send(
            &app,
            "POST",
            "/classes",
            Some(json!({ "subject": subject, "weekday": weekday, "start": start, "end": "23:00:00" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (_, monday) = send(&app, "GET", "/classes?weekday=Mon", None).await;
    let subjects: Vec<&str> = monday
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["subject"].as_str().unwrap())
        .collect();
    assert_eq!(subjects, vec!["Lecture", "Lab"]);
}

#[tokio::test]
async fn summary_and_health() {
    let planner = Arc::new(RwLock::new(Planner::new()));
    let state = http_api::AppState::with_shared(planner.clone(), PlannerConfig::default());
    let app = http_api::router(state);

    let (status, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");

    send(&app, "POST", "/tasks", Some(json!({ "title": "A", "estimated_hours": 1.0 }))).await;
    send(&app, "POST", "/tasks", Some(json!({ "title": "B", "estimated_hours": 1.0 }))).await;
    send(&app, "POST", "/tasks/2/toggle", None).await;

    let (_, summary) = send(&app, "GET", "/summary", None).await;
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["completed"], 1);
    assert_eq!(summary["by_project"][0]["key"], "Inbox");

    assert_eq!(planner.read().find_task(2).unwrap().status, TaskStatus::Completed);
}
