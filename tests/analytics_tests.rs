use chrono::NaiveDate;
use planner_tool::{BoardSummary, GroupCount, NewTask, PlanRequest, Planner, Priority};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn group(key: &str, tasks: i64) -> GroupCount {
    GroupCount {
        key: key.to_string(),
        tasks,
    }
}

#[test]
fn summary_counts_status_project_and_priority() {
    let today = d(2025, 3, 10);
    let mut planner = Planner::new();
    planner
        .add_task(NewTask::new("A", 1.0).project("Math").due(d(2025, 3, 1)))
        .unwrap();
    planner
        .add_task(NewTask::new("B", 1.0).project("Math").priority(Priority::High))
        .unwrap();
    let c = planner
        .add_task(NewTask::new("C", 1.0).project("Bio").priority(Priority::Urgent).due(d(2025, 3, 2)))
        .unwrap();
    planner.toggle_task(c).unwrap();

    let summary = planner.summary(today).unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.pending, 2);
    assert_eq!(summary.overdue, 1);
    assert_eq!(summary.by_project, vec![group("Bio", 1), group("Math", 2)]);
    assert_eq!(
        summary.by_priority,
        vec![group("high", 1), group("medium", 1), group("urgent", 1)]
    );
    assert_eq!(
        summary.to_cli_summary(),
        "total=3, completed=1, pending=2, overdue=1, projects=Bio:1,Math:2, priorities=high:1,medium:1,urgent:1"
    );
}

#[test]
fn empty_board_has_an_empty_summary() {
    let summary = Planner::new().summary(d(2025, 1, 1)).unwrap();
    assert_eq!(summary, BoardSummary::default());
    assert_eq!(summary.to_cli_summary(), "total=0, completed=0, pending=0, overdue=0");
}

#[test]
fn task_frame_tracks_remaining_effort() {
    let mut planner = Planner::new();
    planner
        .add_task(NewTask::new("Essay", 3.0).project("English").due(d(2025, 3, 20)))
        .unwrap();
    planner.add_task(NewTask::new("Undated", 1.0)).unwrap();
    planner.generate_plan(PlanRequest::new(2.0, 1, d(2025, 3, 10)));

    let df = planner.tasks_frame().unwrap();
    assert_eq!(df.height(), 2);
    let hours = df.column("estimated_hours").unwrap().f64().unwrap();
    assert_eq!(hours.get(0), Some(1.0));
    assert_eq!(hours.get(1), Some(1.0));
    let due = df.column("due_date").unwrap().date().unwrap();
    assert!(due.get(0).is_some());
    assert_eq!(due.get(1), None);
}

#[test]
fn plan_frame_has_one_row_per_entry() {
    let mut planner = Planner::new();
    assert_eq!(planner.plan_frame().unwrap().height(), 0);

    planner.add_task(NewTask::new("Essay", 5.0).project("English")).unwrap();
    planner.generate_plan(PlanRequest::new(2.0, 3, d(2025, 3, 10)));

    let df = planner.plan_frame().unwrap();
    assert_eq!(df.height(), 3);
    let sessions = df.column("session").unwrap().str().unwrap();
    assert_eq!(sessions.get(0), Some("Session 1"));
    let hours = df.column("hours").unwrap().f64().unwrap();
    assert_eq!(hours.get(2), Some(1.0));
}
