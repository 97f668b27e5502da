use chrono::{NaiveDate, NaiveTime, Weekday};
use planner_tool::{
    NewClass, NewExam, NewProject, NewTask, PlanRequest, Planner, PlannerError, ScheduleEntry,
    save_board_to_json, save_plan_to_csv, save_plan_to_json,
};
use tempfile::{NamedTempFile, tempdir};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn planned_board() -> Planner {
    let mut planner = Planner::new();
    planner.add_project(NewProject::named("English")).unwrap();
    planner
        .add_task(NewTask::new("Essay", 2.5).project("English").importance(5))
        .unwrap();
    planner
        .add_task(NewTask::new("Vocab, list", 1.0).project("French"))
        .unwrap();
    planner
        .add_exam(NewExam {
            subject: "English".into(),
            title: "Final".into(),
            date: d(2025, 6, 2),
            notes: Some("Room 4".into()),
        })
        .unwrap();
    planner
        .add_class(NewClass {
            subject: "French".into(),
            weekday: Weekday::Thu,
            start: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            location: Some("B12".into()),
        })
        .unwrap();
    planner.generate_plan(PlanRequest::new(2.0, 2, d(2025, 3, 3)));
    planner
}

#[test]
fn plan_csv_has_header_and_formatted_hours() {
    let planner = planned_board();
    let file = NamedTempFile::new().unwrap();
    save_plan_to_csv(planner.plan(), file.path()).unwrap();

    let contents = std::fs::read_to_string(file.path()).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "date,session,subject,task_id,task,hours");
    assert_eq!(lines[1], "2025-03-03,Session 1,English,2,Essay,2.00");
    assert_eq!(lines[2], "2025-03-04,Session 1,English,2,Essay,0.50");
    assert_eq!(lines[3], "2025-03-04,Session 2,French,3,\"Vocab, list\",1.00");
    assert_eq!(lines.len(), 4);
}

#[test]
fn empty_plan_csv_is_empty() {
    let file = NamedTempFile::new().unwrap();
    save_plan_to_csv(&[], file.path()).unwrap();
    assert!(std::fs::read_to_string(file.path()).unwrap().is_empty());
}

#[test]
fn plan_json_round_trips_entries() {
    let planner = planned_board();
    let file = NamedTempFile::new().unwrap();
    save_plan_to_json(planner.plan(), file.path()).unwrap();

    let contents = std::fs::read_to_string(file.path()).unwrap();
    let entries: Vec<ScheduleEntry> = serde_json::from_str(&contents).unwrap();
    assert_eq!(entries.as_slice(), planner.plan());
}

#[test]
fn board_json_contains_every_record_kind() {
    let planner = planned_board();
    let file = NamedTempFile::new().unwrap();
    save_board_to_json(&planner, file.path()).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
    assert_eq!(value["projects"][0]["name"], "English");
    assert_eq!(value["tasks"].as_array().unwrap().len(), 2);
    assert_eq!(value["tasks"][0]["estimated_hours"], 0.0);
    assert_eq!(value["exams"][0]["notes"], "Room 4");
    assert_eq!(value["classes"][0]["weekday"], "Thu");
    assert_eq!(value["plan"].as_array().unwrap().len(), 3);
}

#[test]
fn missing_directory_surfaces_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("plan.json");
    let err = save_plan_to_json(&[], &path).unwrap_err();
    assert!(matches!(err, PlannerError::Io(_)));
}
