use chrono::NaiveDate;
use clap::Parser;
use planner_tool::timetable::{parse_time, parse_weekday};
use planner_tool::{
    NewClass, NewExam, NewProject, NewTask, PlanMode, PlanRequest, Planner, PlannerConfig,
    StatusFilter, Task, TaskFilter, TaskStatus, TaskView, dates, save_board_to_json,
    save_plan_to_csv, save_plan_to_json,
};
use polars::prelude::{AnyValue, DataFrame};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Interactive study and task planner
#[derive(Parser)]
#[command(name = "planner-cli", about = "Interactive study and task planner")]
struct Cli {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "log-level")]
    log_level: Option<String>,
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| {
        eprintln!("Warning: unknown log level '{level}', defaulting to info");
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
}

fn cell_text(av: &AnyValue) -> String {
    match av {
        AnyValue::Null => String::new(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::Float64(v) => format!("{v:.2}"),
        AnyValue::String(s) => s.to_string(),
        AnyValue::Date(days) => dates::i32_to_date(*days).to_string(),
        _ => av.to_string(),
    }
}

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|col| {
                col.get(row_idx)
                    .map(|av| cell_text(&av))
                    .unwrap_or_default()
            })
            .collect();
        rows.push(row);
    }

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |cells: &[String]| {
        let mut line = String::from("|");
        for (ci, cell) in cells.iter().enumerate() {
            let pad = widths[ci].saturating_sub(cell.chars().count());
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&col_names));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_frame(frame: Result<DataFrame, polars::prelude::PolarsError>) {
    match frame {
        Ok(df) => println!("{}", render_df_as_text_table(&df)),
        Err(e) => println!("Error rendering table: {}", e),
    }
}

fn print_help() {
    println!(
        "Commands:\n  help                                   Show this help\n  tasks [view] [project|*] [status]      List tasks (view: today|upcoming|overdue|all|completed,\n                                         status: all|pending|completed)\n  task add <project|-> <hours> <importance> <difficulty> <due|-> <title...> [+label,...]\n                                         Add a pending task (due as YYYY-MM-DD)\n  done <id> | undo <id> | toggle <id>    Change task status\n  delete <id>                            Delete a task\n  project add <name> [color]             Add a project\n  projects                               List projects\n  exam add <subject> <YYYY-MM-DD> <title...>\n                                         Add an exam\n  exam delete <id>                       Delete an exam\n  exams [all]                            Upcoming exams (or every exam)\n  class add <subject> <weekday> <HH:MM> <HH:MM> [location...]\n                                         Add a weekly class\n  class delete <id>                      Delete a class\n  timetable [weekday]                    Classes for a weekday (default today)\n  plan [hours] [days] [commit|preview]   Generate a study plan from pending tasks\n  plan show                              Show the stored plan\n  plan clear                             Clear the stored plan\n  summary                                Task counts by status, project and priority\n  export plan <csv|json> <path>          Write the stored plan to disk\n  export board <path>                    Write every record to a JSON file\n  quit|exit                              Exit"
    );
}

fn parse_id(s: Option<&str>) -> Option<i32> {
    s.and_then(|v| v.parse::<i32>().ok())
}

fn parse_optional_date(s: &str) -> Result<Option<NaiveDate>, ()> {
    if s == "-" {
        return Ok(None);
    }
    dates::parse_date(s).map(Some).ok_or(())
}

fn print_tasks(planner: &Planner, filter: &TaskFilter) {
    let today = dates::today();
    let tasks: Vec<Task> = planner
        .filter_tasks(filter, today)
        .into_iter()
        .cloned()
        .collect();
    if tasks.is_empty() {
        println!("No tasks matching this filter.");
        return;
    }
    print_frame(Task::to_dataframe(&tasks));
}

fn print_projects(planner: &Planner) {
    if planner.projects().is_empty() {
        println!("No projects yet.");
        return;
    }
    for project in planner.projects() {
        println!("  {:>4}  {:<24} {}", project.id, project.name, project.color);
    }
}

fn set_status(planner: &mut Planner, id: Option<i32>, cmd: &str) {
    let Some(id) = id else {
        println!("Usage: {} <id>", cmd);
        return;
    };
    let result = match cmd {
        "done" => planner.set_task_status(id, TaskStatus::Completed).map(|_| TaskStatus::Completed),
        "undo" => planner.set_task_status(id, TaskStatus::Pending).map(|_| TaskStatus::Pending),
        _ => planner.toggle_task(id),
    };
    match result {
        Ok(status) => println!("Task {} is now {}.", id, status),
        Err(e) => println!("Error: {}", e),
    }
}

fn main() {
    let cli = Cli::parse();
    let config = match PlannerConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(2);
        }
    };
    setup_logging(cli.log_level.as_deref().unwrap_or(&config.log_level));
    debug!(?config, "cli starting");

    let mut planner = Planner::with_config(&config);

    println!("Planner Tool (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!(%e, "failed to read stdin");
                break;
            }
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "tasks" => {
                let mut filter = TaskFilter::default();
                if let Some(view_s) = parts.next() {
                    match view_s.parse::<TaskView>() {
                        Ok(view) => filter.view = view,
                        Err(e) => {
                            println!("{}", e);
                            continue;
                        }
                    }
                }
                if let Some(project) = parts.next() {
                    if project != "*" {
                        filter.project = Some(project.to_string());
                    }
                }
                if let Some(status_s) = parts.next() {
                    match status_s.parse::<StatusFilter>() {
                        Ok(status) => filter.status = status,
                        Err(e) => {
                            println!("{}", e);
                            continue;
                        }
                    }
                }
                print_tasks(&planner, &filter);
            }
            "task" => match parts.next() {
                Some("add") => {
                    let project_s = parts.next();
                    let hours_s = parts.next();
                    let importance_s = parts.next();
                    let difficulty_s = parts.next();
                    let due_s = parts.next();
                    let (label_tokens, title): (Vec<&str>, Vec<&str>) =
                        parts.partition(|token| token.starts_with('+'));
                    let (Some(project_s), Some(hours_s), Some(imp_s), Some(dif_s), Some(due_s)) =
                        (project_s, hours_s, importance_s, difficulty_s, due_s)
                    else {
                        println!(
                            "Usage: task add <project|-> <hours> <importance> <difficulty> <due|-> <title...>"
                        );
                        continue;
                    };
                    let hours: f64 = match hours_s.parse() {
                        Ok(v) => v,
                        Err(_) => {
                            println!("Invalid hours");
                            continue;
                        }
                    };
                    let (importance, difficulty): (u8, u8) = match (imp_s.parse(), dif_s.parse()) {
                        (Ok(i), Ok(d)) => (i, d),
                        _ => {
                            println!("Invalid importance/difficulty (1-5)");
                            continue;
                        }
                    };
                    let due = match parse_optional_date(due_s) {
                        Ok(d) => d,
                        Err(_) => {
                            println!("Invalid due date (YYYY-MM-DD or -)");
                            continue;
                        }
                    };
                    let mut input = NewTask::new(title.join(" "), hours)
                        .importance(importance)
                        .difficulty(difficulty);
                    if project_s != "-" {
                        input = input.project(project_s);
                    }
                    input.due_date = due;
                    input.labels = label_tokens
                        .iter()
                        .flat_map(|token| Task::parse_labels(&token[1..]))
                        .collect();
                    match planner.add_task(input) {
                        Ok(id) => println!("Added task id={}", id),
                        Err(e) => println!("Error: {}", e),
                    }
                }
                _ => println!(
                    "Usage: task add <project|-> <hours> <importance> <difficulty> <due|-> <title...>"
                ),
            },
            "done" | "undo" | "toggle" => {
                let id = parse_id(parts.next());
                set_status(&mut planner, id, cmd);
            }
            "delete" => match parse_id(parts.next()) {
                Some(id) => match planner.delete_task(id) {
                    Ok(()) => println!("Deleted task {id}."),
                    Err(e) => println!("Error: {}", e),
                },
                None => println!("Usage: delete <id>"),
            },
            "project" => match parts.next() {
                Some("add") => {
                    let Some(name) = parts.next() else {
                        println!("Usage: project add <name> [color]");
                        continue;
                    };
                    let input = NewProject {
                        name: name.to_string(),
                        color: parts.next().map(ToOwned::to_owned),
                    };
                    match planner.add_project(input) {
                        Ok(id) => println!("Project '{}' added (id={}).", name, id),
                        Err(e) => println!("Error: {}", e),
                    }
                }
                _ => println!("Usage: project add <name> [color]"),
            },
            "projects" => print_projects(&planner),
            "exam" => match parts.next() {
                Some("add") => {
                    let subject = parts.next();
                    let date_s = parts.next();
                    let title: Vec<&str> = parts.collect();
                    let (Some(subject), Some(date_s)) = (subject, date_s) else {
                        println!("Usage: exam add <subject> <YYYY-MM-DD> <title...>");
                        continue;
                    };
                    let Some(date) = dates::parse_date(date_s) else {
                        println!("Invalid date (YYYY-MM-DD)");
                        continue;
                    };
                    let input = NewExam {
                        subject: subject.to_string(),
                        title: title.join(" "),
                        date,
                        notes: None,
                    };
                    match planner.add_exam(input) {
                        Ok(id) => println!("Added exam id={}", id),
                        Err(e) => println!("Error: {}", e),
                    }
                }
                Some("delete") => match parse_id(parts.next()) {
                    Some(id) => match planner.delete_exam(id) {
                        Ok(()) => println!("Deleted exam {id}."),
                        Err(e) => println!("Error: {}", e),
                    },
                    None => println!("Usage: exam delete <id>"),
                },
                _ => println!("Usage: exam add|delete ..."),
            },
            "exams" => {
                if parts.next() == Some("all") {
                    for exam in planner.exams() {
                        println!("  {:>4}  {}  {:<16} {}", exam.id, exam.date, exam.subject, exam.title);
                    }
                } else {
                    let upcoming = planner.upcoming_exams(dates::today());
                    if upcoming.is_empty() {
                        println!("No upcoming exams.");
                    }
                    for item in upcoming {
                        println!(
                            "  {:>4}  {}  {:<16} {} ({} days left)",
                            item.exam.id, item.exam.date, item.exam.subject, item.exam.title, item.days_left
                        );
                    }
                }
            }
            "class" => match parts.next() {
                Some("add") => {
                    let subject = parts.next();
                    let weekday = parts.next().and_then(parse_weekday);
                    let start = parts.next().and_then(parse_time);
                    let end = parts.next().and_then(parse_time);
                    let location: Vec<&str> = parts.collect();
                    let (Some(subject), Some(weekday), Some(start), Some(end)) =
                        (subject, weekday, start, end)
                    else {
                        println!("Usage: class add <subject> <weekday> <HH:MM> <HH:MM> [location...]");
                        continue;
                    };
                    let input = NewClass {
                        subject: subject.to_string(),
                        weekday,
                        start,
                        end,
                        location: Some(location.join(" ")),
                    };
                    match planner.add_class(input) {
                        Ok(id) => println!("Added class id={}", id),
                        Err(e) => println!("Error: {}", e),
                    }
                }
                Some("delete") => match parse_id(parts.next()) {
                    Some(id) => match planner.delete_class(id) {
                        Ok(()) => println!("Deleted class {id}."),
                        Err(e) => println!("Error: {}", e),
                    },
                    None => println!("Usage: class delete <id>"),
                },
                _ => println!("Usage: class add|delete ..."),
            },
            "timetable" => {
                let weekday = match parts.next() {
                    Some(s) => match parse_weekday(s) {
                        Some(w) => w,
                        None => {
                            println!("Invalid weekday");
                            continue;
                        }
                    },
                    None => chrono::Datelike::weekday(&dates::today()),
                };
                let slots = planner.timetable_for(weekday);
                if slots.is_empty() {
                    println!("No classes on {}.", weekday);
                }
                for class in slots {
                    println!(
                        "  {}-{}  {:<16} {}",
                        class.start.format("%H:%M"),
                        class.end.format("%H:%M"),
                        class.subject,
                        class.location.as_deref().unwrap_or("")
                    );
                }
            }
            "plan" => match parts.next() {
                Some("show") => {
                    if planner.plan().is_empty() {
                        println!("No study plan stored.");
                    } else {
                        print_frame(planner.plan_frame());
                    }
                }
                Some("clear") => {
                    planner.clear_plan();
                    println!("Study plan cleared.");
                }
                first => {
                    let mut request =
                        PlanRequest::new(config.daily_hours, config.horizon_days, dates::today());
                    request.mode = config.plan_mode;
                    let mut args = first.into_iter().chain(parts);
                    if let Some(hours_s) = args.next() {
                        match hours_s.parse::<f64>() {
                            Ok(v) => request.daily_hours = v,
                            Err(_) => {
                                println!("Invalid hours");
                                continue;
                            }
                        }
                    }
                    if let Some(days_s) = args.next() {
                        match days_s.parse::<u32>() {
                            Ok(v) => request.horizon_days = v,
                            Err(_) => {
                                println!("Invalid day count");
                                continue;
                            }
                        }
                    }
                    if let Some(mode_s) = args.next() {
                        match mode_s.parse::<PlanMode>() {
                            Ok(mode) => request.mode = mode,
                            Err(e) => {
                                println!("{}", e);
                                continue;
                            }
                        }
                    }
                    if planner.pending_tasks().next().is_none() {
                        println!("No pending tasks to plan.");
                    }
                    let report = planner.generate_plan(request);
                    println!("Planned ({})", report.to_cli_summary());
                    if !report.is_empty() {
                        print_frame(planner_tool::ScheduleEntry::to_dataframe(&report.entries));
                    }
                    for left in &report.unscheduled {
                        println!("  task {} still needs {:.2}h", left.task_id, left.hours);
                    }
                }
            },
            "summary" => match planner.summary(dates::today()) {
                Ok(summary) => println!("Summary ({})", summary.to_cli_summary()),
                Err(e) => println!("Error: {}", e),
            },
            "export" => match (parts.next(), parts.next(), parts.next()) {
                (Some("plan"), Some("csv"), Some(path)) => match save_plan_to_csv(planner.plan(), path) {
                    Ok(_) => println!("Plan exported to {}.", path),
                    Err(e) => println!("Error exporting plan: {}", e),
                },
                (Some("plan"), Some("json"), Some(path)) => {
                    match save_plan_to_json(planner.plan(), path) {
                        Ok(_) => println!("Plan exported to {}.", path),
                        Err(e) => println!("Error exporting plan: {}", e),
                    }
                }
                (Some("board"), Some(path), None) => match save_board_to_json(&planner, path) {
                    Ok(_) => println!("Board exported to {}.", path),
                    Err(e) => println!("Error exporting board: {}", e),
                },
                _ => println!("Usage: export plan <csv|json> <path> | export board <path>"),
            },
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
