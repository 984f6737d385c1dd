//! Testing utilities for CIP workspace
//!
//! Shared fixtures, date helpers, proptest strategies and tracing setup.

#![allow(missing_docs)]

use chrono::{Days, NaiveDate};
use cip_core::{
    ActSection, PlanSection, Priority, Project, ProjectEditor, ProjectStatus, Role, Task, TaskId,
    TaskStatus,
};
use proptest::prelude::*;
use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber once; later calls are no-ops.
///
/// Filter with `RUST_LOG`, e.g. `RUST_LOG=cip_core=debug`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Fixed "today" used across tests
pub fn today() -> NaiveDate {
    date(2026, 10, 19)
}

pub fn yesterday() -> NaiveDate {
    today().checked_sub_days(Days::new(1)).unwrap()
}

pub fn tomorrow() -> NaiveDate {
    today().checked_add_days(Days::new(1)).unwrap()
}

pub fn empty_project() -> Project {
    Project::new("Test project", today())
}

/// Admin editor over `project`; fixtures are built through the same API as
/// production edits.
pub fn admin(project: &mut Project) -> ProjectEditor<'_> {
    ProjectEditor::new(project, Role::Admin)
}

/// Project whose tasks have the given statuses, all due tomorrow
pub fn project_with_statuses(statuses: &[TaskStatus]) -> Project {
    let mut project = empty_project();
    let mut editor = admin(&mut project);
    for (i, status) in statuses.iter().enumerate() {
        editor.add_task(format!("task {i}"), "tester", tomorrow()).unwrap();
        editor.set_task_status(i, *status).unwrap();
    }
    project
}

/// Append a task with the given status and priority
pub fn push_task(editor: &mut ProjectEditor<'_>, task: &Task) -> TaskId {
    let id = editor
        .add_task_with_priority(task.label.clone(), task.responsible.clone(), task.due_date, task.priority)
        .unwrap()
        .unwrap();
    editor.set_task_status_by_id(id, task.status).unwrap();
    id
}

/// Project with every field populated, including non-default priorities
pub fn filled_project() -> Project {
    let mut project = Project::new("Reduce Setup Time", date(2026, 1, 12));
    let mut editor = admin(&mut project);
    editor.set_description("Cut press setup from 40 to 25 minutes").unwrap();
    editor.set_status(ProjectStatus::OnHold).unwrap();
    editor
        .update_plan(
            PlanSection::default()
                .with_problem("Setup takes 40 minutes")
                .with_goal("25 minutes")
                .with_root_cause("Tools stored away from press")
                .with_measures_text("Shadow board\nSMED workshop"),
        )
        .unwrap();
    for task in [
        Task::new("Build shadow board", "Ana", date(2026, 2, 1))
            .with_status(TaskStatus::Completed)
            .with_priority(Priority::High),
        Task::new("Run SMED workshop", "", date(2026, 2, 20))
            .with_status(TaskStatus::InProgress)
            .with_priority(Priority::Low),
    ] {
        push_task(&mut editor, &task);
    }
    editor.update_check(40.0, 27.5, "Setup at 27.5 minutes").unwrap();
    editor
        .update_act(
            ActSection::default()
                .with_standardization("Shadow boards on all presses")
                .with_lessons_learned("Measure before workshops")
                .with_next_steps("Roll out to line 2"),
        )
        .unwrap();
    project
}

pub fn task_status_strategy() -> impl Strategy<Value = TaskStatus> {
    prop::sample::select(TaskStatus::ALL.to_vec())
}

pub fn priority_strategy() -> impl Strategy<Value = Priority> {
    prop_oneof![Just(Priority::Low), Just(Priority::Medium), Just(Priority::High)]
}

pub fn project_status_strategy() -> impl Strategy<Value = ProjectStatus> {
    prop::sample::select(ProjectStatus::ALL.to_vec())
}

/// Measurements from everyday magnitudes up to values whose ratio overflows
pub fn measurement_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![4 => 0.0f64..500.0, 1 => 0.0f64..1e308]
}

/// Dates within a year either side of [`today`]
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (-365i64..=365).prop_map(|offset| today() + chrono::Duration::days(offset))
}

pub fn task_strategy() -> impl Strategy<Value = Task> {
    (
        "[a-zA-Z][a-zA-Z ]{0,20}",
        "[a-zA-Z ]{0,12}",
        date_strategy(),
        task_status_strategy(),
        priority_strategy(),
    )
        .prop_map(|(label, responsible, due, status, priority)| {
            Task::new(label, responsible, due)
                .with_status(status)
                .with_priority(priority)
        })
}

/// Arbitrary project with any subset of phases filled in
pub fn project_strategy() -> impl Strategy<Value = Project> {
    (
        "[a-zA-Z0-9 ]{1,24}",
        project_status_strategy(),
        prop::option::of("[a-z ]{1,30}"),
        prop::collection::vec(task_strategy(), 0..6),
        prop::option::of((measurement_strategy(), measurement_strategy())),
        "[a-z ]{0,30}",
        "[a-z ]{0,30}",
        prop::collection::vec("[a-z]{1,10}", 0..4),
    )
        .prop_map(
            |(name, status, problem, tasks, metrics, results, standardization, measures)| {
                let mut project = Project::new(name, today());
                let mut editor = admin(&mut project);
                editor.set_status(status).unwrap();
                editor
                    .update_plan(PlanSection {
                        problem: problem.unwrap_or_default(),
                        measures,
                        ..PlanSection::default()
                    })
                    .unwrap();
                for task in &tasks {
                    push_task(&mut editor, task);
                }
                if let Some((before, after)) = metrics {
                    editor.update_check(before, after, results).unwrap();
                }
                editor
                    .update_act(ActSection::default().with_standardization(standardization))
                    .unwrap();
                project
            },
        )
}
