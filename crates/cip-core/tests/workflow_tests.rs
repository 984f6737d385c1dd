use cip_core::prelude::*;
use cip_core::{CipError, DashboardSummary, Priority};
use cip_test_utils::{
    admin, init_tracing, project_with_statuses, push_task, today, tomorrow, yesterday,
};
use pretty_assertions::assert_eq;

#[test]
fn deleting_sole_project_is_refused() {
    init_tracing();
    let mut projects = WorkingSet::new();
    let only = projects.create_project(ProjectTemplate::WaitTimeReduction, today());
    let before: Vec<_> = projects.iter().cloned().collect();

    let err = projects.delete_project(Role::Admin, only).unwrap_err();

    assert!(matches!(err, CipError::LastProject));
    assert!(err.is_user_facing());
    assert_eq!(projects.iter().cloned().collect::<Vec<_>>(), before);
}

#[test]
fn deleting_removes_exactly_one_project() {
    init_tracing();
    let mut projects = WorkingSet::new();
    let ids: Vec<_> = (0..4)
        .map(|_| projects.create_project(ProjectTemplate::Blank, today()))
        .collect();

    let next = projects.delete_project(Role::Admin, ids[2]).unwrap();

    assert_eq!(projects.len(), 3);
    assert!(!projects.contains(ids[2]));
    assert_eq!(next, ids[0]);
    assert_eq!(projects.active_id(), Some(ids[0]));
    assert_eq!(projects.ids().collect::<Vec<_>>(), vec![ids[0], ids[1], ids[3]]);
}

#[test]
fn readded_task_starts_fresh() {
    init_tracing();
    let mut project = project_with_statuses(&[TaskStatus::Open, TaskStatus::Open]);
    let mut editor = ProjectEditor::new(&mut project, Role::Admin);
    editor.set_task_status(1, TaskStatus::Completed).unwrap();
    let old = editor.delete_task(1).unwrap();
    assert_eq!(old.status, TaskStatus::Completed);

    let new_id = editor
        .add_task(old.label.clone(), old.responsible.clone(), old.due_date)
        .unwrap()
        .unwrap();

    let readded = &project.tasks()[1];
    assert_eq!(readded.id, new_id);
    assert_ne!(readded.id, old.id);
    assert_eq!(readded.status, TaskStatus::Open);
    assert_eq!(readded.priority, Priority::Medium);
}

#[test]
fn overdue_counts_only_unfinished_past_tasks() {
    let mut project = project_with_statuses(&[]);
    let mut editor = admin(&mut project);
    for task in [
        Task::new("late", "", yesterday()),
        Task::new("due today", "", today()),
        Task::new("done late", "", yesterday()).with_status(TaskStatus::Completed),
        Task::new("future", "", tomorrow()).with_status(TaskStatus::InProgress),
    ] {
        push_task(&mut editor, &task);
    }

    let summary = DashboardSummary::compute(&project, today());
    assert_eq!(summary.overdue_tasks, 1);
    assert_eq!(summary.in_progress_tasks, 1);
    assert_eq!(summary.completed_tasks, 1);
    assert_eq!(summary.total_tasks, 4);
}

#[test]
fn status_distribution_example() {
    let project = project_with_statuses(&[TaskStatus::Open, TaskStatus::Open, TaskStatus::Completed]);
    let summary = DashboardSummary::compute(&project, today());

    let dist: Vec<_> = summary.status_distribution.into_iter().collect();
    assert_eq!(dist, vec![(TaskStatus::Open, 2), (TaskStatus::Completed, 1)]);
}

#[test]
fn roles_gate_the_whole_cycle() {
    init_tracing();
    let mut projects = WorkingSet::new();
    let a = projects.create_project(ProjectTemplate::Blank, today());
    let b = projects.create_project(ProjectTemplate::Blank, today());

    {
        let project = projects.get_mut(a).unwrap();
        let mut editor = ProjectEditor::new(project, Role::Editor);
        editor.rename("Editor project").unwrap();
        editor.add_task("Editor task", "", today()).unwrap();
        assert!(editor.delete_task(0).is_err());
    }
    assert!(projects.delete_project(Role::Editor, b).is_err());

    {
        let project = projects.get_mut(a).unwrap();
        let mut editor = ProjectEditor::new(project, Role::Reader);
        assert!(editor.add_task("Reader task", "", today()).is_err());
    }

    let project = projects.get(a).unwrap();
    assert_eq!(project.name(), "Editor project");
    assert_eq!(project.tasks().len(), 1);
    assert_eq!(projects.len(), 2);
}

#[test]
fn progress_tracks_phase_edits() {
    let mut project = project_with_statuses(&[]);
    assert_eq!(compute_progress(&project), 0);

    let mut editor = ProjectEditor::new(&mut project, Role::Editor);
    editor
        .update_plan(PlanSection::default().with_problem("Long queues"))
        .unwrap();
    assert_eq!(compute_progress(editor.project()), 25);

    editor.add_task("Count queue length", "", today()).unwrap();
    editor.update_check(45.0, 32.0, "Queue shorter").unwrap();
    assert_eq!(compute_progress(editor.project()), 75);

    editor
        .update_act(ActSection::default().with_standardization("Queue board"))
        .unwrap();
    assert_eq!(compute_progress(&project), 100);
}
