//! Task lifecycle and phase editing
//!
//! [`ProjectEditor`] is the mutation boundary for a single project. Every
//! operation checks the access policy first and touches nothing when the
//! role is refused.
//!
//! # Example
//!
//! ```rust
//! use cip_core::{Project, ProjectEditor, Role, TaskStatus};
//! use chrono::NaiveDate;
//!
//! # fn main() -> Result<(), cip_core::CipError> {
//! let today = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
//! let mut project = Project::new("Line 3 changeover", today);
//!
//! let mut editor = ProjectEditor::new(&mut project, Role::Editor);
//! let id = editor.add_task("Film changeover", "Ana", today)?.unwrap();
//! editor.set_task_status_by_id(id, TaskStatus::InProgress)?;
//!
//! assert_eq!(project.tasks()[0].status, TaskStatus::InProgress);
//! # Ok(())
//! # }
//! ```

use crate::error::{CipError, Result};
use crate::policy::{require, Action};
use crate::types::{
    ActSection, CheckMetrics, PlanSection, Priority, Project, ProjectStatus, Role, Task, TaskId,
    TaskStatus,
};
use chrono::NaiveDate;

/// Role-checked mutator for one project
#[derive(Debug)]
pub struct ProjectEditor<'a> {
    project: &'a mut Project,
    role: Role,
}

impl<'a> ProjectEditor<'a> {
    /// Create editor acting as `role`
    #[inline]
    #[must_use]
    pub fn new(project: &'a mut Project, role: Role) -> Self {
        Self { project, role }
    }

    /// Role this editor acts as
    #[inline]
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Project being edited
    #[inline]
    #[must_use]
    pub fn project(&self) -> &Project {
        self.project
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    /// Append an open, medium-priority task
    ///
    /// An empty label is ignored: nothing is appended and `Ok(None)` is
    /// returned.
    ///
    /// # Errors
    /// - `CipError::PermissionDenied` if the role may not add tasks
    pub fn add_task(
        &mut self,
        label: impl Into<String>,
        responsible: impl Into<String>,
        due_date: NaiveDate,
    ) -> Result<Option<TaskId>> {
        self.add_task_with_priority(label, responsible, due_date, Priority::Medium)
    }

    /// Append an open task with an explicit priority
    ///
    /// # Errors
    /// - `CipError::PermissionDenied` if the role may not add tasks
    pub fn add_task_with_priority(
        &mut self,
        label: impl Into<String>,
        responsible: impl Into<String>,
        due_date: NaiveDate,
        priority: Priority,
    ) -> Result<Option<TaskId>> {
        require(self.role, Action::AddTask)?;

        let task = Task::new(label, responsible, due_date).with_priority(priority);
        match push_task(self.project, task) {
            Ok(id) => Ok(Some(id)),
            Err(CipError::EmptyTaskLabel) => {
                tracing::debug!(project = %self.project.id(), "ignoring task with empty label");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Overwrite the status of the task at `index`
    ///
    /// # Errors
    /// - `CipError::PermissionDenied` if the role may not edit task status
    /// - `CipError::IndexOutOfRange` if `index` is stale
    pub fn set_task_status(&mut self, index: usize, status: TaskStatus) -> Result<()> {
        require(self.role, Action::EditTaskStatus)?;
        let len = self.project.tasks().len();
        let task = self
            .project
            .do_phase
            .implementation_steps
            .get_mut(index)
            .ok_or(CipError::IndexOutOfRange { index, len })?;

        tracing::debug!(task = %task.id, from = %task.status, to = %status, "task status changed");
        task.status = status;
        Ok(())
    }

    /// Overwrite the status of the task with `id`
    ///
    /// # Errors
    /// - `CipError::PermissionDenied` if the role may not edit task status
    /// - `CipError::TaskNotFound` if no task has this id
    pub fn set_task_status_by_id(&mut self, id: TaskId, status: TaskStatus) -> Result<()> {
        require(self.role, Action::EditTaskStatus)?;
        let index = self
            .project
            .task_position(id)
            .ok_or(CipError::TaskNotFound(id))?;
        self.set_task_status(index, status)
    }

    /// Remove the task at `index`, shifting later tasks down by one
    ///
    /// # Errors
    /// - `CipError::PermissionDenied` unless the role may delete tasks
    /// - `CipError::IndexOutOfRange` if `index` is stale
    pub fn delete_task(&mut self, index: usize) -> Result<Task> {
        require(self.role, Action::DeleteTask)?;
        let steps = &mut self.project.do_phase.implementation_steps;
        if index >= steps.len() {
            return Err(CipError::IndexOutOfRange {
                index,
                len: steps.len(),
            });
        }

        let removed = steps.remove(index);
        tracing::info!(project = %self.project.id(), task = %removed.id, "task deleted");
        Ok(removed)
    }

    /// Remove the task with `id`
    ///
    /// # Errors
    /// - `CipError::PermissionDenied` unless the role may delete tasks
    /// - `CipError::TaskNotFound` if no task has this id
    pub fn delete_task_by_id(&mut self, id: TaskId) -> Result<Task> {
        require(self.role, Action::DeleteTask)?;
        let index = self
            .project
            .task_position(id)
            .ok_or(CipError::TaskNotFound(id))?;
        self.delete_task(index)
    }

    // ------------------------------------------------------------------
    // Project fields
    // ------------------------------------------------------------------

    /// Rename the project
    ///
    /// # Errors
    /// - `CipError::PermissionDenied` if the role may not edit project fields
    pub fn rename(&mut self, name: impl Into<String>) -> Result<()> {
        require(self.role, Action::EditProjectFields)?;
        self.project.name = name.into();
        Ok(())
    }

    /// Replace the description
    ///
    /// # Errors
    /// - `CipError::PermissionDenied` if the role may not edit project fields
    pub fn set_description(&mut self, description: impl Into<String>) -> Result<()> {
        require(self.role, Action::EditProjectFields)?;
        self.project.description = description.into();
        Ok(())
    }

    /// Set the project status (no transition rules)
    ///
    /// # Errors
    /// - `CipError::PermissionDenied` if the role may not edit project fields
    pub fn set_status(&mut self, status: ProjectStatus) -> Result<()> {
        require(self.role, Action::EditProjectFields)?;
        tracing::debug!(project = %self.project.id(), %status, "project status changed");
        self.project.status = status;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Phase content
    // ------------------------------------------------------------------

    /// Replace the plan section
    ///
    /// # Errors
    /// - `CipError::PermissionDenied` if the role may not edit phase content
    pub fn update_plan(&mut self, plan: PlanSection) -> Result<()> {
        require(self.role, Action::EditPhaseContent)?;
        self.project.plan = plan;
        Ok(())
    }

    /// Save check metrics and results; the improvement is always recomputed
    ///
    /// # Errors
    /// - `CipError::PermissionDenied` if the role may not edit phase content
    /// - `CipError::NonFiniteMetric` if either value is NaN or infinite
    pub fn update_check(&mut self, before: f64, after: f64, results: impl Into<String>) -> Result<()> {
        require(self.role, Action::EditPhaseContent)?;
        for (field, value) in [("wait_time_before", before), ("wait_time_after", after)] {
            if !value.is_finite() {
                return Err(CipError::NonFiniteMetric { field, value });
            }
        }
        self.project.check.metrics = Some(CheckMetrics::new(before, after));
        self.project.check.results = results.into();
        Ok(())
    }

    /// Replace the act section
    ///
    /// # Errors
    /// - `CipError::PermissionDenied` if the role may not edit phase content
    pub fn update_act(&mut self, act: ActSection) -> Result<()> {
        require(self.role, Action::EditPhaseContent)?;
        self.project.act = act;
        Ok(())
    }
}

/// Append a task to the Do phase, refusing empty labels
fn push_task(project: &mut Project, task: Task) -> Result<TaskId> {
    if task.label.is_empty() {
        return Err(CipError::EmptyTaskLabel);
    }
    let id = task.id;
    tracing::info!(project = %project.id(), task = %id, label = %task.label, "task added");
    project.do_phase.implementation_steps.push(task);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProjectTemplate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    fn project_with(labels: &[&str]) -> Project {
        let mut project = Project::new("p", today());
        let mut editor = ProjectEditor::new(&mut project, Role::Admin);
        for label in labels {
            editor.add_task(*label, "", today()).unwrap();
        }
        project
    }

    #[test]
    fn add_task_defaults() {
        let mut project = Project::new("p", today());
        let id = ProjectEditor::new(&mut project, Role::Editor)
            .add_task("Analyze", "Ana", today())
            .unwrap()
            .unwrap();

        let task = &project.tasks()[0];
        assert_eq!(task.id, id);
        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.responsible, "Ana");
    }

    #[test]
    fn empty_label_is_ignored() {
        let mut project = Project::new("p", today());
        let added = ProjectEditor::new(&mut project, Role::Admin)
            .add_task("", "Ana", today())
            .unwrap();
        assert!(added.is_none());
        assert!(project.tasks().is_empty());
    }

    #[test]
    fn tasks_keep_insertion_order() {
        let project = project_with(&["a", "b", "c"]);
        let labels: Vec<_> = project.tasks().iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["a", "b", "c"]);
    }

    #[test]
    fn status_can_move_backwards() {
        let mut project = project_with(&["a"]);
        let mut editor = ProjectEditor::new(&mut project, Role::Editor);
        editor.set_task_status(0, TaskStatus::Completed).unwrap();
        editor.set_task_status(0, TaskStatus::Open).unwrap();
        assert_eq!(project.tasks()[0].status, TaskStatus::Open);
    }

    #[test]
    fn stale_index_is_reported() {
        let mut project = project_with(&["a", "b"]);
        let mut editor = ProjectEditor::new(&mut project, Role::Admin);
        editor.delete_task(0).unwrap();

        let err = editor.set_task_status(1, TaskStatus::Completed).unwrap_err();
        assert!(matches!(err, CipError::IndexOutOfRange { index: 1, len: 1 }));
        assert!(err.is_stale_reference());
        assert!(matches!(
            editor.delete_task(5),
            Err(CipError::IndexOutOfRange { index: 5, len: 1 })
        ));
    }

    #[test]
    fn delete_shifts_following_tasks() {
        let mut project = project_with(&["a", "b", "c"]);
        let removed = ProjectEditor::new(&mut project, Role::Admin)
            .delete_task(1)
            .unwrap();
        assert_eq!(removed.label, "b");
        assert_eq!(project.tasks()[1].label, "c");
    }

    #[test]
    fn id_operations_survive_deletes() {
        let mut project = project_with(&["a", "b", "c"]);
        let c_id = project.tasks()[2].id;
        let mut editor = ProjectEditor::new(&mut project, Role::Admin);
        editor.delete_task(0).unwrap();
        editor.set_task_status_by_id(c_id, TaskStatus::InProgress).unwrap();
        assert_eq!(project.task_by_id(c_id).unwrap().status, TaskStatus::InProgress);

        let mut editor = ProjectEditor::new(&mut project, Role::Admin);
        editor.delete_task_by_id(c_id).unwrap();
        assert!(matches!(
            editor.delete_task_by_id(c_id),
            Err(CipError::TaskNotFound(id)) if id == c_id
        ));
    }

    #[test]
    fn editor_cannot_delete_tasks() {
        let mut project = project_with(&["a"]);
        let err = ProjectEditor::new(&mut project, Role::Editor)
            .delete_task(0)
            .unwrap_err();
        assert!(matches!(err, CipError::PermissionDenied { .. }));
        assert_eq!(project.tasks().len(), 1);
    }

    #[test]
    fn reader_changes_nothing() {
        let mut project = Project::from_template(ProjectTemplate::WaitTimeReduction, today());
        let before = project.clone();
        let mut editor = ProjectEditor::new(&mut project, Role::Reader);

        assert!(editor.add_task("x", "", today()).is_err());
        assert!(editor.add_task("", "", today()).is_err());
        assert!(editor.set_task_status(0, TaskStatus::Open).is_err());
        assert!(editor.delete_task(0).is_err());
        assert!(editor.rename("renamed").is_err());
        assert!(editor.set_status(ProjectStatus::OnHold).is_err());
        assert!(editor.update_plan(PlanSection::default()).is_err());
        assert!(editor.update_check(1.0, 1.0, "").is_err());
        assert!(editor.update_act(ActSection::default()).is_err());

        assert_eq!(project, before);
    }

    #[test]
    fn update_check_recomputes_improvement() {
        let mut project = Project::new("p", today());
        let mut editor = ProjectEditor::new(&mut project, Role::Editor);
        editor.update_check(45.0, 32.0, "better").unwrap();
        editor.update_check(0.0, 5.0, "no baseline").unwrap();

        let metrics = project.check.metrics.unwrap();
        assert_eq!(metrics.before(), 0.0);
        assert_eq!(metrics.improvement_percent(), 0.0);
        assert_eq!(project.check.results, "no baseline");
    }

    #[test]
    fn update_check_refuses_non_finite_values() {
        let mut project = Project::new("p", today());
        let mut editor = ProjectEditor::new(&mut project, Role::Editor);
        editor.update_check(45.0, 32.0, "saved").unwrap();

        let err = editor.update_check(f64::NAN, 1.0, "nan").unwrap_err();
        assert!(matches!(err, CipError::NonFiniteMetric { field: "wait_time_before", .. }));
        assert!(editor.update_check(1.0, f64::NEG_INFINITY, "inf").is_err());

        assert_eq!(project.check.metrics.unwrap().before(), 45.0);
        assert_eq!(project.check.results, "saved");
    }

    #[test]
    fn project_fields_are_editable() {
        let mut project = Project::new("p", today());
        let mut editor = ProjectEditor::new(&mut project, Role::Editor);
        editor.rename("Scrap reduction").unwrap();
        editor.set_description("Cut scrap on line 2").unwrap();
        editor.set_status(ProjectStatus::Completed).unwrap();
        editor.set_status(ProjectStatus::Draft).unwrap();
        editor
            .update_plan(PlanSection::default().with_problem("Scrap at 6%"))
            .unwrap();
        editor
            .update_act(ActSection::default().with_standardization("SOP 12"))
            .unwrap();

        assert_eq!(project.name, "Scrap reduction");
        assert_eq!(project.status, ProjectStatus::Draft);
        assert_eq!(project.plan.problem, "Scrap at 6%");
        assert_eq!(project.act.standardization, "SOP 12");
    }
}
