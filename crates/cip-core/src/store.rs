//! Working set of projects
//!
//! [`WorkingSet`] is the session's owned collection of projects, keyed by id
//! and kept in insertion order so that the fallback selection after a
//! deletion is reproducible.

use crate::config::CipConfig;
use crate::error::{CipError, Result};
use crate::policy::{require, Action};
use crate::types::{Project, ProjectId, ProjectTemplate, Role};
use chrono::NaiveDate;
use indexmap::IndexMap;

/// In-memory collection of projects with an active selection
#[derive(Debug, Clone)]
pub struct WorkingSet {
    projects: IndexMap<ProjectId, Project>,
    active: Option<ProjectId>,
    default_project_name: String,
}

impl Default for WorkingSet {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkingSet {
    /// Create empty working set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&CipConfig::default())
    }

    /// Create empty working set using configured defaults
    #[must_use]
    pub fn with_config(config: &CipConfig) -> Self {
        Self {
            projects: IndexMap::new(),
            active: None,
            default_project_name: config.default_project_name.clone(),
        }
    }

    /// Create a project from `template`, add it and make it active
    pub fn create_project(&mut self, template: ProjectTemplate, today: NaiveDate) -> ProjectId {
        let mut project = Project::from_template(template, today);
        if template == ProjectTemplate::Blank {
            project.name.clone_from(&self.default_project_name);
        }
        self.insert(project)
    }

    /// Add an existing project and make it active
    ///
    /// A project with the same id is replaced in place.
    pub fn insert(&mut self, project: Project) -> ProjectId {
        let id = project.id();
        tracing::info!(project = %id, name = %project.name, "project added to working set");
        self.projects.insert(id, project);
        self.active = Some(id);
        id
    }

    /// Delete a project; the first remaining project becomes active
    ///
    /// # Returns
    /// Id of the new active project
    ///
    /// # Errors
    /// - `CipError::PermissionDenied` unless the role may delete projects
    /// - `CipError::ProjectNotFound` if `id` is unknown
    /// - `CipError::LastProject` if it is the only project left
    pub fn delete_project(&mut self, role: Role, id: ProjectId) -> Result<ProjectId> {
        require(role, Action::DeleteProject)?;
        if !self.projects.contains_key(&id) {
            return Err(CipError::ProjectNotFound(id));
        }
        if self.projects.len() == 1 {
            return Err(CipError::LastProject);
        }

        self.projects.shift_remove(&id);
        let (&next, _) = self
            .projects
            .first()
            .ok_or(CipError::LastProject)?;
        self.active = Some(next);
        tracing::info!(project = %id, active = %next, "project deleted");
        Ok(next)
    }

    /// Make `id` the active project
    ///
    /// # Errors
    /// - `CipError::ProjectNotFound` if `id` is unknown
    pub fn select(&mut self, id: ProjectId) -> Result<()> {
        if !self.projects.contains_key(&id) {
            return Err(CipError::ProjectNotFound(id));
        }
        self.active = Some(id);
        Ok(())
    }

    /// Active project id
    #[inline]
    #[must_use]
    pub fn active_id(&self) -> Option<ProjectId> {
        self.active
    }

    /// Active project
    #[must_use]
    pub fn active(&self) -> Option<&Project> {
        self.active.and_then(|id| self.projects.get(&id))
    }

    /// Active project, mutably
    pub fn active_mut(&mut self) -> Option<&mut Project> {
        self.active.and_then(|id| self.projects.get_mut(&id))
    }

    /// Project by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(&id)
    }

    /// Project by id, mutably
    #[inline]
    pub fn get_mut(&mut self, id: ProjectId) -> Option<&mut Project> {
        self.projects.get_mut(&id)
    }

    /// Check if the project exists
    #[inline]
    #[must_use]
    pub fn contains(&self, id: ProjectId) -> bool {
        self.projects.contains_key(&id)
    }

    /// Number of projects
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Check if the working set is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Project ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = ProjectId> + '_ {
        self.projects.keys().copied()
    }

    /// Projects in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }
}
