//! Core types for CIP
//!
//! Defines the PDCA entity model:
//! - Project and task identifiers
//! - Project, task, role and priority enumerations
//! - The four phase sections (plan / do / check / act)
//! - Project templates

use crate::error::ParseVariantError;
use crate::metrics::compute_improvement;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Name given to projects created without a template
pub const DEFAULT_PROJECT_NAME: &str = "New CIP Project";

/// Unique project identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub Ulid);

impl ProjectId {
    /// Generate new project ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProjectId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s).map(Self)
    }
}

/// Unique task identifier, stable across deletions of sibling tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub Ulid);

impl TaskId {
    /// Generate new task ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s).map(Self)
    }
}

/// Read an id from a stored document.
///
/// Documents written by other tools carry ids in foreign formats (UUIDs,
/// mostly). Those get a freshly minted id instead of failing the import.
fn lenient_id<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default + fmt::Display,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.parse().unwrap_or_else(|_| {
        let id = T::default();
        tracing::debug!(foreign = %raw, assigned = %id, "replaced foreign id on import");
        id
    }))
}

/// Implements `as_str`, `Display` and `FromStr` for a wire-named enum.
macro_rules! wire_names {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Wire name of this value
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseVariantError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($name) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(ParseVariantError::new($kind, s))
            }
        }
    };
}

/// Project status. Any value is reachable from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Freshly created, nothing committed yet
    #[default]
    Draft,
    /// Being worked on
    InProgress,
    /// Cycle closed
    Completed,
    /// Paused
    OnHold,
}

impl ProjectStatus {
    /// All project statuses in display order
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Draft,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::OnHold,
    ];
}

wire_names!(ProjectStatus, "project status", {
    Draft => "draft",
    InProgress => "in_progress",
    Completed => "completed",
    OnHold => "on_hold",
});

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Open,
    /// Started
    InProgress,
    /// Done
    Completed,
}

impl TaskStatus {
    /// All task statuses in lifecycle order
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Open, TaskStatus::InProgress, TaskStatus::Completed];

    /// Statuses reachable from this one.
    ///
    /// The lifecycle `open -> in_progress -> completed` is advisory only;
    /// every status can be assigned from every other, including reopening.
    #[inline]
    #[must_use]
    pub fn allowed_transitions(self) -> &'static [TaskStatus] {
        &Self::ALL
    }

    /// Check if the task is finished
    #[inline]
    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

wire_names!(TaskStatus, "task status", {
    Open => "open",
    InProgress => "in_progress",
    Completed => "completed",
});

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Low
    Low,
    /// Medium (quick-add default)
    #[default]
    Medium,
    /// High
    High,
}

wire_names!(Priority, "priority", {
    Low => "low",
    Medium => "medium",
    High => "high",
});

/// Session role governing what a user may change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    /// Full access, including deletions
    #[default]
    Admin,
    /// Edits content and tasks, cannot delete
    Editor,
    /// View only
    Reader,
}

impl Role {
    /// All roles, most privileged first
    pub const ALL: [Role; 3] = [Role::Admin, Role::Editor, Role::Reader];
}

wire_names!(Role, "role", {
    Admin => "Admin",
    Editor => "Editor",
    Reader => "Reader",
});

/// Action item inside the Do phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Stable identifier
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: TaskId,
    /// What has to be done
    #[serde(rename = "task")]
    pub label: String,
    /// Owner (free text, may be empty)
    #[serde(default)]
    pub responsible: String,
    /// Due date
    pub due_date: NaiveDate,
    /// Lifecycle status
    #[serde(default)]
    pub status: TaskStatus,
    /// Priority
    #[serde(default)]
    pub priority: Priority,
}

impl Task {
    /// Create new open, medium-priority task
    #[inline]
    #[must_use]
    pub fn new(label: impl Into<String>, responsible: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id: TaskId::new(),
            label: label.into(),
            responsible: responsible.into(),
            due_date,
            status: TaskStatus::Open,
            priority: Priority::Medium,
        }
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// With priority
    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Check if the task is past due and not completed.
    ///
    /// A task due `today` is not overdue.
    #[inline]
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.status.is_completed() && self.due_date < today
    }
}

/// Plan phase: problem statement and planned measures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanSection {
    /// What is the problem
    pub problem: String,
    /// What is the goal
    pub goal: String,
    /// Main causes
    pub root_cause: String,
    /// Planned measures, one action per entry
    pub measures: Vec<String>,
}

impl PlanSection {
    /// Split a multi-line measures entry into trimmed, non-blank actions
    #[must_use]
    pub fn parse_measures(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    /// Measures joined back into the one-per-line form
    #[must_use]
    pub fn measures_text(&self) -> String {
        self.measures.join("\n")
    }

    /// With problem statement
    #[inline]
    #[must_use]
    pub fn with_problem(mut self, problem: impl Into<String>) -> Self {
        self.problem = problem.into();
        self
    }

    /// With goal
    #[inline]
    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = goal.into();
        self
    }

    /// With root cause
    #[inline]
    #[must_use]
    pub fn with_root_cause(mut self, root_cause: impl Into<String>) -> Self {
        self.root_cause = root_cause.into();
        self
    }

    /// With measures parsed from one-per-line text
    #[inline]
    #[must_use]
    pub fn with_measures_text(mut self, text: &str) -> Self {
        self.measures = Self::parse_measures(text);
        self
    }
}

/// Do phase: the ordered task sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoSection {
    /// Tasks in insertion order
    pub implementation_steps: Vec<Task>,
}

/// Before/after measurement with its derived improvement
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CheckMetrics {
    wait_time_before: f64,
    wait_time_after: f64,
    improvement_percent: f64,
}

impl CheckMetrics {
    /// Create metrics, deriving the improvement from the two values
    #[must_use]
    pub fn new(before: f64, after: f64) -> Self {
        Self {
            wait_time_before: before,
            wait_time_after: after,
            improvement_percent: compute_improvement(before, after),
        }
    }

    /// Value before the change
    #[inline]
    #[must_use]
    pub fn before(&self) -> f64 {
        self.wait_time_before
    }

    /// Value after the change
    #[inline]
    #[must_use]
    pub fn after(&self) -> f64 {
        self.wait_time_after
    }

    /// Derived improvement in percent
    #[inline]
    #[must_use]
    pub fn improvement_percent(&self) -> f64 {
        self.improvement_percent
    }
}

/// Metrics record as found in a stored document, every value optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoredMetrics {
    wait_time_before: Option<f64>,
    wait_time_after: Option<f64>,
    improvement_percent: Option<f64>,
}

impl StoredMetrics {
    /// `None` when the record holds no values at all
    fn into_metrics(self) -> Option<CheckMetrics> {
        if self.wait_time_before.is_none()
            && self.wait_time_after.is_none()
            && self.improvement_percent.is_none()
        {
            return None;
        }
        let before = self.wait_time_before.unwrap_or_default();
        let after = self.wait_time_after.unwrap_or_default();
        Some(CheckMetrics {
            wait_time_before: before,
            wait_time_after: after,
            improvement_percent: self
                .improvement_percent
                .unwrap_or_else(|| compute_improvement(before, after)),
        })
    }
}

fn stored_metrics<'de, D>(deserializer: D) -> Result<Option<CheckMetrics>, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Option::<StoredMetrics>::deserialize(deserializer)?;
    Ok(stored.and_then(StoredMetrics::into_metrics))
}

/// Check phase: metrics and results narrative
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckSection {
    /// Before/after metrics, absent until first saved
    ///
    /// A stored record without any values (`{}` or `null`) reads as absent.
    /// A missing improvement is derived from the two values.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "stored_metrics"
    )]
    pub metrics: Option<CheckMetrics>,
    /// Results assessment
    pub results: String,
}

/// Act phase: standardization and follow-up
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActSection {
    /// How the improvement is anchored
    pub standardization: String,
    /// What was learned
    pub lessons_learned: String,
    /// Planned follow-up
    pub next_steps: String,
}

impl ActSection {
    /// With standardization
    #[inline]
    #[must_use]
    pub fn with_standardization(mut self, text: impl Into<String>) -> Self {
        self.standardization = text.into();
        self
    }

    /// With lessons learned
    #[inline]
    #[must_use]
    pub fn with_lessons_learned(mut self, text: impl Into<String>) -> Self {
        self.lessons_learned = text.into();
        self
    }

    /// With next steps
    #[inline]
    #[must_use]
    pub fn with_next_steps(mut self, text: impl Into<String>) -> Self {
        self.next_steps = text.into();
        self
    }
}

/// Starting content for a new project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectTemplate {
    /// Empty sections, draft status
    #[default]
    Blank,
    /// Worked example: reducing production wait times
    WaitTimeReduction,
}

/// A CIP project structured by the PDCA cycle
///
/// All four phase sections are always present; an untouched phase is an
/// empty section. Fields are read through accessors; every change goes
/// through [`ProjectEditor`](crate::ProjectEditor) so the role policy applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "lenient_id")]
    id: ProjectId,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) description: String,
    created_date: NaiveDate,
    #[serde(default)]
    pub(crate) status: ProjectStatus,
    #[serde(default)]
    pub(crate) plan: PlanSection,
    #[serde(default, rename = "do")]
    pub(crate) do_phase: DoSection,
    #[serde(default)]
    pub(crate) check: CheckSection,
    #[serde(default)]
    pub(crate) act: ActSection,
}

impl Project {
    /// Create new empty draft project
    #[must_use]
    pub fn new(name: impl Into<String>, created_date: NaiveDate) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            description: String::new(),
            created_date,
            status: ProjectStatus::Draft,
            plan: PlanSection::default(),
            do_phase: DoSection::default(),
            check: CheckSection::default(),
            act: ActSection::default(),
        }
    }

    /// Create a project from a template
    ///
    /// `Blank` projects are named [`DEFAULT_PROJECT_NAME`].
    #[must_use]
    pub fn from_template(template: ProjectTemplate, today: NaiveDate) -> Self {
        match template {
            ProjectTemplate::Blank => Self::new(DEFAULT_PROJECT_NAME, today),
            ProjectTemplate::WaitTimeReduction => wait_time_reduction(today),
        }
    }

    /// Project identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> ProjectId {
        self.id
    }

    /// Creation date
    #[inline]
    #[must_use]
    pub fn created_date(&self) -> NaiveDate {
        self.created_date
    }

    /// Display name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free text description
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Project status
    #[inline]
    #[must_use]
    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Plan phase
    #[inline]
    #[must_use]
    pub fn plan(&self) -> &PlanSection {
        &self.plan
    }

    /// Do phase
    #[inline]
    #[must_use]
    pub fn do_phase(&self) -> &DoSection {
        &self.do_phase
    }

    /// Check phase
    #[inline]
    #[must_use]
    pub fn check(&self) -> &CheckSection {
        &self.check
    }

    /// Act phase
    #[inline]
    #[must_use]
    pub fn act(&self) -> &ActSection {
        &self.act
    }

    /// Tasks in order
    #[inline]
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.do_phase.implementation_steps
    }

    /// Task at position `index`
    #[inline]
    #[must_use]
    pub fn task(&self, index: usize) -> Option<&Task> {
        self.do_phase.implementation_steps.get(index)
    }

    /// Task with the given id
    #[must_use]
    pub fn task_by_id(&self, id: TaskId) -> Option<&Task> {
        self.tasks().iter().find(|t| t.id == id)
    }

    /// Current position of a task, re-resolving after deletions
    #[must_use]
    pub fn task_position(&self, id: TaskId) -> Option<usize> {
        self.tasks().iter().position(|t| t.id == id)
    }

    /// Copy of this project under a fresh id
    #[must_use]
    pub fn fork(&self) -> Self {
        Self {
            id: ProjectId::new(),
            ..self.clone()
        }
    }
}

fn wait_time_reduction(today: NaiveDate) -> Project {
    let date = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap_or(today);

    let mut project = Project::new("Example: Reducing Wait Times", today);
    project.description = "Reduce production wait times by 30%".to_string();
    project.status = ProjectStatus::InProgress;
    project.plan = PlanSection::default()
        .with_problem("Long wait times between production steps")
        .with_goal("Reduce wait times by 30%")
        .with_root_cause("Unbalanced machine capacities")
        .with_measures_text("Machine analysis\nProcess optimization\nTraining");
    project.do_phase.implementation_steps = vec![
        Task::new("Analyze machine utilization", "John Smith", date(7, 15))
            .with_status(TaskStatus::Completed),
        Task::new("Identify bottlenecks", "Anna Johnson", date(7, 20))
            .with_status(TaskStatus::InProgress),
        Task::new("Implement optimization measures", "Tom Wilson", date(7, 30)),
    ];
    project.check = CheckSection {
        metrics: Some(CheckMetrics::new(45.0, 32.0)),
        results: "Wait times were reduced by 28.9%".to_string(),
    };
    project.act = ActSection::default()
        .with_standardization("New work instructions created")
        .with_lessons_learned("Regular capacity analysis is essential")
        .with_next_steps("Extension to other production lines");
    project
}
