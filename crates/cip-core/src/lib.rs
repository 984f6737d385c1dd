//! CIP Core - Plan-Do-Check-Act project engine
//!
//! The state model and workflow rules behind a continuous-improvement tool:
//! - Projects structured by the four PDCA phases
//! - Task lifecycle with role-checked mutations
//! - Presence-based progress scoring
//! - Before/after improvement metrics
//! - Dashboard KPIs and JSON export/import
//!
//! Rendering, forms and downloads belong to the host; it owns a
//! [`WorkingSet`], threads the current [`Role`] through every mutation and
//! reads the calculators to build its views.
//!
//! # Example
//!
//! ```rust
//! use cip_core::prelude::*;
//! use chrono::NaiveDate;
//!
//! # fn main() -> Result<(), cip_core::CipError> {
//! let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
//! let mut projects = WorkingSet::new();
//! let id = projects.create_project(ProjectTemplate::Blank, today);
//!
//! let project = projects.get_mut(id).unwrap();
//! let mut editor = ProjectEditor::new(project, Role::Editor);
//! editor.update_plan(PlanSection::default().with_problem("Long changeovers"))?;
//! editor.add_task("Record changeover times", "Sam", today)?;
//!
//! let summary = DashboardSummary::compute(projects.get(id).unwrap(), today);
//! assert_eq!(summary.progress, 50);
//! assert_eq!(summary.total_tasks, 1);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod lifecycle;
pub mod metrics;
pub mod policy;
pub mod progress;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use config::CipConfig;
pub use dashboard::{count_overdue, status_distribution, DashboardSummary, MetricsComparison};
pub use error::{CipError, ParseVariantError, Result};
pub use export::{export_file_name, export_json, import_json, ExportConfig, Exporter, IdPolicy};
pub use lifecycle::ProjectEditor;
pub use metrics::{assess_improvement, compute_improvement, round_to_tenth, Improvement};
pub use policy::{can_mutate, permitted_actions, require, Action};
pub use progress::{compute_progress, PhaseCompletion, ProgressWeights};
pub use store::WorkingSet;
pub use types::{
    ActSection, CheckMetrics, CheckSection, DoSection, PlanSection, Priority, Project, ProjectId,
    ProjectStatus, ProjectTemplate, Role, Task, TaskId, TaskStatus, DEFAULT_PROJECT_NAME,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with CIP Core
    pub use crate::{
        compute_improvement, compute_progress, ActSection, CipConfig, DashboardSummary,
        PlanSection, Project, ProjectEditor, ProjectStatus, ProjectTemplate, Role, Task, TaskId,
        TaskStatus, WorkingSet,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
