//! Error types for CIP Core
//!
//! Every error is recoverable at the call site:
//! - Working set errors (last project, unknown project)
//! - Stale task references (index out of range, unknown task id)
//! - Access policy refusals
//! - Non-finite measurements
//! - Export, import and configuration decoding failures

use crate::policy::Action;
use crate::types::{ProjectId, Role, TaskId};

/// Result alias for CIP operations
pub type Result<T, E = CipError> = std::result::Result<T, E>;

/// Main CIP error type
#[derive(Debug, thiserror::Error)]
pub enum CipError {
    /// Refused to delete the only project in the working set
    #[error("cannot delete the last project")]
    LastProject,

    /// No project with this id in the working set
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Task index no longer valid
    #[error("task index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// No task with this id in the project
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Task label was empty
    #[error("task label must not be empty")]
    EmptyTaskLabel,

    /// Role may not perform the action
    #[error("{role} is not permitted to {action}")]
    PermissionDenied { role: Role, action: Action },

    /// Measurement is NaN or infinite and cannot be stored
    #[error("{field} must be a finite number, got {value}")]
    NonFiniteMetric { field: &'static str, value: f64 },

    /// Project could not be serialized
    #[error("export failed: {0}")]
    Export(#[source] serde_json::Error),

    /// Document is not a valid project
    #[error("import failed: {0}")]
    Import(#[source] serde_json::Error),

    /// Configuration could not be decoded
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

impl CipError {
    /// Check if the caller holds an outdated task reference and should re-fetch
    #[inline]
    #[must_use]
    pub fn is_stale_reference(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. } | Self::TaskNotFound(_))
    }

    /// Check if the error should be shown to the user as a blocking message
    #[inline]
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::LastProject | Self::PermissionDenied { .. } | Self::NonFiniteMetric { .. }
        )
    }

    /// Check if the error leaves the process in a usable state
    ///
    /// All operations are in-memory and refuse before touching state, so
    /// this is always true.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        true
    }
}

/// Unknown name for a wire-named enum
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct ParseVariantError {
    /// Which enumeration was parsed
    pub kind: &'static str,
    /// Rejected input
    pub value: String,
}

impl ParseVariantError {
    /// Create new parse error
    #[inline]
    pub(crate) fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
