//! Project export and import
//!
//! Serializes one project with all four phase sections to a JSON document.
//! Dates are written as `YYYY-MM-DD` strings. Import accepts documents from
//! older exports that lack task ids, priorities or metrics, and documents
//! whose ids are not ULIDs (those get fresh ids).

use crate::error::{CipError, Result};
use crate::types::Project;
use serde::{Deserialize, Serialize};

/// How an imported project's id is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdPolicy {
    /// Keep the id from the document
    #[default]
    Keep,
    /// Assign a fresh id so the import can sit next to the original
    Fork,
}

/// Export settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Indent the JSON output
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Serializes projects according to an [`ExportConfig`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    /// Create exporter
    #[inline]
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Serialize a project to JSON
    ///
    /// # Errors
    /// - `CipError::Export` if serialization fails
    pub fn to_json(&self, project: &Project) -> Result<String> {
        let json = if self.config.pretty {
            serde_json::to_string_pretty(project)
        } else {
            serde_json::to_string(project)
        }
        .map_err(CipError::Export)?;
        tracing::debug!(project = %project.id(), bytes = json.len(), "project exported");
        Ok(json)
    }
}

/// Serialize a project to pretty-printed JSON
///
/// # Errors
/// - `CipError::Export` if serialization fails
pub fn export_json(project: &Project) -> Result<String> {
    Exporter::default().to_json(project)
}

/// Suggested file name: `cip_project_<name>.json` with spaces as underscores
#[must_use]
pub fn export_file_name(project: &Project) -> String {
    format!("cip_project_{}.json", project.name().replace(' ', "_"))
}

/// Parse a project from an exported JSON document
///
/// # Errors
/// - `CipError::Import` if the document is not a valid project
pub fn import_json(text: &str, ids: IdPolicy) -> Result<Project> {
    let project: Project = serde_json::from_str(text).map_err(CipError::Import)?;
    let project = match ids {
        IdPolicy::Keep => project,
        IdPolicy::Fork => project.fork(),
    };
    tracing::info!(project = %project.id(), name = %project.name(), "project imported");
    Ok(project)
}
