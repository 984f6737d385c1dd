//! CIP configuration
//!
//! Session defaults loaded from TOML. Every key is optional.
//!
//! ```toml
//! default_project_name = "New CIP Project"
//! default_role = "Editor"
//!
//! [progress_weights]
//! plan = 25
//! do = 25
//! check = 25
//! act = 25
//!
//! [export]
//! pretty = true
//! ```

use crate::error::Result;
use crate::export::ExportConfig;
use crate::progress::ProgressWeights;
use crate::types::{Role, DEFAULT_PROJECT_NAME};
use serde::{Deserialize, Serialize};

/// CIP configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CipConfig {
    /// Name for projects created without a template
    pub default_project_name: String,
    /// Role a new session starts with
    pub default_role: Role,
    /// Points per touched phase
    pub progress_weights: ProgressWeights,
    /// Export settings
    pub export: ExportConfig,
}

impl Default for CipConfig {
    fn default() -> Self {
        Self {
            default_project_name: DEFAULT_PROJECT_NAME.to_string(),
            default_role: Role::Admin,
            progress_weights: ProgressWeights::default(),
            export: ExportConfig::default(),
        }
    }
}

impl CipConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML
    ///
    /// # Errors
    /// - `CipError::Config` on malformed input or unknown keys
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// With default project name
    #[inline]
    #[must_use]
    pub fn with_default_project_name(mut self, name: impl Into<String>) -> Self {
        self.default_project_name = name.into();
        self
    }

    /// With default role
    #[inline]
    #[must_use]
    pub fn with_default_role(mut self, role: Role) -> Self {
        self.default_role = role;
        self
    }

    /// With progress weights
    #[inline]
    #[must_use]
    pub fn with_progress_weights(mut self, weights: ProgressWeights) -> Self {
        self.progress_weights = weights;
        self
    }

    /// With export settings
    #[inline]
    #[must_use]
    pub fn with_export(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }
}
