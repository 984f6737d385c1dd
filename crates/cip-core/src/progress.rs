//! Progress calculator
//!
//! Scores a project by which PDCA phases have been touched. Each phase is a
//! single presence check on its defining field; there is no partial credit
//! within a phase.

use crate::types::Project;
use serde::{Deserialize, Serialize};

/// Which phases have their defining field filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseCompletion {
    /// `plan.problem` is non-empty
    pub plan: bool,
    /// At least one task exists
    pub do_phase: bool,
    /// `check.results` is non-empty
    pub check: bool,
    /// `act.standardization` is non-empty
    pub act: bool,
}

impl PhaseCompletion {
    /// Inspect a project
    #[must_use]
    pub fn of(project: &Project) -> Self {
        Self {
            plan: !project.plan.problem.is_empty(),
            do_phase: !project.tasks().is_empty(),
            check: !project.check.results.is_empty(),
            act: !project.act.standardization.is_empty(),
        }
    }

    /// Number of touched phases
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        [self.plan, self.do_phase, self.check, self.act]
            .into_iter()
            .filter(|touched| *touched)
            .count()
    }
}

/// Points awarded per touched phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgressWeights {
    /// Plan phase weight
    pub plan: u8,
    /// Do phase weight
    #[serde(rename = "do")]
    pub do_phase: u8,
    /// Check phase weight
    pub check: u8,
    /// Act phase weight
    pub act: u8,
}

impl Default for ProgressWeights {
    fn default() -> Self {
        Self {
            plan: 25,
            do_phase: 25,
            check: 25,
            act: 25,
        }
    }
}

impl ProgressWeights {
    /// Score a project, capped at 100
    #[must_use]
    pub fn score(&self, project: &Project) -> u8 {
        let done = PhaseCompletion::of(project);
        let total: u32 = [
            (done.plan, self.plan),
            (done.do_phase, self.do_phase),
            (done.check, self.check),
            (done.act, self.act),
        ]
        .into_iter()
        .filter(|(touched, _)| *touched)
        .map(|(_, weight)| u32::from(weight))
        .sum();

        u8::try_from(total.min(100)).unwrap_or(100)
    }
}

/// Completion percentage in `[0, 100]` with the default 25-per-phase weights
#[inline]
#[must_use]
pub fn compute_progress(project: &Project) -> u8 {
    ProgressWeights::default().score(project)
}
