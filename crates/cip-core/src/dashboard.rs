//! Dashboard aggregation
//!
//! Per-project KPIs for the dashboard view: task counts, overdue detection,
//! the status distribution behind the proportion chart and the before/after
//! metrics comparison.

use crate::progress::ProgressWeights;
use crate::types::{Project, Task, TaskStatus};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Before/after values for the comparison chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsComparison {
    /// Value before the change
    pub before: f64,
    /// Value after the change
    pub after: f64,
}

/// Aggregated project KPIs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Number of tasks
    pub total_tasks: usize,
    /// Tasks with status `completed`
    pub completed_tasks: usize,
    /// Tasks with status `in_progress`
    pub in_progress_tasks: usize,
    /// Unfinished tasks due strictly before today
    pub overdue_tasks: usize,
    /// Task count per status; statuses without tasks are absent
    pub status_distribution: BTreeMap<TaskStatus, usize>,
    /// Before/after metrics, absent when none were recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_comparison: Option<MetricsComparison>,
    /// Completion percentage
    pub progress: u8,
}

impl DashboardSummary {
    /// Summarize a project as of `today` with default progress weights
    #[must_use]
    pub fn compute(project: &Project, today: NaiveDate) -> Self {
        Self::compute_with_weights(project, today, &ProgressWeights::default())
    }

    /// Summarize a project as of `today`
    #[must_use]
    pub fn compute_with_weights(project: &Project, today: NaiveDate, weights: &ProgressWeights) -> Self {
        let tasks = project.tasks();
        Self {
            total_tasks: tasks.len(),
            completed_tasks: count_with_status(tasks, TaskStatus::Completed),
            in_progress_tasks: count_with_status(tasks, TaskStatus::InProgress),
            overdue_tasks: count_overdue(tasks, today),
            status_distribution: status_distribution(tasks),
            metrics_comparison: project.check.metrics.map(|m| MetricsComparison {
                before: m.before(),
                after: m.after(),
            }),
            progress: weights.score(project),
        }
    }

    /// Completed tasks as `"done/total"`
    #[must_use]
    pub fn completion_label(&self) -> String {
        format!("{}/{}", self.completed_tasks, self.total_tasks)
    }
}

fn count_with_status(tasks: &[Task], status: TaskStatus) -> usize {
    tasks.iter().filter(|t| t.status == status).count()
}

/// Unfinished tasks due strictly before `today`
#[must_use]
pub fn count_overdue(tasks: &[Task], today: NaiveDate) -> usize {
    tasks.iter().filter(|t| t.is_overdue(today)).count()
}

/// Count tasks per status, omitting statuses with no tasks
#[must_use]
pub fn status_distribution(tasks: &[Task]) -> BTreeMap<TaskStatus, usize> {
    let mut counts = BTreeMap::new();
    for task in tasks {
        *counts.entry(task.status).or_insert(0) += 1;
    }
    counts
}
