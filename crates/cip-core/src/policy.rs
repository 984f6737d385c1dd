//! Access policy
//!
//! Maps a [`Role`] to the mutations it may perform. The table is flat:
//! each role's permitted actions are listed explicitly, no role inherits
//! from another.

use crate::error::{CipError, Result};
use crate::types::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mutating action subject to the access policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Rename, describe or re-status a project
    EditProjectFields,
    /// Change plan/check/act content
    EditPhaseContent,
    /// Append a task
    AddTask,
    /// Change a task's status
    EditTaskStatus,
    /// Remove a task
    DeleteTask,
    /// Remove a project from the working set
    DeleteProject,
}

impl Action {
    /// Every action
    pub const ALL: [Action; 6] = [
        Action::EditProjectFields,
        Action::EditPhaseContent,
        Action::AddTask,
        Action::EditTaskStatus,
        Action::DeleteTask,
        Action::DeleteProject,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::EditProjectFields => "edit project fields",
            Action::EditPhaseContent => "edit phase content",
            Action::AddTask => "add tasks",
            Action::EditTaskStatus => "edit task status",
            Action::DeleteTask => "delete tasks",
            Action::DeleteProject => "delete projects",
        })
    }
}

const EDITOR_ACTIONS: [Action; 4] = [
    Action::EditProjectFields,
    Action::EditPhaseContent,
    Action::AddTask,
    Action::EditTaskStatus,
];

/// Actions a role is permitted to perform
#[must_use]
pub fn permitted_actions(role: Role) -> &'static [Action] {
    match role {
        Role::Admin => &Action::ALL,
        Role::Editor => &EDITOR_ACTIONS,
        Role::Reader => &[],
    }
}

/// Check if `role` may perform `action`
#[inline]
#[must_use]
pub fn can_mutate(role: Role, action: Action) -> bool {
    permitted_actions(role).contains(&action)
}

/// Require permission before touching any state
///
/// # Errors
/// - `CipError::PermissionDenied` if the role lacks the action
pub fn require(role: Role, action: Action) -> Result<()> {
    if can_mutate(role, action) {
        Ok(())
    } else {
        tracing::warn!(%role, %action, "mutation refused by access policy");
        Err(CipError::PermissionDenied { role, action })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_may_do_everything() {
        for action in Action::ALL {
            assert!(can_mutate(Role::Admin, action), "{action}");
        }
    }

    #[test]
    fn editor_cannot_delete() {
        assert!(can_mutate(Role::Editor, Action::EditProjectFields));
        assert!(can_mutate(Role::Editor, Action::EditPhaseContent));
        assert!(can_mutate(Role::Editor, Action::AddTask));
        assert!(can_mutate(Role::Editor, Action::EditTaskStatus));
        assert!(!can_mutate(Role::Editor, Action::DeleteTask));
        assert!(!can_mutate(Role::Editor, Action::DeleteProject));
    }

    #[test]
    fn reader_is_view_only() {
        assert!(permitted_actions(Role::Reader).is_empty());
        for action in Action::ALL {
            assert!(!can_mutate(Role::Reader, action));
        }
    }

    #[test]
    fn table_agrees_with_permitted_actions() {
        for role in Role::ALL {
            for action in Action::ALL {
                assert_eq!(
                    can_mutate(role, action),
                    permitted_actions(role).contains(&action),
                    "{role} / {action}"
                );
                assert_eq!(require(role, action).is_ok(), can_mutate(role, action));
            }
        }
    }

    #[test]
    fn require_reports_role_and_action() {
        assert!(require(Role::Editor, Action::AddTask).is_ok());
        let err = require(Role::Editor, Action::DeleteProject).unwrap_err();
        assert!(matches!(
            err,
            CipError::PermissionDenied {
                role: Role::Editor,
                action: Action::DeleteProject
            }
        ));
    }
}
