use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::status::{DataIntegrityError, StatusEnum, TaskStatus};
use crate::model::timestamp;
use crate::model::user::{EntityId, UserSummary};

/// A task snapshot as last fetched from the backend.
///
/// The backend has emitted the overdue flag under two names over time
/// (`overdue` and `isOverdue`); both are kept and either one being `true`
/// makes the task overdue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub progress_percentage: Option<u8>,
    #[serde(default, with = "timestamp::opt")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overdue: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_overdue: Option<bool>,
    #[serde(default)]
    pub assignee: Option<UserSummary>,
    #[serde(default)]
    pub project_id: Option<EntityId>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default, with = "timestamp::opt")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "timestamp::opt")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Default: medium priority, matching the backend's form default
fn default_priority() -> u8 {
    3
}

impl Task {
    /// Create a task snapshot with only the required fields set
    pub fn new(id: EntityId, title: impl Into<String>) -> Self {
        Task {
            id,
            title: title.into(),
            description: None,
            status: None,
            priority: default_priority(),
            progress_percentage: None,
            due_date: None,
            overdue: None,
            is_overdue: None,
            assignee: None,
            project_id: None,
            project_name: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Overdue as reported by the backend under either field name.
    /// Absence of both is `false`.
    pub fn is_overdue(&self) -> bool {
        self.overdue == Some(true) || self.is_overdue == Some(true)
    }

    /// Exact match on the `DONE` wire token.
    pub fn is_done(&self) -> bool {
        self.status.as_deref() == Some(TaskStatus::Done.token())
    }

    pub fn resolved_status(&self) -> Result<TaskStatus, DataIntegrityError> {
        TaskStatus::resolve(self.status.as_deref())
    }
}
