use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::status::{DataIntegrityError, ProjectStatus, StatusEnum};
use crate::model::timestamp;
use crate::model::user::{EntityId, UserSummary};

/// A project snapshot as last fetched from the backend.
///
/// `status` keeps the raw wire token; use [`Project::resolved_status`] to
/// get the closed enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, with = "timestamp::opt")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, with = "timestamp::opt")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default, with = "timestamp::opt")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "timestamp::opt")]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub owner: Option<UserSummary>,
    #[serde(default)]
    pub members: Vec<UserSummary>,
    #[serde(default)]
    pub total_tasks: u32,
    #[serde(default)]
    pub completed_tasks: u32,
}

impl Project {
    /// Create a project snapshot with only the required fields set
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Project {
            id,
            name: name.into(),
            description: None,
            status: None,
            start_date: None,
            due_date: None,
            created_at: None,
            updated_at: None,
            owner: None,
            members: Vec::new(),
            total_tasks: 0,
            completed_tasks: 0,
        }
    }

    pub fn resolved_status(&self) -> Result<ProjectStatus, DataIntegrityError> {
        ProjectStatus::resolve(self.status.as_deref())
    }

    /// True if the user owns the project or is listed as a member.
    pub fn has_member(&self, user_id: EntityId) -> bool {
        self.owner.as_ref().is_some_and(|o| o.id == user_id)
            || self.members.iter().any(|m| m.id == user_id)
    }
}
