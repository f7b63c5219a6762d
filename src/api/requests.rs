use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::model::project::Project;
use crate::model::status::{DataIntegrityError, ProjectStatus, StatusEnum, TaskStatus};
use crate::model::task::Task;
use crate::model::timestamp;
use crate::model::user::EntityId;

#[derive(Debug, Clone, Serialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
}

impl SignUpRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.username.trim().is_empty() {
            return Err(ApiError::Invalid("username is required".into()));
        }
        if !self.email.contains('@') {
            return Err(ApiError::Invalid(format!("'{}' is not an email address", self.email)));
        }
        if self.password.is_empty() {
            return Err(ApiError::Invalid("password is required".into()));
        }
        Ok(())
    }
}

/// Plain `{"message": ...}` body used by the backend for acknowledgements
/// and error descriptions
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body for creating or replacing a project
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "timestamp::opt")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(with = "timestamp::opt")]
    pub due_date: Option<NaiveDateTime>,
    pub status: Option<ProjectStatus>,
    pub member_ids: Vec<EntityId>,
}

impl ProjectRequest {
    pub fn new(name: impl Into<String>, start_date: NaiveDateTime) -> Self {
        ProjectRequest {
            name: name.into(),
            description: None,
            start_date: Some(start_date),
            due_date: None,
            status: Some(ProjectStatus::NotStarted),
            member_ids: Vec::new(),
        }
    }

    /// Request that reproduces `project` as fetched, for partial edits.
    pub fn from_existing(project: &Project) -> Result<Self, DataIntegrityError> {
        let status = project
            .status
            .as_deref()
            .map(ProjectStatus::from_token)
            .transpose()?;
        Ok(ProjectRequest {
            name: project.name.clone(),
            description: project.description.clone(),
            start_date: project.start_date,
            due_date: project.due_date,
            status,
            member_ids: project.members.iter().map(|m| m.id).collect(),
        })
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Invalid("project name is required".into()));
        }
        if self.start_date.is_none() {
            return Err(ApiError::Invalid("project start date is required".into()));
        }
        Ok(())
    }
}

/// Body for creating or replacing a task
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: u8,
    #[serde(with = "timestamp::opt")]
    pub due_date: Option<NaiveDateTime>,
    pub project_id: Option<EntityId>,
    pub assignee_id: Option<EntityId>,
    pub progress_percentage: Option<u8>,
}

impl TaskRequest {
    /// New task defaults: TODO, medium priority, no progress
    pub fn new(title: impl Into<String>, project_id: EntityId) -> Self {
        TaskRequest {
            title: title.into(),
            description: None,
            status: Some(TaskStatus::Todo),
            priority: 3,
            due_date: None,
            project_id: Some(project_id),
            assignee_id: None,
            progress_percentage: Some(0),
        }
    }

    /// Request that reproduces `task` as fetched, for partial edits.
    pub fn from_existing(task: &Task) -> Result<Self, DataIntegrityError> {
        let status = task
            .status
            .as_deref()
            .map(TaskStatus::from_token)
            .transpose()?;
        Ok(TaskRequest {
            title: task.title.clone(),
            description: task.description.clone(),
            status,
            priority: task.priority,
            due_date: task.due_date,
            project_id: task.project_id,
            assignee_id: task.assignee.as_ref().map(|a| a.id),
            progress_percentage: task.progress_percentage,
        })
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::Invalid("task title is required".into()));
        }
        if !(1..=5).contains(&self.priority) {
            return Err(ApiError::Invalid(format!(
                "priority must be between 1 and 5, got {}",
                self.priority
            )));
        }
        if let Some(p) = self.progress_percentage {
            validate_progress(p)?;
        }
        if self.project_id.is_none() {
            return Err(ApiError::Invalid("task must belong to a project".into()));
        }
        Ok(())
    }
}

pub fn validate_progress(progress: u8) -> Result<(), ApiError> {
    if progress > 100 {
        return Err(ApiError::Invalid(format!(
            "progress must be between 0 and 100, got {}",
            progress
        )));
    }
    Ok(())
}
