use indexmap::IndexMap;
use serde::Serialize;

use crate::api::ApiClient;
use crate::model::project::Project;
use crate::model::status::{DataIntegrityError, TaskStatus};
use crate::model::task::Task;
use crate::model::user::{EntityId, UserSummary};
use crate::ops::members::non_members;
use crate::ops::metrics::{
    StatusHistogram, completion_rate, group_tasks_by_status, task_status_histogram,
};
use crate::views::ViewError;

/// One project with its tasks split per status, as on the project page
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetailView {
    pub project: Project,
    /// Backend counters turned into a whole percent
    pub progress: u32,
    pub task_status: StatusHistogram<TaskStatus>,
    pub tasks_by_status: IndexMap<TaskStatus, Vec<Task>>,
    /// Users that can still be added as members
    pub candidates: Vec<UserSummary>,
}

impl ProjectDetailView {
    pub async fn load(client: &ApiClient, project_id: EntityId) -> Result<Self, ViewError> {
        let (project, tasks, users) = tokio::try_join!(
            client.project_by_id(project_id),
            client.tasks_by_project(project_id),
            client.all_users()
        )?;
        Ok(Self::compute(project, &tasks, &users)?)
    }

    pub fn compute(
        project: Project,
        tasks: &[Task],
        users: &[UserSummary],
    ) -> Result<Self, DataIntegrityError> {
        let tasks_by_status = group_tasks_by_status(tasks)?
            .into_iter()
            .map(|(status, group)| (status, group.into_iter().cloned().collect()))
            .collect();
        let candidates = non_members(&project, users).into_iter().cloned().collect();
        Ok(ProjectDetailView {
            progress: completion_rate(
                project.completed_tasks as usize,
                project.total_tasks as usize,
            ),
            task_status: task_status_histogram(tasks)?,
            tasks_by_status,
            candidates,
            project,
        })
    }
}
