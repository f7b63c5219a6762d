use serde::Serialize;

use crate::api::ApiClient;
use crate::model::config::DashboardConfig;
use crate::model::project::Project;
use crate::model::status::{DataIntegrityError, ProjectStatus, TaskStatus};
use crate::model::task::Task;
use crate::ops::filter::{select_recent, select_upcoming};
use crate::ops::metrics::{
    StatusHistogram, SummaryStats, compute_summary_stats, project_status_histogram,
    task_status_histogram,
};
use crate::views::ViewError;

/// The signed-in user's projects and assigned tasks, summarized
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub stats: SummaryStats,
    pub project_status: StatusHistogram<ProjectStatus>,
    pub task_status: StatusHistogram<TaskStatus>,
    pub recent_projects: Vec<Project>,
    pub upcoming_tasks: Vec<Task>,
}

impl DashboardView {
    pub async fn load(client: &ApiClient, limits: DashboardConfig) -> Result<Self, ViewError> {
        let (projects, tasks) =
            tokio::try_join!(client.current_user_projects(), client.assigned_tasks())?;
        log::debug!(
            "dashboard: {} projects, {} assigned tasks",
            projects.len(),
            tasks.len()
        );
        Ok(Self::compute(&projects, &tasks, limits)?)
    }

    pub fn compute(
        projects: &[Project],
        tasks: &[Task],
        limits: DashboardConfig,
    ) -> Result<Self, DataIntegrityError> {
        Ok(DashboardView {
            stats: compute_summary_stats(projects, tasks),
            project_status: project_status_histogram(projects)?,
            task_status: task_status_histogram(tasks)?,
            recent_projects: select_recent(projects, limits.recent_limit)
                .into_iter()
                .cloned()
                .collect(),
            upcoming_tasks: select_upcoming(tasks, limits.upcoming_limit)
                .into_iter()
                .cloned()
                .collect(),
        })
    }
}
