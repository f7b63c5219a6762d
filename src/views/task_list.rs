use serde::Serialize;

use crate::api::{ApiClient, ApiError};
use crate::model::task::Task;
use crate::ops::filter::{SortKey, TaskFilter, filter_tasks, sort_tasks};

/// Which tasks the list starts from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskScope {
    /// Tasks assigned to the signed-in user
    #[default]
    Assigned,
    /// Every task the backend lets the user see
    All,
}

/// A searched, filtered and sorted task list
#[derive(Debug, Clone, Serialize)]
pub struct TaskListView {
    /// Number of tasks fetched before filtering
    pub fetched: usize,
    pub tasks: Vec<Task>,
}

impl TaskListView {
    pub async fn load(
        client: &ApiClient,
        scope: TaskScope,
        filter: &TaskFilter,
        sort: SortKey,
    ) -> Result<Self, ApiError> {
        let tasks = match scope {
            TaskScope::Assigned => client.assigned_tasks().await?,
            TaskScope::All => client.all_tasks().await?,
        };
        Ok(Self::compute(&tasks, filter, sort))
    }

    pub fn compute(tasks: &[Task], filter: &TaskFilter, sort: SortKey) -> Self {
        let filtered = filter_tasks(tasks, filter);
        TaskListView {
            fetched: tasks.len(),
            tasks: sort_tasks(filtered, sort).into_iter().cloned().collect(),
        }
    }
}
