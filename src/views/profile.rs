use serde::Serialize;

use crate::api::ApiClient;
use crate::model::user::UserSummary;
use crate::ops::metrics::{SummaryStats, compute_summary_stats};
use crate::views::ViewError;

/// Identity plus personal task statistics
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub user: UserSummary,
    /// Role names without the `ROLE_` prefix
    pub roles: Vec<String>,
    pub stats: SummaryStats,
}

impl ProfileView {
    /// Roles come from the client's session; they are display-only.
    pub async fn load(client: &ApiClient) -> Result<Self, ViewError> {
        let (user, projects, tasks) = tokio::try_join!(
            client.current_user(),
            client.current_user_projects(),
            client.assigned_tasks()
        )?;
        let roles = client
            .session()
            .map(|s| s.display_roles())
            .unwrap_or_default();
        Ok(ProfileView {
            user,
            roles,
            stats: compute_summary_stats(&projects, &tasks),
        })
    }
}
