//! View loaders: fetch everything a screen needs, then run the metrics
//! engine over the fully resolved collections.
//!
//! Fetches for one view run concurrently. If any of them fails the view
//! fails with that error and no metrics are computed from partial data.

pub mod dashboard;
pub mod profile;
pub mod project_detail;
pub mod task_list;

pub use dashboard::DashboardView;
pub use profile::ProfileView;
pub use project_detail::ProjectDetailView;
pub use task_list::{TaskListView, TaskScope};

use crate::api::ApiError;
use crate::model::status::DataIntegrityError;

/// Error type for loading a view.
///
/// Transport/auth problems and client/server status drift are kept apart:
/// the first is usually transient, the second means the client needs an
/// update.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("data integrity error: {0}")]
    Integrity(#[from] DataIntegrityError),
}

impl ViewError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ViewError::Api(e) if e.is_unauthorized())
    }
}
