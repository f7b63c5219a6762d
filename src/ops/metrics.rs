use indexmap::IndexMap;
use serde::Serialize;
use serde::ser::SerializeMap;

use crate::model::project::Project;
use crate::model::status::{DataIntegrityError, ProjectStatus, StatusEnum, TaskStatus};
use crate::model::task::Task;

/// Aggregate counts shown on the dashboard and profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    pub total_projects: usize,
    pub total_tasks: usize,
    pub overdue_tasks: usize,
    pub completed_tasks: usize,
    /// Whole percent, 0 when there are no tasks
    pub completion_rate: u32,
}

/// Compute summary counts over already-fetched collections.
///
/// A task is overdue when either overdue flag is `true`, and completed when
/// its status token is exactly `DONE`.
pub fn compute_summary_stats(projects: &[Project], tasks: &[Task]) -> SummaryStats {
    let total_tasks = tasks.len();
    let overdue_tasks = tasks.iter().filter(|t| t.is_overdue()).count();
    let completed_tasks = tasks.iter().filter(|t| t.is_done()).count();

    SummaryStats {
        total_projects: projects.len(),
        total_tasks,
        overdue_tasks,
        completed_tasks,
        completion_rate: completion_rate(completed_tasks, total_tasks),
    }
}

/// `round(completed / total * 100)`, rounding halves up, in integer
/// arithmetic. Zero tasks gives 0.
pub fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let c = completed as u64;
    let t = total as u64;
    ((200 * c + t) / (2 * t)) as u32
}

// ---------------------------------------------------------------------------
// Status histograms
// ---------------------------------------------------------------------------

/// Per-status counts with one entry for every member of `E`, in the
/// enum's declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusHistogram<E: StatusEnum> {
    counts: IndexMap<E, usize>,
}

impl<E: StatusEnum> StatusHistogram<E> {
    /// All buckets present and zeroed
    pub fn zeroed() -> Self {
        StatusHistogram {
            counts: E::ALL.iter().map(|s| (*s, 0)).collect(),
        }
    }

    pub fn get(&self, status: E) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    /// Buckets in declared order
    pub fn iter(&self) -> impl Iterator<Item = (E, usize)> + '_ {
        self.counts.iter().map(|(s, n)| (*s, *n))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum over all buckets
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    fn increment(&mut self, status: E) {
        *self.counts.entry(status).or_insert(0) += 1;
    }
}

impl<E: StatusEnum> Serialize for StatusHistogram<E> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (status, count) in &self.counts {
            map.serialize_entry(status.token(), count)?;
        }
        map.end()
    }
}

/// Tally entities by status.
///
/// Every status in `E` starts at zero. An entity whose status is missing
/// or not a token of `E` fails the whole tally.
pub fn bucket_by_status<E, T, F>(
    entities: &[T],
    status_of: F,
) -> Result<StatusHistogram<E>, DataIntegrityError>
where
    E: StatusEnum,
    F: Fn(&T) -> Option<&str>,
{
    let mut histogram = StatusHistogram::zeroed();
    for entity in entities {
        histogram.increment(E::resolve(status_of(entity))?);
    }
    Ok(histogram)
}

pub fn project_status_histogram(
    projects: &[Project],
) -> Result<StatusHistogram<ProjectStatus>, DataIntegrityError> {
    bucket_by_status(projects, |p: &Project| p.status.as_deref())
}

pub fn task_status_histogram(
    tasks: &[Task],
) -> Result<StatusHistogram<TaskStatus>, DataIntegrityError> {
    bucket_by_status(tasks, |t: &Task| t.status.as_deref())
}

/// Group tasks under every task status in declared order, preserving input
/// order inside each group. Empty groups are kept.
pub fn group_tasks_by_status(
    tasks: &[Task],
) -> Result<IndexMap<TaskStatus, Vec<&Task>>, DataIntegrityError> {
    let mut groups: IndexMap<TaskStatus, Vec<&Task>> =
        TaskStatus::ALL.iter().map(|s| (*s, Vec::new())).collect();
    for task in tasks {
        let status = task.resolved_status()?;
        groups.entry(status).or_default().push(task);
    }
    Ok(groups)
}
