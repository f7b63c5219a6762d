use std::cmp::Ordering;
use std::str::FromStr;

use crate::model::project::Project;
use crate::model::task::Task;

/// Status restriction for the task list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    /// Exact wire token, e.g. `IN_PROGRESS`
    Only(String),
}

impl StatusFilter {
    fn matches(&self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(token) => task.status.as_deref() == Some(token.as_str()),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = std::convert::Infallible;

    /// `all` is the sentinel for no restriction; anything else is taken as
    /// a status token verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "all" {
            StatusFilter::All
        } else {
            StatusFilter::Only(s.to_string())
        })
    }
}

/// Search and status criteria applied to a task list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub search_term: String,
    pub status: StatusFilter,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        matches_search(task, &self.search_term) && self.status.matches(task)
    }
}

/// Case-insensitive substring match on title, description and project
/// name. Missing fields are skipped, not treated as a miss of the task.
fn matches_search(task: &Task, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    let hit = |s: &str| s.to_lowercase().contains(&needle);

    hit(&task.title)
        || task.description.as_deref().is_some_and(hit)
        || task.project_name.as_deref().is_some_and(hit)
}

/// Tasks matching `filter`, in input order.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Task list ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Earliest due date first; tasks without one last
    #[default]
    DueDate,
    /// Highest priority first
    Priority,
    /// Status token, ascending
    Status,
    /// Project name, ascending by byte order: uppercase names sort before
    /// lowercase ones, with no locale collation
    Project,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "due" | "dueDate" | "due-date" => Ok(SortKey::DueDate),
            "priority" => Ok(SortKey::Priority),
            "status" => Ok(SortKey::Status),
            "project" => Ok(SortKey::Project),
            other => Err(format!(
                "invalid sort key '{}' (expected due, priority, status, project)",
                other
            )),
        }
    }
}

/// Present values ascending, absent values after all present ones.
fn cmp_present_first<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare(a: &Task, b: &Task, key: SortKey) -> Ordering {
    match key {
        SortKey::DueDate => cmp_present_first(a.due_date, b.due_date),
        SortKey::Priority => b.priority.cmp(&a.priority),
        SortKey::Status => cmp_present_first(a.status.as_deref(), b.status.as_deref()),
        SortKey::Project => {
            cmp_present_first(a.project_name.as_deref(), b.project_name.as_deref())
        }
    }
}

/// Stable sort: tasks that compare equal keep their input order.
pub fn sort_tasks<'a, I>(tasks: I, key: SortKey) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut sorted: Vec<&Task> = tasks.into_iter().collect();
    sorted.sort_by(|a, b| compare(a, b, key));
    sorted
}

/// Not-done tasks with the nearest due dates, at most `n`.
pub fn select_upcoming(tasks: &[Task], n: usize) -> Vec<&Task> {
    let mut upcoming = sort_tasks(tasks.iter().filter(|t| !t.is_done()), SortKey::DueDate);
    upcoming.truncate(n);
    upcoming
}

/// Most recently created projects first, at most `n`. Projects without a
/// creation time go last.
pub fn select_recent(projects: &[Project], n: usize) -> Vec<&Project> {
    let mut recent: Vec<&Project> = projects.iter().collect();
    recent.sort_by(|a, b| match (a.created_at, b.created_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (a, b) => cmp_present_first(a, b),
    });
    recent.truncate(n);
    recent
}
