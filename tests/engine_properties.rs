//! Behavioural guarantees of the metrics and filtering engine.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use taskdeck::model::timestamp::parse_timestamp;
use taskdeck::model::{DataIntegrityError, Project, StatusEnum, Task, TaskStatus};
use taskdeck::ops::filter::{
    SortKey, StatusFilter, TaskFilter, filter_tasks, select_upcoming, sort_tasks,
};
use taskdeck::ops::format::format_status_label;
use taskdeck::ops::metrics::{SummaryStats, compute_summary_stats, task_status_histogram};

fn task(id: i64, status: Option<&str>, due: Option<&str>) -> Task {
    let mut t = Task::new(id, format!("task {id}"));
    t.status = status.map(str::to_string);
    t.due_date = due.and_then(parse_timestamp);
    t
}

fn ids(tasks: &[&Task]) -> Vec<i64> {
    tasks.iter().map(|t| t.id).collect()
}

fn task_strategy() -> impl Strategy<Value = Task> {
    let status = prop::sample::select(TaskStatus::ALL.to_vec());
    let due = proptest::option::of(0u32..3);
    (any::<i64>(), status, 1u8..=5, due, any::<bool>()).prop_map(
        |(id, status, priority, due, overdue)| {
            let mut t = Task::new(id, format!("generated {id}"));
            t.status = Some(status.token().to_string());
            t.priority = priority;
            t.due_date = due.and_then(|d| parse_timestamp(&format!("2025-01-0{}", d + 1)));
            t.overdue = Some(overdue);
            t
        },
    )
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn summary_of_nothing_is_all_zero() {
    assert_eq!(
        compute_summary_stats(&[], &[]),
        SummaryStats {
            total_projects: 0,
            total_tasks: 0,
            overdue_tasks: 0,
            completed_tasks: 0,
            completion_rate: 0,
        }
    );
}

#[test]
fn format_status_label_examples() {
    let once = format_status_label(Some("IN_PROGRESS"));
    assert_eq!(once, "In Progress");
    assert_eq!(format_status_label(Some(&once.to_lowercase())), "In Progress");
    assert_eq!(format_status_label(None), "Unknown");
}

#[test]
fn due_date_sort_keeps_undated_tasks_in_input_order() {
    let tasks = vec![
        task(1, Some("TODO"), None),
        task(2, Some("TODO"), Some("2025-05-01")),
        task(3, Some("TODO"), None),
        task(4, Some("TODO"), Some("2025-04-01")),
    ];
    assert_eq!(ids(&sort_tasks(&tasks, SortKey::DueDate)), vec![4, 2, 1, 3]);
}

#[test]
fn completion_rate_rounds_two_of_three_to_67() {
    let tasks = vec![
        task(1, Some("DONE"), None),
        task(2, Some("TODO"), None),
        task(3, Some("DONE"), None),
    ];
    let projects = vec![Project::new(1, "only")];
    let stats = compute_summary_stats(&projects, &tasks);
    assert_eq!(stats.total_projects, 1);
    assert_eq!(stats.completed_tasks, 2);
    assert_eq!(stats.completion_rate, 67);
}

#[test]
fn histogram_rejects_unrecognized_token() {
    let tasks = vec![task(1, Some("TODO"), None), task(2, Some("UNKNOWN_TOKEN"), None)];
    assert_eq!(
        task_status_histogram(&tasks),
        Err(DataIntegrityError::UnknownStatus {
            kind: "task",
            token: "UNKNOWN_TOKEN".to_string()
        })
    );
}

#[test]
fn upcoming_skips_done_and_puts_undated_last() {
    let tasks = vec![
        task(1, Some("DONE"), Some("2030-01-01")),
        task(2, Some("TODO"), None),
        task(3, Some("TODO"), Some("2025-01-01")),
    ];
    assert_eq!(ids(&select_upcoming(&tasks, 2)), vec![3, 2]);
}

// ============================================================================
// Laws
// ============================================================================

proptest! {
    #[test]
    fn histogram_conserves_task_count(tasks in proptest::collection::vec(task_strategy(), 0..64)) {
        let histogram = task_status_histogram(&tasks).unwrap();
        prop_assert_eq!(histogram.len(), TaskStatus::ALL.len());
        prop_assert_eq!(histogram.total(), tasks.len());
    }

    #[test]
    fn unfiltered_view_is_identity(tasks in proptest::collection::vec(task_strategy(), 0..64)) {
        let filter = TaskFilter { search_term: String::new(), status: StatusFilter::All };
        let kept = filter_tasks(&tasks, &filter);
        prop_assert_eq!(kept.len(), tasks.len());
        for (kept, original) in kept.iter().zip(tasks.iter()) {
            prop_assert!(std::ptr::eq(*kept, original));
        }
    }

    #[test]
    fn summary_counts_match_predicates(tasks in proptest::collection::vec(task_strategy(), 0..64)) {
        let stats = compute_summary_stats(&[], &tasks);
        let done = tasks.iter().filter(|t| t.status.as_deref() == Some("DONE")).count();
        let overdue = tasks.iter().filter(|t| t.overdue == Some(true)).count();
        prop_assert_eq!(stats.completed_tasks, done);
        prop_assert_eq!(stats.overdue_tasks, overdue);
        prop_assert!(stats.completion_rate <= 100);
    }

    #[test]
    fn sorting_is_a_stable_permutation(
        tasks in proptest::collection::vec(task_strategy(), 0..64),
        key in prop::sample::select(vec![SortKey::DueDate, SortKey::Priority, SortKey::Status, SortKey::Project]),
    ) {
        // give every task a distinct position marker so stability is observable
        let tasks: Vec<Task> = tasks
            .into_iter()
            .enumerate()
            .map(|(i, mut t)| { t.id = i as i64; t })
            .collect();
        let sorted = sort_tasks(&tasks, key);
        prop_assert_eq!(sorted.len(), tasks.len());

        let mut seen: Vec<i64> = sorted.iter().map(|t| t.id).collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..tasks.len() as i64).collect::<Vec<_>>());

        for pair in sorted.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let tie = match key {
                SortKey::DueDate => a.due_date == b.due_date,
                SortKey::Priority => a.priority == b.priority,
                SortKey::Status => a.status == b.status,
                SortKey::Project => a.project_name == b.project_name,
            };
            if tie {
                prop_assert!(a.id < b.id);
            }
        }
    }
}
