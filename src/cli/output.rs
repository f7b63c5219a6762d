use std::fmt::Write;

use serde::Serialize;

use crate::model::project::Project;
use crate::model::status::StatusEnum;
use crate::model::task::Task;
use crate::model::user::UserSummary;
use crate::ops::format::{format_date, format_status_label};
use crate::ops::metrics::{StatusHistogram, SummaryStats};
use crate::util::unicode::{display_width, pad_left_to_width, pad_to_width, truncate_to_width};
use crate::views::{DashboardView, ProfileView, ProjectDetailView, TaskListView};

/// Widest a title column may get before it is truncated
const TITLE_MAX: usize = 48;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct MessageJson {
    pub ok: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct SessionJson<'a> {
    pub username: &'a str,
    pub roles: Vec<String>,
}

pub fn message_json(message: impl Into<String>) -> MessageJson {
    MessageJson {
        ok: true,
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Render rows as space-separated columns sized by display width.
/// Columns listed in `right` are right-aligned; the last column is never
/// padded.
fn render_table(header: &[&str], rows: &[Vec<String>], right: &[usize]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    let mut out = String::new();
    let header: Vec<String> = header.iter().map(|h| h.to_string()).collect();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let last = row.len().saturating_sub(1);
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if right.contains(&i) {
                    pad_left_to_width(cell, widths[i])
                } else if i == last {
                    cell.clone()
                } else {
                    pad_to_width(cell, widths[i])
                }
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

pub fn render_task_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found.\n".to_string();
    }
    let rows: Vec<Vec<String>> = tasks
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                format_status_label(t.status.as_deref()),
                t.priority.to_string(),
                due_cell(t),
                t.project_name.clone().unwrap_or_default(),
                truncate_to_width(&t.title, TITLE_MAX),
            ]
        })
        .collect();
    render_table(&["ID", "STATUS", "PRI", "DUE", "PROJECT", "TITLE"], &rows, &[0, 2])
}

/// Due date with a trailing `!` when the backend flags the task overdue
fn due_cell(task: &Task) -> String {
    let date = format_date(task.due_date, "-");
    if task.is_overdue() {
        format!("{date}!")
    } else {
        date
    }
}

pub fn render_project_table(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects found.\n".to_string();
    }
    let rows: Vec<Vec<String>> = projects
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                format_status_label(p.status.as_deref()),
                format!("{}/{}", p.completed_tasks, p.total_tasks),
                format_date(p.due_date, "-"),
                truncate_to_width(&p.name, TITLE_MAX),
            ]
        })
        .collect();
    render_table(&["ID", "STATUS", "TASKS", "DUE", "NAME"], &rows, &[0, 2])
}

pub fn render_user_table(users: &[UserSummary]) -> String {
    if users.is_empty() {
        return "No users found.\n".to_string();
    }
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|u| {
            vec![
                u.id.to_string(),
                u.username.clone(),
                u.full_name.clone().unwrap_or_default(),
                u.email.clone().unwrap_or_default(),
            ]
        })
        .collect();
    render_table(&["ID", "USERNAME", "NAME", "EMAIL"], &rows, &[0])
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

pub fn render_summary(stats: &SummaryStats) -> String {
    let rows = vec![
        vec!["Projects".to_string(), stats.total_projects.to_string()],
        vec!["Tasks".to_string(), stats.total_tasks.to_string()],
        vec!["Completed".to_string(), stats.completed_tasks.to_string()],
        vec!["Overdue".to_string(), stats.overdue_tasks.to_string()],
        vec!["Completion".to_string(), format!("{}%", stats.completion_rate)],
    ];
    render_table(&["", ""], &rows, &[1])
        .lines()
        .skip(1)
        .map(|l| format!("{l}\n"))
        .collect()
}

/// One line per bucket in declared order, with a bar scaled to the largest
/// bucket.
pub fn render_histogram<E: StatusEnum>(title: &str, histogram: &StatusHistogram<E>) -> String {
    const BAR_MAX: usize = 20;
    let label_w = E::ALL.iter().map(|s| display_width(s.label())).max().unwrap_or(0);
    let max = histogram.iter().map(|(_, n)| n).max().unwrap_or(0);
    let count_w = max.to_string().len();

    let mut out = format!("{title}\n");
    for (status, count) in histogram.iter() {
        let bar = if max == 0 { 0 } else { (count * BAR_MAX).div_ceil(max) };
        let line = format!(
            "  {}  {}  {}",
            pad_to_width(status.label(), label_w),
            pad_left_to_width(&count.to_string(), count_w),
            "#".repeat(bar)
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    out.push_str(&render_summary(&view.stats));
    out.push('\n');
    out.push_str(&render_histogram("Project status", &view.project_status));
    out.push('\n');
    out.push_str(&render_histogram("Task status", &view.task_status));
    out.push_str("\nRecent projects\n");
    out.push_str(&render_project_table(&view.recent_projects));
    out.push_str("\nUpcoming tasks\n");
    out.push_str(&render_task_table(&view.upcoming_tasks));
    out
}

pub fn render_task_list(view: &TaskListView) -> String {
    let mut out = render_task_table(&view.tasks);
    if !view.tasks.is_empty() {
        let _ = writeln!(out, "\n{} of {} tasks", view.tasks.len(), view.fetched);
    }
    out
}

pub fn render_profile(view: &ProfileView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", view.user.display_name(), view.user.username);
    if let Some(email) = &view.user.email {
        let _ = writeln!(out, "Email: {email}");
    }
    if !view.roles.is_empty() {
        let _ = writeln!(out, "Role: {}", view.roles.join(", "));
    }
    out.push('\n');
    out.push_str(&render_summary(&view.stats));
    out
}

pub fn render_project_detail(view: &ProjectDetailView) -> String {
    let p = &view.project;
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", p.name, p.id);
    let _ = writeln!(out, "Status:   {}", format_status_label(p.status.as_deref()));
    if let Some(desc) = p.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "About:    {desc}");
    }
    let _ = writeln!(out, "Start:    {}", format_date(p.start_date, "Not set"));
    let _ = writeln!(out, "Due:      {}", format_date(p.due_date, "Not set"));
    if let Some(owner) = &p.owner {
        let _ = writeln!(out, "Owner:    {}", owner.display_name());
    }
    if !p.members.is_empty() {
        let names: Vec<&str> = p.members.iter().map(|m| m.display_name()).collect();
        let _ = writeln!(out, "Members:  {}", names.join(", "));
    }
    let _ = writeln!(
        out,
        "Progress: {}% ({}/{} tasks)",
        view.progress, p.completed_tasks, p.total_tasks
    );

    for (status, tasks) in &view.tasks_by_status {
        let _ = writeln!(out, "\n{} ({})", status.label(), tasks.len());
        if !tasks.is_empty() {
            out.push_str(&render_task_table(tasks));
        }
    }

    if !view.candidates.is_empty() {
        out.push_str("\nCan be added as members\n");
        out.push_str(&render_user_table(&view.candidates));
    }
    out
}

pub fn render_task_detail(task: &Task) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", task.title, task.id);
    let _ = writeln!(out, "Status:   {}", format_status_label(task.status.as_deref()));
    let _ = writeln!(out, "Priority: {}", task.priority);
    let overdue = if task.is_overdue() { " (Overdue)" } else { "" };
    let _ = writeln!(out, "Due:      {}{}", format_date(task.due_date, "No due date"), overdue);
    if let Some(p) = task.progress_percentage {
        let _ = writeln!(out, "Progress: {p}%");
    }
    if let Some(name) = &task.project_name {
        let _ = match task.project_id {
            Some(id) => writeln!(out, "Project:  {name} [{id}]"),
            None => writeln!(out, "Project:  {name}"),
        };
    }
    let assignee = task
        .assignee
        .as_ref()
        .map(|a| a.display_name().to_string())
        .unwrap_or_else(|| "Unassigned".to_string());
    let _ = writeln!(out, "Assignee: {assignee}");
    if let Some(desc) = task.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "\n{desc}");
    }
    out
}
