use crate::api::requests::TaskRequest;
use crate::cli::commands::{TaskAction, TaskCreateArgs, TaskEditArgs, TasksArgs};
use crate::cli::output::{render_task_detail, render_task_list};
use crate::model::task::Task;
use crate::ops::filter::{SortKey, StatusFilter, TaskFilter};
use crate::views::{TaskListView, TaskScope};

use super::{CmdResult, Context, parse_date, parse_task_status};

pub(super) async fn cmd_tasks(ctx: &Context, args: TasksArgs) -> CmdResult {
    ctx.require_session()?;
    let sort: SortKey = args.sort.parse()?;
    let status = match args.status.parse::<StatusFilter>()? {
        StatusFilter::Only(token) => StatusFilter::Only(parse_task_status(&token)?.to_string()),
        StatusFilter::All => StatusFilter::All,
    };
    let filter = TaskFilter {
        search_term: args.search.unwrap_or_default(),
        status,
    };
    let scope = if args.all {
        TaskScope::All
    } else {
        TaskScope::Assigned
    };

    let view = TaskListView::load(&ctx.client, scope, &filter, sort).await?;
    ctx.emit(&view, render_task_list)
}

pub(super) async fn cmd_task(ctx: &Context, action: TaskAction) -> CmdResult {
    ctx.require_session()?;
    match action {
        TaskAction::Show { id } => {
            let task = ctx.client.task_by_id(id).await?;
            ctx.emit(&task, render_task_detail)
        }
        TaskAction::Create(args) => cmd_create(ctx, args).await,
        TaskAction::Edit(args) => cmd_edit(ctx, args).await,
        TaskAction::Delete { id } => {
            ctx.client.delete_task(id).await?;
            ctx.emit_message(format!("Deleted task {}", id))
        }
        TaskAction::Status { id, status } => {
            let status = parse_task_status(&status)?;
            let task = ctx.client.update_task_status(id, status).await?;
            emit_updated(ctx, &task)
        }
        TaskAction::Progress { id, percent } => {
            let task = ctx.client.update_task_progress(id, percent).await?;
            emit_updated(ctx, &task)
        }
        TaskAction::Assign { id, user_id } => {
            let task = ctx.client.assign_task(id, user_id).await?;
            emit_updated(ctx, &task)
        }
    }
}

fn emit_updated(ctx: &Context, task: &Task) -> CmdResult {
    ctx.emit(task, |t| format!("Updated task {}\n{}", t.id, render_task_detail(t)))
}

async fn cmd_create(ctx: &Context, args: TaskCreateArgs) -> CmdResult {
    let mut request = TaskRequest::new(args.title, args.project);
    request.description = args.description;
    request.priority = args.priority;
    request.assignee_id = args.assignee;
    if let Some(due) = &args.due {
        request.due_date = Some(parse_date(due)?);
    }
    if let Some(status) = &args.status {
        request.status = Some(parse_task_status(status)?);
    }

    let task = ctx.client.create_task(&request).await?;
    ctx.emit(&task, |t| format!("Created task {}\n{}", t.id, render_task_detail(t)))
}

/// Fetch, overlay the given fields, and replace.
async fn cmd_edit(ctx: &Context, args: TaskEditArgs) -> CmdResult {
    let current = ctx.client.task_by_id(args.id).await?;
    let mut request = TaskRequest::from_existing(&current)?;

    if let Some(title) = args.title {
        request.title = title;
    }
    if let Some(description) = args.description {
        request.description = Some(description);
    }
    if let Some(priority) = args.priority {
        request.priority = priority;
    }
    if args.clear_due {
        request.due_date = None;
    } else if let Some(due) = &args.due {
        request.due_date = Some(parse_date(due)?);
    }
    if let Some(status) = &args.status {
        request.status = Some(parse_task_status(status)?);
    }
    if let Some(progress) = args.progress {
        request.progress_percentage = Some(progress);
    }
    if let Some(assignee) = args.assignee {
        request.assignee_id = Some(assignee);
    }

    let task = ctx.client.update_task(args.id, &request).await?;
    emit_updated(ctx, &task)
}
