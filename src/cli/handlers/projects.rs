use crate::api::requests::ProjectRequest;
use crate::cli::commands::{ProjectAction, ProjectCreateArgs, ProjectEditArgs, ProjectsArgs};
use crate::cli::output::{render_project_detail, render_project_table};
use crate::model::project::Project;
use crate::views::ProjectDetailView;

use super::{CmdResult, Context, parse_date, parse_project_status};

pub(super) async fn cmd_projects(ctx: &Context, args: ProjectsArgs) -> CmdResult {
    ctx.require_session()?;
    let projects = if args.all {
        ctx.client.all_projects().await?
    } else {
        ctx.client.current_user_projects().await?
    };
    ctx.emit(&projects, |p| render_project_table(p))
}

pub(super) async fn cmd_project(ctx: &Context, action: ProjectAction) -> CmdResult {
    ctx.require_session()?;
    match action {
        ProjectAction::Show { id } => {
            let view = ProjectDetailView::load(&ctx.client, id).await?;
            ctx.emit(&view, render_project_detail)
        }
        ProjectAction::Create(args) => cmd_create(ctx, args).await,
        ProjectAction::Edit(args) => cmd_edit(ctx, args).await,
        ProjectAction::Delete { id } => {
            ctx.client.delete_project(id).await?;
            ctx.emit_message(format!("Deleted project {}", id))
        }
        ProjectAction::AddMember { id, user_id } => {
            let project = ctx.client.add_member(id, user_id).await?;
            emit_members(ctx, &project)
        }
        ProjectAction::RemoveMember { id, user_id } => {
            let project = ctx.client.remove_member(id, user_id).await?;
            emit_members(ctx, &project)
        }
    }
}

fn emit_members(ctx: &Context, project: &Project) -> CmdResult {
    ctx.emit(project, |p| {
        let names: Vec<&str> = p.members.iter().map(|m| m.display_name()).collect();
        if names.is_empty() {
            format!("{} has no members\n", p.name)
        } else {
            format!("{} members: {}\n", p.name, names.join(", "))
        }
    })
}

async fn cmd_create(ctx: &Context, args: ProjectCreateArgs) -> CmdResult {
    let start = match &args.start {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().naive_local(),
    };
    let mut request = ProjectRequest::new(args.name, start);
    request.description = args.description;
    request.member_ids = args.members;
    if let Some(due) = &args.due {
        request.due_date = Some(parse_date(due)?);
    }
    if let Some(status) = &args.status {
        request.status = Some(parse_project_status(status)?);
    }

    let project = ctx.client.create_project(&request).await?;
    ctx.emit(&project, |p| format!("Created project {} [{}]\n", p.name, p.id))
}

/// Fetch, overlay the given fields, and replace.
async fn cmd_edit(ctx: &Context, args: ProjectEditArgs) -> CmdResult {
    let current = ctx.client.project_by_id(args.id).await?;
    let mut request = ProjectRequest::from_existing(&current)?;

    if let Some(name) = args.name {
        request.name = name;
    }
    if let Some(description) = args.description {
        request.description = Some(description);
    }
    if let Some(start) = &args.start {
        request.start_date = Some(parse_date(start)?);
    }
    if args.clear_due {
        request.due_date = None;
    } else if let Some(due) = &args.due {
        request.due_date = Some(parse_date(due)?);
    }
    if let Some(status) = &args.status {
        request.status = Some(parse_project_status(status)?);
    }

    let project = ctx.client.update_project(args.id, &request).await?;
    ctx.emit(&project, |p| format!("Updated project {} [{}]\n", p.name, p.id))
}
