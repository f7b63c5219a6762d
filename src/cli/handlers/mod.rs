mod auth;
mod projects;
mod tasks;

use std::error::Error;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::api::{ApiClient, ApiError};
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::session_store::SessionStore;
use crate::model::config::ClientConfig;
use crate::model::status::{DataIntegrityError, ProjectStatus, StatusEnum, TaskStatus};
use crate::model::timestamp::parse_timestamp;
use crate::views::{DashboardView, ProfileView, ViewError};

pub type CmdResult = Result<(), Box<dyn Error>>;

/// Everything a command needs, built once per invocation.
///
/// The session is read from the store here and handed to the API client;
/// nothing below this point looks it up again.
pub struct Context {
    pub config: ClientConfig,
    pub store: SessionStore,
    pub client: ApiClient,
    pub json: bool,
}

impl Context {
    pub fn load(api_url: Option<&str>, json: bool) -> Result<Self, Box<dyn Error>> {
        let mut config = config_io::read_config()?;
        if let Some(url) = api_url {
            config.api.base_url = url.to_string();
        }
        let store = SessionStore::default_location();
        let session = store.load();
        let client = ApiClient::new(&config.api, session)?;
        Ok(Context {
            config,
            store,
            client,
            json,
        })
    }

    /// Fail early when no session is stored.
    fn require_session(&self) -> Result<(), ApiError> {
        match self.client.session() {
            Some(_) => Ok(()),
            None => Err(ApiError::Unauthorized),
        }
    }

    /// Print `value` as JSON or run the text renderer
    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce(&T) -> String) -> CmdResult {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            print!("{}", text(value));
        }
        Ok(())
    }

    fn emit_message(&self, message: String) -> CmdResult {
        print_message(self.json, message)
    }
}

fn print_message(json: bool, message: String) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(&message_json(message))?);
    } else {
        println!("{}", message);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub async fn dispatch(cli: Cli) -> CmdResult {
    // Signing out only touches the session file; a broken config or URL
    // must not keep the token on disk.
    if let Commands::Logout = cli.command {
        return auth::cmd_logout(&SessionStore::default_location(), cli.json);
    }
    let ctx = Context::load(cli.api_url.as_deref(), cli.json)?;

    match cli.command {
        // Auth (no session needed)
        Commands::Login(args) => auth::cmd_login(&ctx, args).await,
        Commands::Logout => auth::cmd_logout(&ctx.store, ctx.json),
        Commands::Register(args) => auth::cmd_register(&ctx, args).await,

        // Views
        Commands::Whoami => cmd_whoami(&ctx).await,
        Commands::Dashboard => cmd_dashboard(&ctx).await,
        Commands::Tasks(args) => tasks::cmd_tasks(&ctx, args).await,
        Commands::Projects(args) => projects::cmd_projects(&ctx, args).await,
        Commands::Users => cmd_users(&ctx).await,

        // Entity commands
        Commands::Task(cmd) => tasks::cmd_task(&ctx, cmd.action).await,
        Commands::Project(cmd) => projects::cmd_project(&ctx, cmd.action).await,
    }
}

/// True if `err` (or an error it wraps) is a rejected or missing session
pub fn is_unauthorized(err: &(dyn Error + 'static)) -> bool {
    let mut current: Option<&(dyn Error + 'static)> = Some(err);
    while let Some(e) = current {
        if let Some(api) = e.downcast_ref::<ApiError>() {
            if api.is_unauthorized() {
                return true;
            }
        }
        if let Some(view) = e.downcast_ref::<ViewError>() {
            if view.is_unauthorized() {
                return true;
            }
        }
        current = e.source();
    }
    false
}

/// Drop the stored session after the backend rejected it.
pub fn expire_session() {
    if let Err(e) = SessionStore::default_location().clear() {
        eprintln!("warning: {}", e);
    }
}

// ---------------------------------------------------------------------------
// Argument parsing helpers
// ---------------------------------------------------------------------------

/// Accept `in_progress`, `in-progress` or `IN_PROGRESS` from the command line.
fn parse_status<E: StatusEnum>(s: &str) -> Result<E, String> {
    let token = s.trim().replace('-', "_").to_uppercase();
    E::from_token(&token).map_err(|e: DataIntegrityError| {
        let valid: Vec<&str> = E::ALL.iter().map(|s| s.token()).collect();
        format!("{} (expected one of {})", e, valid.join(", "))
    })
}

fn parse_task_status(s: &str) -> Result<TaskStatus, String> {
    parse_status(s)
}

fn parse_project_status(s: &str) -> Result<ProjectStatus, String> {
    parse_status(s)
}

fn parse_date(s: &str) -> Result<NaiveDateTime, String> {
    parse_timestamp(s).ok_or_else(|| {
        format!(
            "invalid date '{}' (expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)",
            s
        )
    })
}

// ---------------------------------------------------------------------------
// View commands
// ---------------------------------------------------------------------------

async fn cmd_dashboard(ctx: &Context) -> CmdResult {
    ctx.require_session()?;
    let view = DashboardView::load(&ctx.client, ctx.config.dashboard).await?;
    ctx.emit(&view, render_dashboard)
}

async fn cmd_whoami(ctx: &Context) -> CmdResult {
    ctx.require_session()?;
    let view = ProfileView::load(&ctx.client).await?;
    ctx.emit(&view, render_profile)
}

async fn cmd_users(ctx: &Context) -> CmdResult {
    ctx.require_session()?;
    let users = ctx.client.all_users().await?;
    ctx.emit(&users, |u| render_user_table(u))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_is_forgiving_on_input() {
        assert_eq!(parse_task_status("in-progress"), Ok(TaskStatus::InProgress));
        assert_eq!(parse_task_status("done"), Ok(TaskStatus::Done));
        assert_eq!(parse_project_status("on_hold"), Ok(ProjectStatus::OnHold));
        let err = parse_task_status("archived").unwrap_err();
        assert!(err.contains("TODO, IN_PROGRESS, REVIEW, DONE, BLOCKED"));
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2025-05-01").is_ok());
        assert!(parse_date("May 1st").is_err());
    }

    #[test]
    fn test_is_unauthorized_sees_through_view_errors() {
        let err: Box<dyn Error> = Box::new(ViewError::Api(ApiError::Unauthorized));
        assert!(is_unauthorized(err.as_ref()));

        let err: Box<dyn Error> = Box::new(ApiError::Unauthorized);
        assert!(is_unauthorized(err.as_ref()));

        let err: Box<dyn Error> = Box::new(ApiError::Status {
            status: 500,
            message: "boom".into(),
        });
        assert!(!is_unauthorized(err.as_ref()));

        let err: Box<dyn Error> = Box::new(ViewError::Integrity(DataIntegrityError::MissingStatus {
            kind: "task",
        }));
        assert!(!is_unauthorized(err.as_ref()));
    }
}
