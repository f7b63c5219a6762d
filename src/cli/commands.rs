use clap::{Args, Parser, Subcommand};

use crate::model::user::EntityId;

#[derive(Parser)]
#[command(name = "td", about = concat!("taskdeck v", env!("CARGO_PKG_VERSION"), " - projects and tasks from your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Backend base URL (overrides config.toml)
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login(LoginArgs),
    /// Forget the stored session
    Logout,
    /// Create a new account
    Register(RegisterArgs),
    /// Show the signed-in user and their statistics
    Whoami,
    /// Summary counts, status charts, recent projects and upcoming tasks
    Dashboard,
    /// List tasks with search, status filter and sorting
    Tasks(TasksArgs),
    /// Work with a single task
    Task(TaskCmd),
    /// List projects
    Projects(ProjectsArgs),
    /// Work with a single project
    Project(ProjectCmd),
    /// List all users
    Users,
}

// ---------------------------------------------------------------------------
// Auth args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct LoginArgs {
    pub username: String,
    /// Password (prompted on stdin when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct RegisterArgs {
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long = "full-name")]
    pub full_name: String,
    /// Password (prompted on stdin when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TasksArgs {
    /// List every task instead of only those assigned to you
    #[arg(long)]
    pub all: bool,
    /// Case-insensitive text to find in title, description or project name
    #[arg(long, short = 's')]
    pub search: Option<String>,
    /// Status token to keep (TODO, IN_PROGRESS, REVIEW, DONE, BLOCKED) or "all"
    #[arg(long, default_value = "all")]
    pub status: String,
    /// Sort order: due, priority, status, project
    #[arg(long, default_value = "due")]
    pub sort: String,
}

#[derive(Args)]
pub struct ProjectsArgs {
    /// List every project instead of only yours
    #[arg(long)]
    pub all: bool,
}

// ---------------------------------------------------------------------------
// Task subcommands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TaskCmd {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Show task details
    Show { id: EntityId },
    /// Create a task in a project
    Create(TaskCreateArgs),
    /// Change task fields
    Edit(TaskEditArgs),
    /// Permanently delete a task
    Delete { id: EntityId },
    /// Change task status
    Status { id: EntityId, status: String },
    /// Set progress percentage (0-100)
    Progress { id: EntityId, percent: u8 },
    /// Assign a task to a user
    Assign { id: EntityId, user_id: EntityId },
}

#[derive(Args)]
pub struct TaskCreateArgs {
    /// Task title
    pub title: String,
    /// Project the task belongs to
    #[arg(long)]
    pub project: EntityId,
    #[arg(long)]
    pub description: Option<String>,
    /// Priority from 1 (low) to 5 (high)
    #[arg(long, default_value_t = 3)]
    pub priority: u8,
    /// Due date (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    #[arg(long)]
    pub due: Option<String>,
    /// Initial status (default TODO)
    #[arg(long)]
    pub status: Option<String>,
    /// User to assign
    #[arg(long)]
    pub assignee: Option<EntityId>,
}

#[derive(Args)]
pub struct TaskEditArgs {
    pub id: EntityId,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub priority: Option<u8>,
    /// Due date (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    #[arg(long, conflicts_with = "clear_due")]
    pub due: Option<String>,
    /// Remove the due date
    #[arg(long = "clear-due")]
    pub clear_due: bool,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub progress: Option<u8>,
    #[arg(long)]
    pub assignee: Option<EntityId>,
}

// ---------------------------------------------------------------------------
// Project subcommands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ProjectCmd {
    #[command(subcommand)]
    pub action: ProjectAction,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Show a project with its tasks grouped by status
    Show { id: EntityId },
    /// Create a project
    Create(ProjectCreateArgs),
    /// Change project fields
    Edit(ProjectEditArgs),
    /// Permanently delete a project
    Delete { id: EntityId },
    /// Add a user to the project's members
    AddMember { id: EntityId, user_id: EntityId },
    /// Remove a user from the project's members
    RemoveMember { id: EntityId, user_id: EntityId },
}

#[derive(Args)]
pub struct ProjectCreateArgs {
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    /// Start date (default: now)
    #[arg(long)]
    pub start: Option<String>,
    #[arg(long)]
    pub due: Option<String>,
    /// Initial status (default NOT_STARTED)
    #[arg(long)]
    pub status: Option<String>,
    /// Member user IDs (repeatable)
    #[arg(long = "member")]
    pub members: Vec<EntityId>,
}

#[derive(Args)]
pub struct ProjectEditArgs {
    pub id: EntityId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub start: Option<String>,
    #[arg(long, conflicts_with = "clear_due")]
    pub due: Option<String>,
    /// Remove the due date
    #[arg(long = "clear-due")]
    pub clear_due: bool,
    #[arg(long)]
    pub status: Option<String>,
}
