pub mod config;
pub mod project;
pub mod status;
pub mod task;
pub mod timestamp;
pub mod user;

pub use config::*;
pub use project::*;
pub use status::*;
pub use task::*;
pub use user::*;
