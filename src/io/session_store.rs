use std::fs;
use std::path::{Path, PathBuf};

use crate::io::config_io;
use crate::model::user::Session;

/// Error type for persisting the session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not remove {path}: {source}")]
    RemoveError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not serialize session: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// On-disk home of the signed-in session.
///
/// The store only persists the session between invocations; the loaded
/// value is handed to the API client explicitly.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore { path: path.into() }
    }

    /// The store at `$XDG_CONFIG_HOME/taskdeck/session.json`
    pub fn default_location() -> Self {
        SessionStore::new(config_io::config_dir().join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session.
    /// A missing file means signed out. An unreadable or corrupted file is
    /// reported and treated as signed out.
    pub fn load(&self) -> Option<Session> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("could not read {}: {}", self.path.display(), e);
                return None;
            }
        };
        match serde_json::from_str::<Session>(&content) {
            Ok(session) => Some(session),
            Err(e) => {
                log::warn!(
                    "could not parse {} ({}); sign in again",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| SessionError::WriteError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json).map_err(|e| SessionError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;
        restrict_permissions(&self.path);
        log::debug!("saved session for {} to {}", session.username, self.path.display());
        Ok(())
    }

    /// Remove the stored session. Clearing an absent session is not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::debug!("cleared session at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::RemoveError {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

/// The session file holds a bearer token; keep it owner-readable only.
#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        log::warn!("could not restrict permissions on {}: {}", path.display(), e);
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}
