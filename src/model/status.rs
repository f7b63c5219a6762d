use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// A status token that is outside the closed set the client was built
/// against. Raised instead of silently mis-tallying a histogram.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataIntegrityError {
    #[error("unrecognized {kind} status token: {token:?}")]
    UnknownStatus { kind: &'static str, token: String },
    #[error("{kind} has no status")]
    MissingStatus { kind: &'static str },
}

/// A closed status enum whose wire tokens are fixed by the backend.
///
/// `ALL` is the declared order; histograms and chart legends follow it.
pub trait StatusEnum: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Entity name used in error messages ("task", "project").
    const KIND: &'static str;
    const ALL: &'static [Self];

    /// The exact wire token, e.g. `IN_PROGRESS`.
    fn token(self) -> &'static str;

    /// Human label for chart legends, e.g. `In Progress`.
    fn label(self) -> &'static str;

    /// Resolve a wire token. Exact match only; case is never normalized.
    fn from_token(token: &str) -> Result<Self, DataIntegrityError> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.token() == token)
            .ok_or_else(|| DataIntegrityError::UnknownStatus {
                kind: Self::KIND,
                token: token.to_string(),
            })
    }

    /// Resolve an optional wire token. A missing status is not a member of
    /// the enum and is rejected the same way as an unknown token.
    fn resolve(token: Option<&str>) -> Result<Self, DataIntegrityError> {
        match token {
            Some(t) => Self::from_token(t),
            None => Err(DataIntegrityError::MissingStatus { kind: Self::KIND }),
        }
    }
}

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    NotStarted,
    InProgress,
    OnHold,
    Completed,
    Cancelled,
}

impl StatusEnum for ProjectStatus {
    const KIND: &'static str = "project";
    const ALL: &'static [Self] = &[
        ProjectStatus::NotStarted,
        ProjectStatus::InProgress,
        ProjectStatus::OnHold,
        ProjectStatus::Completed,
        ProjectStatus::Cancelled,
    ];

    fn token(self) -> &'static str {
        match self {
            ProjectStatus::NotStarted => "NOT_STARTED",
            ProjectStatus::InProgress => "IN_PROGRESS",
            ProjectStatus::OnHold => "ON_HOLD",
            ProjectStatus::Completed => "COMPLETED",
            ProjectStatus::Cancelled => "CANCELLED",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ProjectStatus::NotStarted => "Not Started",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::OnHold => "On Hold",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Cancelled => "Cancelled",
        }
    }
}

/// Task workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
    Blocked,
}

impl StatusEnum for TaskStatus {
    const KIND: &'static str = "task";
    const ALL: &'static [Self] = &[
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Done,
        TaskStatus::Blocked,
    ];

    fn token(self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Review => "REVIEW",
            TaskStatus::Done => "DONE",
            TaskStatus::Blocked => "BLOCKED",
        }
    }

    fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Review => "Review",
            TaskStatus::Done => "Done",
            TaskStatus::Blocked => "Blocked",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_round_trip_through_from_token() {
        for s in TaskStatus::ALL {
            assert_eq!(TaskStatus::from_token(s.token()), Ok(*s));
        }
        for s in ProjectStatus::ALL {
            assert_eq!(ProjectStatus::from_token(s.token()), Ok(*s));
        }
    }

    #[test]
    fn test_from_token_is_case_sensitive() {
        let err = TaskStatus::from_token("done").unwrap_err();
        assert_eq!(
            err,
            DataIntegrityError::UnknownStatus {
                kind: "task",
                token: "done".into()
            }
        );
    }

    #[test]
    fn test_serde_uses_wire_tokens() {
        let json = serde_json::to_string(&ProjectStatus::NotStarted).unwrap();
        assert_eq!(json, "\"NOT_STARTED\"");
        let parsed: TaskStatus = serde_json::from_str("\"IN_PROGRESS\"").unwrap();
        assert_eq!(parsed, TaskStatus::InProgress);
    }

    #[test]
    fn test_resolve_missing() {
        assert_eq!(
            ProjectStatus::resolve(None),
            Err(DataIntegrityError::MissingStatus { kind: "project" })
        );
    }
}
