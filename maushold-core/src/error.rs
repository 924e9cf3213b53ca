//! Error taxonomy for collaborator calls and client-side state machines.
use thiserror::Error;

use crate::model::{PlayerId, RosterEntryId};

/// A response parsed as JSON but broke the expected schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity}.{field}: {problem}")]
pub struct SchemaViolation {
    pub entity: &'static str,
    pub field: &'static str,
    pub problem: String,
}

impl SchemaViolation {
    #[must_use]
    pub fn new(entity: &'static str, field: &'static str, problem: impl Into<String>) -> Self {
        Self {
            entity,
            field,
            problem: problem.into(),
        }
    }
}

/// Failure raised by the platform HTTP primitive before any status was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("schema violation: {0}")]
    Schema(#[from] SchemaViolation),
}

impl ApiError {
    /// Short message suitable for an alert dialog.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { status, body } if !body.trim().is_empty() => {
                format!("{} ({status})", body.trim())
            }
            Self::Status { status, .. } => format!("Request failed with status {status}"),
            Self::Transport(err) => err.to_string(),
            Self::Decode(_) | Self::Schema(_) => {
                String::from("The server returned an unexpected response")
            }
        }
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("select your own monster first")]
    MissingOwnMonster,
    #[error("select an opponent first")]
    MissingOpponent,
    #[error("select the opponent's monster first")]
    MissingOpponentMonster,
    #[error("a battle submission is already in flight")]
    SubmissionInFlight,
    #[error("player {0} cannot battle themselves")]
    SelfOpponent(PlayerId),
    #[error("monster {0} is not on the selected opponent's roster")]
    NotOnOpponentRoster(RosterEntryId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("no active player is selected")]
    NoActivePlayer,
    #[error("no battle has completed yet")]
    NoBattleResult,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage error: {0}")]
    Storage(String),
    #[error("session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure of a multi-step user workflow.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid input: {0}")]
    Invalid(#[from] SchemaViolation),
    #[error("player '{0}' not found")]
    PlayerNotFound(String),
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("battle was not created: {0}")]
    BattleRejected(String),
}

impl WorkflowError {
    /// Message shown in the alert banner.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            Self::Invalid(violation) => violation.problem.clone(),
            Self::BattleRejected(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_body() {
        let err = ApiError::Status {
            status: 409,
            body: String::from("username already taken\n"),
        };
        assert_eq!(err.user_message(), "username already taken (409)");
        assert_eq!(err.status(), Some(409));

        let bare = ApiError::Status {
            status: 500,
            body: String::new(),
        };
        assert_eq!(bare.user_message(), "Request failed with status 500");
    }

    #[test]
    fn schema_violation_formats_path() {
        let violation = SchemaViolation::new("Player", "username", "must not be empty");
        assert_eq!(violation.to_string(), "Player.username: must not be empty");
        let err = ApiError::from(violation);
        assert!(err.status().is_none());
        assert_eq!(
            err.user_message(),
            "The server returned an unexpected response"
        );
    }
}
