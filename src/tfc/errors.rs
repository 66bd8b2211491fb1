use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the Terraform Cloud API client and the procedures
/// built on it. Every failure is fatal to the running command; there is no
/// retry layer.
#[derive(Debug, Error)]
pub enum TfcError {
    #[error("workspace {name:?} was not found in organization {organization:?}")]
    WorkspaceNotFound { name: String, organization: String },

    #[error("workspace {workspace:?} has no current state version")]
    NoCurrentState { workspace: String },

    #[error("project {name:?} was not found")]
    ProjectNotFound { name: String },

    #[error("project name {name:?} matched {count} projects, expected exactly one")]
    AmbiguousProject { name: String, count: usize },

    #[error("nothing to unlock: set TFC_PROJECT or TFC_WORKSPACES")]
    EmptyUnlockScope,

    #[error("Terraform Cloud API returned HTTP {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("request to Terraform Cloud failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("TFC_TOKEN is not a valid header value")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    #[error("state document is not valid JSON: {0}")]
    MalformedState(#[from] serde_json::Error),

    #[error("state document has no serial number")]
    MissingSerial,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
