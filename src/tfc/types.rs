//! JSON:API envelopes and resource attributes for the slice of the
//! Terraform Cloud v2 API these tools consume.

use serde::{Deserialize, Serialize};

/// Single-resource envelope: `{"data": {...}}`.
#[derive(Debug, Deserialize)]
pub struct Document<T> {
    pub data: T,
}

/// Multi-resource envelope with optional pagination metadata.
#[derive(Debug, Deserialize)]
pub struct Collection<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Deserialize)]
pub struct Resource<A> {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: A,
}

#[derive(Debug, Deserialize)]
pub struct Meta {
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(rename = "next-page")]
    pub next_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct WorkspaceAttributes {
    pub name: String,
    #[serde(default)]
    pub locked: bool,
}

/// A workspace as resolved through the API: opaque id plus the two
/// attributes the procedures care about.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    pub locked: bool,
}

impl From<Resource<WorkspaceAttributes>> for Workspace {
    fn from(resource: Resource<WorkspaceAttributes>) -> Self {
        Self {
            id: resource.id,
            name: resource.attributes.name,
            locked: resource.attributes.locked,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StateVersionAttributes {
    pub serial: u64,
    #[serde(rename = "hosted-state-download-url")]
    pub hosted_state_download_url: Option<String>,
}

/// The current state version of a workspace, reduced to what migration
/// needs: its serial and where to download the raw document.
#[derive(Debug, Clone)]
pub struct CurrentStateVersion {
    pub serial: u64,
    pub download_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ProjectAttributes {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Project {
    pub id: String,
    pub name: String,
}

impl From<Resource<ProjectAttributes>> for Project {
    fn from(resource: Resource<ProjectAttributes>) -> Self {
        Self {
            id: resource.id,
            name: resource.attributes.name,
        }
    }
}

/// Body for `POST /workspaces/{id}/actions/lock`.
#[derive(Debug, Serialize)]
pub struct LockPayload<'a> {
    pub reason: &'a str,
}

/// Body for `POST /workspaces/{id}/state-versions`: the base64-encoded
/// state document plus its serial and MD5 digest.
#[derive(Debug, Serialize)]
pub struct CreateStateVersion<'a> {
    pub data: CreateStateVersionData<'a>,
}

#[derive(Debug, Serialize)]
pub struct CreateStateVersionData<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub attributes: CreateStateVersionAttributes<'a>,
}

#[derive(Debug, Serialize)]
pub struct CreateStateVersionAttributes<'a> {
    pub serial: u64,
    pub md5: &'a str,
    pub state: &'a str,
}

impl<'a> CreateStateVersion<'a> {
    pub fn new(serial: u64, md5: &'a str, state: &'a str) -> Self {
        Self {
            data: CreateStateVersionData {
                kind: "state-versions",
                attributes: CreateStateVersionAttributes { serial, md5, state },
            },
        }
    }
}

/// JSON:API error body: `{"errors": [{"status", "title", "detail"}]}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrors {
    #[serde(default)]
    pub errors: Vec<ApiErrorObject>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorObject {
    pub title: Option<String>,
    pub detail: Option<String>,
}

impl ApiErrors {
    /// One-line summary of the first error object, for display.
    pub fn summary(&self) -> Option<String> {
        let first = self.errors.first()?;
        match (&first.title, &first.detail) {
            (Some(title), Some(detail)) => Some(format!("{title}: {detail}")),
            (Some(title), None) => Some(title.clone()),
            (None, Some(detail)) => Some(detail.clone()),
            (None, None) => None,
        }
    }
}
