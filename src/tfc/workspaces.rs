//! Workspace operations: name resolution, lock management, and listing by
//! project.

use reqwest::StatusCode;
use tracing::debug;

use super::client::TfcClient;
use super::errors::TfcError;
use super::types::{Collection, Document, LockPayload, Resource, Workspace, WorkspaceAttributes};

const PAGE_SIZE: &str = "100";

impl TfcClient {
    /// Resolve a workspace name to its id and lock state.
    pub async fn show_workspace(&self, name: &str) -> Result<Workspace, TfcError> {
        let path = format!("/organizations/{}/workspaces/{name}", self.organization());
        match self
            .get::<Document<Resource<WorkspaceAttributes>>>(&path, &[])
            .await
        {
            Ok(document) => Ok(document.data.into()),
            Err(TfcError::Api { status, .. }) if status == StatusCode::NOT_FOUND => {
                Err(TfcError::WorkspaceNotFound {
                    name: name.to_string(),
                    organization: self.organization().to_string(),
                })
            }
            Err(error) => Err(error),
        }
    }

    /// Lock a workspace against concurrent state changes.
    pub async fn lock_workspace(&self, workspace_id: &str, reason: &str) -> Result<(), TfcError> {
        debug!(workspace_id, reason, "locking workspace");
        self.post_json(
            &format!("/workspaces/{workspace_id}/actions/lock"),
            &LockPayload { reason },
        )
        .await
    }

    /// Release a lock held by this token.
    pub async fn unlock_workspace(&self, workspace_id: &str) -> Result<(), TfcError> {
        debug!(workspace_id, "unlocking workspace");
        self.post_empty(&format!("/workspaces/{workspace_id}/actions/unlock"))
            .await
    }

    /// Clear a workspace lock without verifying the caller holds it.
    /// Administrative operation; no confirmation happens at this layer.
    pub async fn force_unlock_workspace(&self, workspace_id: &str) -> Result<(), TfcError> {
        debug!(workspace_id, "force-unlocking workspace");
        self.post_empty(&format!("/workspaces/{workspace_id}/actions/force-unlock"))
            .await
    }

    /// List every workspace belonging to a project, following pagination
    /// until the API reports no next page.
    pub async fn list_project_workspaces(
        &self,
        project_id: &str,
    ) -> Result<Vec<Workspace>, TfcError> {
        let path = format!("/organizations/{}/workspaces", self.organization());
        let mut workspaces = Vec::new();
        let mut page: u32 = 1;
        loop {
            let page_number = page.to_string();
            let collection: Collection<Resource<WorkspaceAttributes>> = self
                .get(
                    &path,
                    &[
                        ("filter[project][id]", project_id),
                        ("page[number]", &page_number),
                        ("page[size]", PAGE_SIZE),
                    ],
                )
                .await?;
            workspaces.extend(collection.data.into_iter().map(Workspace::from));
            match collection
                .meta
                .and_then(|meta| meta.pagination)
                .and_then(|pagination| pagination.next_page)
            {
                Some(next) => page = next,
                None => break,
            }
        }
        debug!(project_id, count = workspaces.len(), "listed project workspaces");
        Ok(workspaces)
    }
}
