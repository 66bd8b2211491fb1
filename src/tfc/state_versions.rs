//! State-version operations: fetching the current version, downloading the
//! raw document, and creating a new version on a workspace.

use reqwest::StatusCode;

use super::client::TfcClient;
use super::errors::TfcError;
use super::types::{
    CreateStateVersion, CurrentStateVersion, Document, Resource, StateVersionAttributes, Workspace,
};

impl TfcClient {
    /// Fetch the current state version of a workspace: its serial and the
    /// hosted download URL for the raw document.
    pub async fn current_state_version(
        &self,
        workspace: &Workspace,
    ) -> Result<CurrentStateVersion, TfcError> {
        let path = format!("/workspaces/{}/current-state-version", workspace.id);
        match self
            .get::<Document<Resource<StateVersionAttributes>>>(&path, &[])
            .await
        {
            Ok(document) => {
                let download_url = document
                    .data
                    .attributes
                    .hosted_state_download_url
                    .ok_or_else(|| TfcError::NoCurrentState {
                        workspace: workspace.name.clone(),
                    })?;
                Ok(CurrentStateVersion {
                    serial: document.data.attributes.serial,
                    download_url,
                })
            }
            Err(TfcError::Api { status, .. }) if status == StatusCode::NOT_FOUND => {
                Err(TfcError::NoCurrentState {
                    workspace: workspace.name.clone(),
                })
            }
            Err(error) => Err(error),
        }
    }

    /// Download the raw state document over an authenticated request.
    pub async fn download_state(&self, url: &str) -> Result<Vec<u8>, TfcError> {
        self.get_bytes(url).await
    }

    /// Submit a new state version carrying the serial, MD5 digest, and
    /// base64-encoded document. The workspace must already be locked.
    pub async fn create_state_version(
        &self,
        workspace_id: &str,
        serial: u64,
        md5: &str,
        state: &str,
    ) -> Result<(), TfcError> {
        let payload = CreateStateVersion::new(serial, md5, state);
        self.post_json(&format!("/workspaces/{workspace_id}/state-versions"), &payload)
            .await
    }
}
