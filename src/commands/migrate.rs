//! State migration: copy the current state of one workspace into another
//! as a new state version.

use std::io::Write as _;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use md5::{Digest, Md5};
use serde_json::Value;
use tracing::debug;

use crate::tfc::{TfcClient, TfcError};

/// Reason attached to the target workspace lock while the push is running.
pub const LOCK_REASON: &str = "migrating state";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateOutcome {
    /// Confirmation was declined; no side effects beyond workspace lookup.
    Cancelled,
    /// The state version was pushed to the target with this serial.
    Migrated { serial: u64 },
}

/// Run the migration. `confirm` is consulted after both workspace names
/// resolve and before anything is downloaded or locked; the caller decides
/// whether that means a stdin prompt or an unconditional yes.
pub async fn run<F>(
    client: &TfcClient,
    source: &str,
    target: &str,
    confirm: F,
) -> Result<MigrateOutcome, TfcError>
where
    F: FnOnce(&str, &str) -> std::io::Result<bool>,
{
    let source_workspace = client.show_workspace(source).await?;
    let target_workspace = client.show_workspace(target).await?;

    if !confirm(source, target)? {
        println!("No changes have been made, exiting...");
        return Ok(MigrateOutcome::Cancelled);
    }
    println!("source: {} | target: {}", source_workspace.id, target_workspace.id);

    let current = client.current_state_version(&source_workspace).await?;
    let state = client.download_state(&current.download_url).await?;

    // Transient on-disk copy of the blob; the handle removes the file on
    // every exit path when it drops.
    let mut state_file = tempfile::Builder::new()
        .prefix(&format!("{}-", source_workspace.id))
        .suffix(".tfstate")
        .tempfile()?;
    state_file.write_all(&state)?;
    debug!(
        path = %state_file.path().display(),
        bytes = state.len(),
        "downloaded source state"
    );

    client.lock_workspace(&target_workspace.id, LOCK_REASON).await?;
    // The lock must come off whether or not the push succeeds, and a push
    // error takes precedence over an unlock error.
    let push = push_state(client, &target_workspace.id, &state).await;
    let unlock = client.unlock_workspace(&target_workspace.id).await;
    let serial = push?;
    unlock?;

    println!("Pushed state serial {serial} from {source} to {target}");
    Ok(MigrateOutcome::Migrated { serial })
}

/// Hash, encode, and submit the state document to the (already locked)
/// target workspace. Returns the serial carried by the document.
async fn push_state(
    client: &TfcClient,
    workspace_id: &str,
    state: &[u8],
) -> Result<u64, TfcError> {
    let serial = state_serial(state)?;
    let md5 = hex_md5(state);
    let encoded = BASE64.encode(state);
    client
        .create_state_version(workspace_id, serial, &md5, &encoded)
        .await?;
    Ok(serial)
}

/// The document is parsed solely to extract its serial; everything else is
/// treated as opaque bytes.
fn state_serial(state: &[u8]) -> Result<u64, TfcError> {
    let document: Value = serde_json::from_slice(state)?;
    document
        .get("serial")
        .and_then(Value::as_u64)
        .ok_or(TfcError::MissingSerial)
}

fn hex_md5(bytes: &[u8]) -> String {
    Md5::digest(bytes)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
