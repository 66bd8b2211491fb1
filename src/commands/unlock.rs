//! Bulk unlock: find every locked workspace in scope and force-unlock it.
//! Force-unlock bypasses lock ownership, so this is an administrative
//! operation with no confirmation prompt.

use tracing::debug;

use crate::tfc::types::Workspace;
use crate::tfc::{TfcClient, TfcError};

/// Which workspaces the unlock procedure targets. A project name takes
/// priority over the explicit list when both are set.
#[derive(Debug, Clone, Default)]
pub struct UnlockScope {
    pub project: Option<String>,
    pub workspaces: Vec<String>,
}

impl UnlockScope {
    pub fn is_empty(&self) -> bool {
        self.project.as_deref().map_or(true, str::is_empty) && self.workspaces.is_empty()
    }
}

/// Force-unlock every locked workspace in scope, one progress line per
/// workspace. Returns the workspaces that were unlocked.
pub async fn run(client: &TfcClient, scope: &UnlockScope) -> Result<Vec<Workspace>, TfcError> {
    if scope.is_empty() {
        return Err(TfcError::EmptyUnlockScope);
    }

    let candidates = match scope.project.as_deref().filter(|name| !name.is_empty()) {
        Some(project_name) => {
            let project = client.find_project(project_name).await?;
            debug!(project = %project.name, id = %project.id, "resolved project");
            client.list_project_workspaces(&project.id).await?
        }
        None => {
            let mut resolved = Vec::with_capacity(scope.workspaces.len());
            for name in &scope.workspaces {
                resolved.push(client.show_workspace(name).await?);
            }
            resolved
        }
    };

    let locked: Vec<Workspace> = candidates
        .into_iter()
        .filter(|workspace| workspace.locked)
        .collect();

    for workspace in &locked {
        println!("Unlocking workspace: {}", workspace.name);
        client.force_unlock_workspace(&workspace.id).await?;
    }
    println!("Unlocked {} workspace(s)", locked.len());

    Ok(locked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_is_empty_without_project_or_workspaces() {
        assert!(UnlockScope::default().is_empty());
        assert!(UnlockScope {
            project: Some(String::new()),
            workspaces: Vec::new(),
        }
        .is_empty());
    }

    #[test]
    fn either_input_makes_the_scope_non_empty() {
        assert!(!UnlockScope {
            project: Some("platform".to_string()),
            workspaces: Vec::new(),
        }
        .is_empty());
        assert!(!UnlockScope {
            project: None,
            workspaces: vec!["app".to_string()],
        }
        .is_empty());
    }
}
