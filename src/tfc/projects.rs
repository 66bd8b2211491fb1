//! Project lookup. The unlock procedure needs exactly one project per
//! name; zero or multiple matches are reported as errors rather than
//! silently taking the first result.

use super::client::TfcClient;
use super::errors::TfcError;
use super::types::{Collection, Project, ProjectAttributes, Resource};

impl TfcClient {
    /// Resolve a project name to its id via an exact-name filter.
    pub async fn find_project(&self, name: &str) -> Result<Project, TfcError> {
        let path = format!("/organizations/{}/projects", self.organization());
        let collection: Collection<Resource<ProjectAttributes>> =
            self.get(&path, &[("filter[names]", name)]).await?;

        // The filter is exact server-side, but double-check the names so a
        // permissive server cannot widen the match.
        let mut matches: Vec<Project> = collection
            .data
            .into_iter()
            .filter(|resource| resource.attributes.name == name)
            .map(Project::from)
            .collect();

        match matches.len() {
            0 => Err(TfcError::ProjectNotFound {
                name: name.to_string(),
            }),
            1 => Ok(matches.remove(0)),
            count => Err(TfcError::AmbiguousProject {
                name: name.to_string(),
                count,
            }),
        }
    }
}
