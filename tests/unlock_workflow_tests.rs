//! Bulk unlock workflow tests against a mocked Terraform Cloud API.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tfc_workspace_tools::commands::unlock::{self, UnlockScope};
use tfc_workspace_tools::config::TfcConfig;
use tfc_workspace_tools::tfc::{TfcClient, TfcError};

fn test_client(server: &MockServer) -> TfcClient {
    TfcClient::new(&TfcConfig {
        token: "test-token".to_string(),
        url: server.uri(),
        organization: "test-org".to_string(),
        ssl_verify: false,
        project: None,
        workspaces: Vec::new(),
    })
    .unwrap()
}

fn project_scope(name: &str) -> UnlockScope {
    UnlockScope {
        project: Some(name.to_string()),
        workspaces: Vec::new(),
    }
}

fn workspace_json(id: &str, name: &str, locked: bool) -> serde_json::Value {
    json!({
        "id": id,
        "type": "workspaces",
        "attributes": { "name": name, "locked": locked }
    })
}

async fn mock_project_list(server: &MockServer, filter: &str, projects: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/api/v2/organizations/test-org/projects"))
        .and(query_param("filter[names]", filter))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": projects })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mock_force_unlock(server: &MockServer, workspace_id: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path(format!("/api/v2/workspaces/{workspace_id}/actions/force-unlock")))
        .respond_with(ResponseTemplate::new(200))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn force_unlocks_exactly_the_locked_subset() {
    let server = MockServer::start().await;
    mock_project_list(
        &server,
        "platform",
        vec![json!({ "id": "prj-1", "type": "projects", "attributes": { "name": "platform" } })],
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/organizations/test-org/workspaces"))
        .and(query_param("filter[project][id]", "prj-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                workspace_json("ws-a", "alpha", true),
                workspace_json("ws-b", "beta", false),
                workspace_json("ws-c", "gamma", true)
            ],
            "meta": { "pagination": { "next-page": null } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    mock_force_unlock(&server, "ws-a", 1).await;
    mock_force_unlock(&server, "ws-b", 0).await;
    mock_force_unlock(&server, "ws-c", 1).await;

    let client = test_client(&server);
    let unlocked = unlock::run(&client, &project_scope("platform")).await.unwrap();
    let names: Vec<&str> = unlocked.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "gamma"]);
}

#[tokio::test]
async fn empty_scope_fails_before_any_api_call() {
    let server = MockServer::start().await;

    let client = test_client(&server);
    let error = unlock::run(&client, &UnlockScope::default()).await.unwrap_err();
    assert!(matches!(error, TfcError::EmptyUnlockScope), "{error}");

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "no API call may be made without a scope");
}

#[tokio::test]
async fn zero_project_matches_is_an_explicit_error() {
    let server = MockServer::start().await;
    mock_project_list(&server, "ghost", Vec::new()).await;

    let client = test_client(&server);
    let error = unlock::run(&client, &project_scope("ghost")).await.unwrap_err();
    assert!(
        matches!(&error, TfcError::ProjectNotFound { name } if name == "ghost"),
        "{error}"
    );

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "nothing beyond the project lookup may run");
}

#[tokio::test]
async fn multiple_project_matches_is_an_explicit_error() {
    let server = MockServer::start().await;
    mock_project_list(
        &server,
        "platform",
        vec![
            json!({ "id": "prj-1", "type": "projects", "attributes": { "name": "platform" } }),
            json!({ "id": "prj-2", "type": "projects", "attributes": { "name": "platform" } }),
        ],
    )
    .await;

    let client = test_client(&server);
    let error = unlock::run(&client, &project_scope("platform")).await.unwrap_err();
    assert!(
        matches!(&error, TfcError::AmbiguousProject { count: 2, .. }),
        "{error}"
    );
}

#[tokio::test]
async fn explicit_workspace_names_are_resolved_individually() {
    let server = MockServer::start().await;
    for (name, id, locked) in [("alpha", "ws-a", true), ("beta", "ws-b", false)] {
        Mock::given(method("GET"))
            .and(path(format!("/api/v2/organizations/test-org/workspaces/{name}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": workspace_json(id, name, locked) })),
            )
            .expect(1)
            .mount(&server)
            .await;
    }
    mock_force_unlock(&server, "ws-a", 1).await;
    mock_force_unlock(&server, "ws-b", 0).await;

    let scope = UnlockScope {
        project: None,
        workspaces: vec!["alpha".to_string(), "beta".to_string()],
    };
    let client = test_client(&server);
    let unlocked = unlock::run(&client, &scope).await.unwrap();
    assert_eq!(unlocked.len(), 1);
    assert_eq!(unlocked[0].name, "alpha");
}

#[tokio::test]
async fn project_takes_priority_over_explicit_names() {
    let server = MockServer::start().await;
    mock_project_list(
        &server,
        "platform",
        vec![json!({ "id": "prj-1", "type": "projects", "attributes": { "name": "platform" } })],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/organizations/test-org/workspaces"))
        .and(query_param("filter[project][id]", "prj-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [workspace_json("ws-a", "alpha", true)]
        })))
        .expect(1)
        .mount(&server)
        .await;
    // The explicit name must not be looked up while a project is set.
    Mock::given(method("GET"))
        .and(path("/api/v2/organizations/test-org/workspaces/ignored"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mock_force_unlock(&server, "ws-a", 1).await;

    let scope = UnlockScope {
        project: Some("platform".to_string()),
        workspaces: vec!["ignored".to_string()],
    };
    let client = test_client(&server);
    let unlocked = unlock::run(&client, &scope).await.unwrap();
    assert_eq!(unlocked.len(), 1);
}

#[tokio::test]
async fn project_workspace_listing_follows_pagination() {
    let server = MockServer::start().await;
    mock_project_list(
        &server,
        "platform",
        vec![json!({ "id": "prj-1", "type": "projects", "attributes": { "name": "platform" } })],
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/organizations/test-org/workspaces"))
        .and(query_param("filter[project][id]", "prj-1"))
        .and(query_param("page[number]", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [workspace_json("ws-a", "alpha", true)],
            "meta": { "pagination": { "next-page": 2 } }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/organizations/test-org/workspaces"))
        .and(query_param("filter[project][id]", "prj-1"))
        .and(query_param("page[number]", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [workspace_json("ws-z", "zeta", true)],
            "meta": { "pagination": { "next-page": null } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    mock_force_unlock(&server, "ws-a", 1).await;
    mock_force_unlock(&server, "ws-z", 1).await;

    let client = test_client(&server);
    let unlocked = unlock::run(&client, &project_scope("platform")).await.unwrap();
    let names: Vec<&str> = unlocked.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
}
