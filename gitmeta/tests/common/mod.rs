#![allow(dead_code)]

use gitmeta::GitHubClient;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USER_AGENT: &str = "gitmeta-tests";

/// Starts a mock GitHub API and a client pointed at it.
pub async fn start() -> (MockServer, GitHubClient) {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    let server = MockServer::start().await;
    let client = GitHubClient::new(&server.uri(), USER_AGENT).unwrap();
    (server, client)
}

/// Serves `body` with status 200 for GET `route`.
pub async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn api_url(server: &MockServer, route: &str) -> String {
    format!("{}{route}", server.uri())
}

pub fn user(login: &str) -> Value {
    json!({ "login": login, "id": 1, "type": "User" })
}
