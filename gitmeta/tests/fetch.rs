mod common;

use common::{mount_json, start, USER_AGENT};
use gitmeta::github::{API_VERSION, GITHUB_JSON};
use gitmeta::FetchError;
use serde_json::{json, Value};
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn sends_github_headers_with_token() {
    let (server, client) = start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r"))
        .and(header("accept", GITHUB_JSON))
        .and(header("x-github-api-version", API_VERSION))
        .and(header("user-agent", USER_AGENT))
        .and(header("authorization", "Bearer ghp_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "full_name": "o/r" })))
        .expect(1)
        .mount(&server)
        .await;

    let headers = client.headers(Some("  ghp_secret  ")).unwrap();
    let body: Value = client.fetch_json("/repos/o/r", &headers, &[]).await.unwrap();

    assert_eq!(body["full_name"], "o/r");
}

#[tokio::test]
async fn blank_token_sends_no_authorization() {
    let (server, client) = start().await;
    mount_json(&server, "/repos/o/r", json!({ "full_name": "o/r" })).await;

    let headers = client.headers(Some("   ")).unwrap();
    let _: Value = client.fetch_json("/repos/o/r", &headers, &[]).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn forbidden_is_rate_limit_with_reset() {
    let (server, client) = start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-reset", "1700000000")
                .insert_header("x-ratelimit-remaining", "0")
                .set_body_string("API rate limit exceeded"),
        )
        .mount(&server)
        .await;

    let headers = client.headers(None).unwrap();
    let error = client
        .fetch_json::<Value>("/repos/o/r", &headers, &[])
        .await
        .unwrap_err();

    assert!(error.is_rate_limit());
    assert_eq!(error.reset_at(), Some(1_700_000_000_000));
    assert_eq!(
        error.to_string(),
        "GitHub rate limit hit (403). Reset at 2023-11-14T22:13:20.000Z. \
         Body: API rate limit exceeded"
    );
}

#[tokio::test]
async fn other_status_is_http_error() {
    let (server, client) = start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r"))
        .respond_with(ResponseTemplate::new(422).set_body_string("Validation Failed"))
        .mount(&server)
        .await;

    let headers = client.headers(None).unwrap();
    let error = client
        .fetch_json::<Value>("/repos/o/r", &headers, &[])
        .await
        .unwrap_err();

    match error {
        FetchError::Http { status, url, body } => {
            assert_eq!(status, 422);
            assert_eq!(url, format!("{}/repos/o/r", server.uri()));
            assert_eq!(body, "Validation Failed");
        }
        other => panic!("expected http error, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_requests_are_sent_once() {
    for status in [502, 429] {
        let (server, client) = start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r"))
            .respond_with(ResponseTemplate::new(status).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let headers = client.headers(None).unwrap();
        let error = client
            .fetch_json::<Value>("/repos/o/r", &headers, &[])
            .await
            .unwrap_err();

        assert!(
            matches!(error, FetchError::Http { status: s, .. } if s == status),
            "status {status}: {error:?}"
        );
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1, "status {status}");
    }
}

#[tokio::test]
async fn validate_token_against_rate_limit_endpoint() {
    let (server, client) = start().await;
    Mock::given(method("GET"))
        .and(path("/rate_limit"))
        .and(header("authorization", "Bearer ghp_good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "resources": {} })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rate_limit"))
        .and(header("authorization", "Bearer ghp_limited"))
        .respond_with(ResponseTemplate::new(403).insert_header("x-oauth-scopes", "repo"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rate_limit"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    assert!(client.validate_token("ghp_good").await.unwrap());
    assert!(client.validate_token("ghp_limited").await.unwrap());
    assert!(!client.validate_token("ghp_bad").await.unwrap());
}
