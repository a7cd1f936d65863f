mod common;

use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_header() -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("token"),
        HeaderValue::from_static("user-token"),
    )
}

#[tokio::test]
async fn fetch_links_sends_the_fixed_envelope() {
    let provider = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/get"))
        .and(body_partial_json(json!({
            "consumer_key": common::TEST_CONSUMER_KEY,
            "access_token": "user-token",
            "state": "unread",
            "detailType": "complete",
            "count": 5000,
            "offset": 0,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 1, "list": {} })))
        .expect(1)
        .mount(&provider)
        .await;

    let server = common::links_server(&provider.uri(), false);
    let (name, value) = token_header();
    let response = server.get("/links").add_header(name, value).await;

    response.assert_status_ok();
}

#[tokio::test]
async fn fetch_links_passes_the_provider_body_through() {
    let provider = MockServer::start().await;

    let body = r#"{"status":1,"list":{"100":{"item_id":"100","given_title":"a link"}}}"#;
    Mock::given(method("POST"))
        .and(path("/v3/get"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&provider)
        .await;

    let server = common::links_server(&provider.uri(), false);
    let (name, value) = token_header();
    let response = server.get("/links").add_header(name, value).await;

    response.assert_status_ok();
    assert_eq!(response.header(header::CONTENT_TYPE), "application/json");
    assert_eq!(response.text(), body);
}

#[tokio::test]
async fn fetch_links_forwards_an_empty_token_when_the_header_is_missing() {
    let provider = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/get"))
        .and(body_partial_json(json!({ "access_token": "" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 1, "list": {} })))
        .expect(1)
        .mount(&provider)
        .await;

    let server = common::links_server(&provider.uri(), false);
    let response = server.get("/links").await;

    response.assert_status_ok();
}

#[tokio::test]
async fn fetch_links_maps_provider_failures_to_bad_gateway() {
    let provider = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/get"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&provider)
        .await;

    let server = common::links_server(&provider.uri(), false);
    let (name, value) = token_header();
    let response = server.get("/links").add_header(name, value).await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn delete_sends_one_action_per_id_in_order() {
    let provider = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/send"))
        .and(body_partial_json(json!({
            "consumer_key": common::TEST_CONSUMER_KEY,
            "access_token": "user-token",
            "actions": [
                { "item_id": "111", "action": "delete" },
                { "item_id": "222", "action": "delete" },
                { "item_id": "333", "action": "delete" },
            ],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 1 })))
        .expect(1)
        .mount(&provider)
        .await;

    let server = common::links_server(&provider.uri(), false);
    let (name, value) = token_header();
    let response = server
        .delete("/links")
        .add_header(name, value)
        .json(&json!([
            "111",
            { "id": "222" },
            { "id": "333", "title": "t", "url": "https://e.test" },
        ]))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn delete_maps_provider_failures_to_bad_gateway() {
    let provider = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/send"))
        .respond_with(ResponseTemplate::new(403).set_body_string("bad token"))
        .mount(&provider)
        .await;

    let server = common::links_server(&provider.uri(), false);
    let (name, value) = token_header();
    let response = server
        .delete("/links")
        .add_header(name, value)
        .json(&json!(["111"]))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn delete_rejects_a_malformed_body() {
    let provider = MockServer::start().await;

    let server = common::links_server(&provider.uri(), false);
    let (name, value) = token_header();
    let response = server
        .delete("/links")
        .add_header(name, value)
        .text("{not json")
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn dry_run_delete_never_calls_the_provider() {
    let provider = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/send"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&provider)
        .await;

    let server = common::links_server(&provider.uri(), true);
    let (name, value) = token_header();
    let response = server
        .delete("/links")
        .add_header(name, value)
        .json(&json!(["111", "222"]))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "done": true }));
}

#[tokio::test]
async fn dry_run_accepts_an_empty_batch() {
    let provider = MockServer::start().await;

    let server = common::links_server(&provider.uri(), true);
    let response = server.delete("/links").json(&json!([])).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "done": true }));
}
