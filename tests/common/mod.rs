#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get};
use axum_test::TestServer;
use triage::config::{App, Config, Provider};
use triage::handler::{self, AppState};
use triage::oauth;
use triage::pocket::Pocket;

pub const TEST_CONSUMER_KEY: &str = "12345-test-consumer-key";

/// Config pointed at a mock provider, with the default app settings
/// (public URL http://localhost:8080).
pub fn test_config(provider_url: &str) -> Config {
    Config {
        app: App::default(),
        provider: Provider {
            api_url: provider_url.to_string(),
            consumer_key: TEST_CONSUMER_KEY.to_string(),
            redirect_uri: "Triage:authorizationFinished".to_string(),
        },
    }
}

pub fn make_state(provider_url: &str, dry_run: bool) -> AppState {
    let config = test_config(provider_url);
    let pocket = Pocket::new(&config).unwrap();

    AppState {
        pocket: Arc::new(pocket),
        config: Arc::new(config),
        dry_run,
    }
}

/// Test server exposing the link routes the way the real router mounts
/// them.
pub fn links_server(provider_url: &str, dry_run: bool) -> TestServer {
    let app = Router::new()
        .route("/links", get(handler::fetch_links))
        .route("/links", delete(handler::delete_links))
        .with_state(make_state(provider_url, dry_run));

    TestServer::new(app).unwrap()
}

pub fn oauth_server(provider_url: &str) -> TestServer {
    let app = Router::new()
        .nest("/oauth", oauth::routes())
        .with_state(make_state(provider_url, false));

    TestServer::new(app).unwrap()
}
