use std::sync::Arc;

use axum::{
    Json,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use futures_util::TryStreamExt;
use tracing::info;

use crate::api::{DeleteItem, DoneResponse};
use crate::config::Config;
use crate::model::Action;
use crate::pocket::Pocket;
use crate::{bad_gateway, bad_request, unpack_error};

#[derive(Clone)]
pub struct AppState {
    pub pocket: Arc<Pocket>,
    pub config: Arc<Config>,
    pub dry_run: bool,
}

/// Inbound header carrying the caller's provider access token. The token
/// is forwarded on every call and never stored here; a missing header
/// forwards as an empty string and the provider's rejection surfaces as
/// an upstream failure.
const TOKEN_HEADER: &str = "token";

const DELETE_ACTION: &str = "delete";

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn fetch_links(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let token = access_token(&headers);

    match state.pocket.fetch_unread(&token).await {
        Ok(resp) => forward_json(resp),
        Err(e) => {
            tracing::error!("failed to fetch links from provider: {}", unpack_error(&e));
            bad_gateway("failed to fetch links from provider")
        }
    }
}

pub async fn delete_links(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let token = access_token(&headers);

    let items: Vec<DeleteItem> = match serde_json::from_slice(&body) {
        Ok(items) => items,
        Err(e) => {
            info!("rejecting delete request with malformed body: {}", e);
            return bad_request("expected a JSON array of link ids");
        }
    };

    let actions = delete_actions(items);

    if state.dry_run {
        match state.pocket.render_send(&token, actions) {
            Ok(dump) => info!(request = %dump, "dry run, skipping provider delete"),
            Err(e) => tracing::error!(
                "failed to render provider delete request: {}",
                unpack_error(&e)
            ),
        }
        return (StatusCode::OK, Json(DoneResponse { done: true })).into_response();
    }

    match state.pocket.send_actions(&token, actions).await {
        Ok(resp) => forward_json(resp),
        Err(e) => {
            tracing::error!("failed to delete links at provider: {}", unpack_error(&e));
            bad_gateway("failed to delete links at provider")
        }
    }
}

fn access_token(headers: &HeaderMap) -> String {
    headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Map inbound items to provider actions, one per id, preserving the
/// caller's order.
fn delete_actions(items: Vec<DeleteItem>) -> Vec<Action> {
    items
        .into_iter()
        .map(|item| Action {
            item_id: item.into_id(),
            action: DELETE_ACTION.to_string(),
        })
        .collect()
}

/// Stream a provider body through unchanged, with the JSON content-type
/// the provider speaks. Link lists run to thousands of entries, so the
/// body is never buffered whole.
fn forward_json(resp: reqwest::Response) -> Response {
    let stream = resp.bytes_stream().inspect_err(|e| {
        tracing::warn!(error = %e, "provider response stream interrupted");
    });

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Body::from_stream(stream),
    )
        .into_response()
}
