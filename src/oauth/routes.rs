use axum::{Router, routing::get};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/request", get(handler::start_auth))
        .route("/access_token", get(handler::fetch_access_token))
}
