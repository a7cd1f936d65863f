use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::AccessTokenParams;
use crate::handler::AppState;
use crate::{bad_gateway, unpack_error};

/// The consent flow uses plain 302s; axum's `Redirect` helpers emit
/// 303/307, so the response is built by hand.
fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// First leg: obtain a request token and bounce the user to the consent
/// page, with a redirect-back URI that carries the token so the second
/// leg can pick it up.
pub async fn start_auth(State(state): State<AppState>) -> Response {
    let redirect_uri = &state.config.provider.redirect_uri;

    let code = match state.pocket.request_token(redirect_uri).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("failed to obtain request token: {}", unpack_error(&e));
            return bad_gateway("failed to obtain request token from provider");
        }
    };

    let redirect_back = format!(
        "{}/oauth/access_token?request_token={}",
        state.config.app.get_public_url(),
        code
    );

    found(state.pocket.authorize_url(&code, &redirect_back))
}

/// Second leg: exchange the approved request token and hand the access
/// token to the front-end via the root URL. An empty token still
/// redirects; only a reply without the field at all is treated as a
/// provider failure.
pub async fn fetch_access_token(
    State(state): State<AppState>,
    Query(params): Query<AccessTokenParams>,
) -> Response {
    let request_token = params.request_token.unwrap_or_default();

    let access_token = match state.pocket.authorize(&request_token).await {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("failed to exchange request token: {}", unpack_error(&e));
            return bad_gateway("failed to exchange request token with provider");
        }
    };

    found(format!(
        "{}/?access_token={}",
        state.config.app.get_public_url(),
        urlencoding::encode(&access_token)
    ))
}
