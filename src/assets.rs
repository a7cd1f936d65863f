use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;
use tower_http::services::{ServeDir, ServeFile};

/// Where the bundled front-end lives, both at build time (embedded into
/// the binary) and on disk in live mode.
pub const ASSETS_DIR: &str = "web/dist";

#[derive(Embed)]
#[folder = "web/dist"]
pub struct Assets;

/// Default asset backend: files compiled into the binary, so the gateway
/// ships as a single executable.
pub async fn serve_embedded(req: Request<Body>) -> impl IntoResponse {
    let path = req.uri().path().trim_start_matches('/');

    // For SPA routing: serve index.html for paths without file extensions
    let path = if path.is_empty() || !path.contains('.') {
        "index.html"
    } else {
        path
    };

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            Response::builder()
                .header(header::CONTENT_TYPE, mime.as_ref())
                .body(Body::from(content.data.into_owned()))
                .unwrap()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Live-mode backend: read from the directory on every request, so
/// front-end edits show up without rebuilding the binary. Unknown paths
/// fall back to index.html to match the embedded backend's SPA routing.
pub fn serve_live() -> ServeDir<ServeFile> {
    ServeDir::new(ASSETS_DIR).fallback(ServeFile::new(format!("{}/index.html", ASSETS_DIR)))
}
