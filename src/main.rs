use std::sync::Arc;

use axum::http::Method;
use axum::{
    Router,
    routing::{delete, get},
};
use clap::Parser;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing;
use triage::assets::{serve_embedded, serve_live};
use triage::config::{Cli, Config, default_config_path};
use triage::handler::{AppState, delete_links, fetch_links, healthcheck};
use triage::oauth;
use triage::pocket::Pocket;

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().json().init();
    tracing::info!("triage.svc starting");

    if args.dry_run {
        tracing::info!("running in dry run mode, deletions are logged and never sent");
    }

    // An explicit --config must load; the default path is optional and the
    // built-in defaults cover the zero-config case.
    let cfg = match args.config_path {
        Some(path) => Config::new(&path).unwrap_or_else(|e| {
            tracing::error!(error = %e, path = %path, "failed to load config file");
            std::process::exit(1);
        }),
        None => {
            let path = default_config_path();
            if path.exists() {
                Config::new(path.to_str().unwrap()).unwrap_or_else(|e| {
                    tracing::error!(error = %e, path = ?path, "failed to load config file");
                    std::process::exit(1);
                })
            } else {
                Config::default()
            }
        }
    };

    let pocket = Arc::new(Pocket::new(&cfg).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup provider client");
        std::process::exit(1);
    }));

    let address = format!("0.0.0.0:{}", cfg.app.get_port());
    let state = AppState {
        pocket,
        config: Arc::new(cfg),
        dry_run: args.dry_run,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::DELETE])
        .allow_headers(Any);

    let router = Router::new()
        .route("/healthz", get(healthcheck))
        .route("/links", get(fetch_links))
        .route("/links", delete(delete_links))
        .nest("/oauth", oauth::routes());

    // Deployment switch: embedded bundle by default, the on-disk directory
    // with --live.
    let router = if args.live {
        router.fallback_service(serve_live())
    } else {
        router.fallback(serve_embedded)
    };

    let app = router.layer(cors).with_state(state);

    let listener = tokio::net::TcpListener::bind(&address).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup tcp listener");
        std::process::exit(1);
    });

    tracing::info!("triage.svc running on {}", &address);
    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(err) = result {
                tracing::error!(error = %err, "server exited with error");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            tracing::info!("ctrl+c signal received, triage.svc going off");
        }
    }
}
