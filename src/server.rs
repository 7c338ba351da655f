//! HTTP routes: the embedded browser client, the game socket, and a health check

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use rust_embed::Embed;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;
use crate::ws::ws_handler;

/// Embedded static files
#[derive(Embed)]
#[folder = "static/"]
struct Assets;

/// Serve embedded static files
async fn serve_static(path: &str) -> impl IntoResponse {
    let path = if path.is_empty() { "index.html" } else { path };

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [("content-type", mime.as_ref())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

async fn index_handler() -> impl IntoResponse {
    serve_static("index.html").await
}

async fn static_handler(
    axum::extract::Path(path): axum::extract::Path<String>,
) -> impl IntoResponse {
    serve_static(&path).await
}

async fn health_handler() -> &'static str {
    "OK"
}

/// Build the router
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/ws/snake", get(ws_handler))
        .route("/health", get(health_handler))
        .route("/{*path}", get(static_handler))
        .layer(cors)
        .with_state(state)
}
