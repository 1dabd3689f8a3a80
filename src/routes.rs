use crate::{
    handlers::{pages, redirect},
    AppState,
};
use axum::{http::StatusCode, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the application router.
///
/// - `GET /` - shorten form and link table
/// - `GET /urls` - every link as JSON
/// - `GET|POST /shorten` - form, or create and re-render the form
/// - `GET|POST /add` - form, or create and return the link as JSON
/// - `GET /health` - liveness probe
/// - `GET /:code` - 301 to the original URL
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/health", get(|| async { StatusCode::OK }))
        .route("/urls", get(pages::list_json))
        .route(
            "/shorten",
            get(pages::index)
                .post(pages::shorten)
                .fallback(pages::method_not_supported),
        )
        .route(
            "/add",
            get(pages::index)
                .post(pages::add)
                .fallback(pages::method_not_supported),
        )
        // Short-link redirect; the fixed routes above take priority
        .route("/:code", get(redirect::redirect))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
