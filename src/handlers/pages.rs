use crate::{error::ShortenError, models::UrlMapping, AppState};
use askama::Template;
use axum::{
    extract::{Form, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

// ── Template structs ───────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    links: Vec<UrlMapping>,
    base_url: String,
    flash: Option<String>,
}

// ── Form types ─────────────────────────────────────────────────────────────

/// Both fields are optional here so a missing one reaches the coordinator
/// and comes back as a 400 naming the field.
#[derive(Deserialize)]
pub struct ShortenForm {
    url: Option<String>,
    shortkey: Option<String>,
}

impl ShortenForm {
    fn url(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }

    fn shortkey(&self) -> &str {
        self.shortkey.as_deref().unwrap_or_default()
    }
}

// ── Handlers ───────────────────────────────────────────────────────────────

/// GET /
/// The shorten form followed by a table of every stored link.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Response, ShortenError> {
    render_index(&state, None).await
}

/// GET /urls
pub async fn list_json(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UrlMapping>>, ShortenError> {
    let links = state.coordinator.list_all().await?;
    Ok(Json(links))
}

/// POST /shorten
/// Create the link, then re-render the index page with a confirmation.
pub async fn shorten(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ShortenForm>,
) -> Result<Response, ShortenError> {
    let link = state
        .coordinator
        .create(form.shortkey(), form.url())
        .await?;

    let flash = format!("Link created: {}/{}", state.config.base_url, link.short_key);
    render_index(&state, Some(flash)).await
}

/// POST /add
/// Create the link and return it as JSON.
pub async fn add(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ShortenForm>,
) -> Result<Response, ShortenError> {
    let link = state
        .coordinator
        .create(form.shortkey(), form.url())
        .await?;

    Ok((StatusCode::CREATED, Json(link)).into_response())
}

/// Any method other than GET or POST on the shorten endpoints.
pub async fn method_not_supported(method: Method) -> ShortenError {
    ShortenError::BadInput(format!("method not supported: {method}"))
}

// ── Private helpers ────────────────────────────────────────────────────────

async fn render_index(state: &AppState, flash: Option<String>) -> Result<Response, ShortenError> {
    let links = state.coordinator.list_all().await?;

    Ok(IndexTemplate {
        links,
        base_url: state.config.base_url.clone(),
        flash,
    }
    .into_response())
}
