#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use golink::{
    config::AppConfig,
    coordinator::Coordinator,
    db::{SqliteUrlStore, UrlStore},
    error::StoreError,
    models::UrlMapping,
    routes, AppState,
};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

pub const BASE_URL: &str = "http://go.test";

pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "BASE_URL" => Some(BASE_URL.to_owned()),
        "DATABASE_URL" => Some("sqlite::memory:".to_owned()),
        "STORE_TIMEOUT_MS" => Some("50".to_owned()),
        _ => None,
    })
    .unwrap()
}

pub async fn memory_store() -> SqliteUrlStore {
    // One connection that never recycles, so every query sees the same database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let store = SqliteUrlStore::new(pool);
    store.migrate().await.unwrap();
    store
}

pub fn app_with_store(store: Arc<dyn UrlStore>) -> Router {
    let config = test_config();
    let coordinator = Coordinator::new(store, config.store_timeout);
    routes::router(Arc::new(AppState {
        coordinator,
        config,
    }))
}

/// Router plus a handle on its store for seeding rows behind the cache.
pub async fn create_test_app() -> (Router, SqliteUrlStore) {
    let store = memory_store().await;
    (app_with_store(Arc::new(store.clone())), store)
}

/// A store that never answers in time.
pub struct StalledStore;

#[async_trait]
impl UrlStore for StalledStore {
    async fn insert(&self, _: &str, _: &str) -> Result<(), StoreError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(())
    }

    async fn find(&self, _: &str) -> Result<Option<String>, StoreError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<UrlMapping>, StoreError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Vec::new())
    }
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(app: &Router, uri: &str, form: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(form.to_owned()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
