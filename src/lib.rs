//! golink - short keys that redirect to long URLs, served from an in-memory
//! cache in front of a SQLite table.

pub mod cache;
pub mod config;
pub mod coordinator;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

use config::AppConfig;
use coordinator::Coordinator;

// ── Shared application state ───────────────────────────────────────────────

pub struct AppState {
    pub coordinator: Coordinator,
    pub config: AppConfig,
}
