//! HTTP plumbing around the `matchday_core` analytics engine.
//!
//! The server owns the SQLite schema, materializes the game frame the core
//! consumes, and exposes the analysis entry points as JSON routes.

pub mod db;
pub mod error;
pub mod handlers;

use std::sync::{Arc, Mutex};

use matchday_core::AnalysisConfig;
use rusqlite::Connection;

/// Shared state for all route handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AnalysisConfig,
}
