use std::sync::{Arc, Mutex};

use axum::{
    Router,
    routing::{get, post},
};
use rusqlite::Connection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use matchday_core::AnalysisConfig;
use matchday_server::{AppState, db, handlers};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db_path = std::env::var("MATCHDAY_DB").unwrap_or_else(|_| "matchday.db".to_string());
    let conn = Connection::open(&db_path).expect("failed to open database");
    db::init_db(&conn).expect("failed to initialize schema");

    let state = AppState {
        db: Arc::new(Mutex::new(conn)),
        config: AnalysisConfig::default(),
    };

    let app = Router::new()
        .route("/", get(handlers::root))
        .route("/api/health", get(handlers::health))
        .route("/attendance", get(handlers::attendance))
        .route("/api/analysis", get(handlers::dashboard_metrics))
        .route("/api/advanced_analysis", get(handlers::advanced))
        .route("/api/holistic_analysis", get(handlers::holistic))
        .route("/api/simulate_marketing", post(handlers::simulate))
        .route("/api/game_detail/{id}", get(handlers::game_detail))
        .route("/api/add_game", post(handlers::add_game))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let host = std::env::var("MATCHDAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("MATCHDAY_PORT").unwrap_or_else(|_| "3001".to_string());
    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}"))
        .await
        .expect("failed to bind listener");
    tracing::info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}
