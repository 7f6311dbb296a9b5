//! Route handlers.
//!
//! Each analysis route materializes the frame under the lock, releases it,
//! and runs the statistical pipeline on the blocking pool.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::{Value, json};

use matchday_core::model::{AdvancedAnalysis, DataSources, HolisticAnalysis};
use matchday_core::simulator::MarketingSimulationResult;
use matchday_core::{
    GameFrame, MarketingScenario, advanced_analysis, holistic_analysis, simulate_marketing,
};

use crate::AppState;
use crate::db::{self, AttendancePoint, DashboardMetrics, GameDetail, NewGame};
use crate::error::{ApiError, ApiResult};

pub async fn root() -> &'static str {
    "Matchday Analytics API Server"
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub game_count: i64,
}

pub async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthStatus>> {
    let conn = state.db.lock()?;
    let game_count = db::count_games(&conn)?;
    Ok(Json(HealthStatus {
        status: "ok",
        service: "matchday-analytics-api",
        game_count,
    }))
}

pub async fn attendance(State(state): State<AppState>) -> ApiResult<Json<Vec<AttendancePoint>>> {
    let conn = state.db.lock()?;
    Ok(Json(db::attendance_series(&conn)?))
}

pub async fn dashboard_metrics(State(state): State<AppState>) -> ApiResult<Json<DashboardMetrics>> {
    let conn = state.db.lock()?;
    Ok(Json(db::dashboard_metrics(&conn)?))
}

pub async fn advanced(State(state): State<AppState>) -> ApiResult<Json<AdvancedAnalysis>> {
    let rows = {
        let conn = state.db.lock()?;
        db::load_game_rows(&conn)?
    };
    let config = state.config.clone();
    let payload = tokio::task::spawn_blocking(move || {
        let frame = GameFrame::new(rows, &config);
        advanced_analysis(&frame, &config)
    })
    .await
    .map_err(|_| ApiError::Internal)??;
    Ok(Json(payload))
}

pub async fn holistic(State(state): State<AppState>) -> ApiResult<Json<HolisticAnalysis>> {
    let (rows, mix_lines) = {
        let conn = state.db.lock()?;
        (db::load_game_rows(&conn)?, db::load_mix_lines(&conn)?)
    };
    let config = state.config.clone();
    let payload = tokio::task::spawn_blocking(move || {
        let frame = GameFrame::new(rows, &config);
        holistic_analysis(&frame, &mix_lines, DataSources::default(), &config)
    })
    .await
    .map_err(|_| ApiError::Internal)??;
    Ok(Json(payload))
}

pub async fn simulate(
    State(state): State<AppState>,
    Json(scenario): Json<MarketingScenario>,
) -> ApiResult<Json<MarketingSimulationResult>> {
    let rows = {
        let conn = state.db.lock()?;
        db::load_game_rows(&conn)?
    };
    let config = state.config.clone();
    let payload = tokio::task::spawn_blocking(move || {
        let frame = GameFrame::new(rows, &config);
        simulate_marketing(&frame, &scenario, &config)
    })
    .await
    .map_err(|_| ApiError::Internal)??;
    Ok(Json(payload))
}

pub async fn game_detail(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> ApiResult<Json<GameDetail>> {
    let conn = state.db.lock()?;
    db::game_detail(&conn, game_id)?
        .map(Json)
        .ok_or(ApiError::GameNotFound)
}

pub async fn add_game(
    State(state): State<AppState>,
    Json(new_game): Json<NewGame>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let mut conn = state.db.lock()?;
    db::insert_game(&mut conn, &new_game)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Game added successfully"})),
    ))
}
