//! Dashboard API route handlers.
//!
//! The run is finished before the server starts, so state is an immutable
//! snapshot shared via `Arc<DashboardState>`.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use super::chart;
use crate::types::{RoundResult, SimulationRun};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    pub run: SimulationRun,
    /// Pre-rendered chart, so every request serves the same bytes.
    pub chart_svg: String,
}

impl DashboardState {
    pub fn new(run: SimulationRun) -> Self {
        let chart_svg = chart::render_svg(&run);
        Self { run, chart_svg }
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct RunResponse {
    pub id: String,
    pub started_at: String,
    pub strategy: String,
    pub bet: Decimal,
    pub rounds: u64,
    pub seed: Option<u64>,
    pub starting_balance: Decimal,
    /// `None` when no round was played.
    pub end_balance: Option<Decimal>,
    pub pnl: Decimal,
    pub title: String,
}

impl From<&SimulationRun> for RunResponse {
    fn from(run: &SimulationRun) -> Self {
        Self {
            id: run.id.to_string(),
            started_at: run.started_at.to_rfc3339(),
            strategy: run.config.strategy.to_string(),
            bet: run.config.bet.normalize(),
            rounds: run.config.rounds,
            seed: run.config.seed,
            starting_balance: run.starting_balance,
            end_balance: run.end_balance().map(|b| b.normalize()),
            pnl: run.pnl().normalize(),
            title: chart::chart_title(run).join("\n"),
        }
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/run
pub async fn get_run(State(state): State<AppState>) -> Json<RunResponse> {
    Json(RunResponse::from(&state.run))
}

/// GET /api/rounds
pub async fn get_rounds(State(state): State<AppState>) -> Json<Vec<RoundResult>> {
    Json(state.run.rounds.clone())
}

/// GET /chart.svg
pub async fn get_chart(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        state.chart_svg.clone(),
    )
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
