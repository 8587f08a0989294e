//! REST API endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/health` | Liveness probe |
//! | `POST` | `/boards` | Upload a board |
//! | `GET` | `/boards/{id}` | Stored board |
//! | `POST` | `/boards/{id}/next` | Advance one generation and save |
//! | `GET` | `/boards/{id}/generations/{n}` | Project `n` generations ahead |
//! | `POST` | `/boards/{id}/final/{max_attempts}` | Run to a still life and save |

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use conway_types::{BoardId, BoardView, FinalStateView, GenerationsView, Grid, UploadResponse};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

/// Parse a board id from a path segment.
fn parse_id(raw: &str) -> Result<BoardId, ApiError> {
    raw.parse()
        .map_err(|e| ApiError::InvalidUuid(format!("{raw}: {e}")))
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Report that the server is up.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// POST /boards
// ---------------------------------------------------------------------------

/// Validate and store an uploaded grid.
///
/// The body is a JSON array of rows, each an array of booleans.
pub async fn upload_board(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Grid>, JsonRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let Json(grid) = payload?;
    info!("Received request to upload new board");

    let id = state.service.upload(grid).await?;
    Ok((StatusCode::CREATED, Json(UploadResponse { id })))
}

// ---------------------------------------------------------------------------
// GET /boards/{id}
// ---------------------------------------------------------------------------

/// Return a stored board.
pub async fn get_board(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<BoardView>, ApiError> {
    let Path(raw) = path?;
    let id = parse_id(&raw)?;

    let record = state.service.get(id).await?;
    Ok(Json(BoardView::from(record)))
}

// ---------------------------------------------------------------------------
// POST /boards/{id}/next
// ---------------------------------------------------------------------------

/// Advance a board one generation, save it, and return it.
pub async fn next_state(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<BoardView>, ApiError> {
    let Path(raw) = path?;
    let id = parse_id(&raw)?;
    info!(board_id = %id, "Received request for next state");

    let record = state.service.next_state(id).await?;
    Ok(Json(BoardView::from(record)))
}

// ---------------------------------------------------------------------------
// GET /boards/{id}/generations/{n}
// ---------------------------------------------------------------------------

/// Return the board `n` generations ahead without saving.
pub async fn state_after(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, usize)>, PathRejection>,
) -> Result<Json<GenerationsView>, ApiError> {
    let Path((raw, generations)) = path?;
    let id = parse_id(&raw)?;
    info!(board_id = %id, generations, "Received request for state after generations");

    let grid = state.service.state_after(id, generations).await?;
    Ok(Json(GenerationsView {
        id,
        generations,
        grid,
    }))
}

// ---------------------------------------------------------------------------
// POST /boards/{id}/final/{max_attempts}
// ---------------------------------------------------------------------------

/// Run a board to a still life, save it, and return it.
pub async fn final_state(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, usize)>, PathRejection>,
) -> Result<Json<FinalStateView>, ApiError> {
    let Path((raw, max_attempts)) = path?;
    let id = parse_id(&raw)?;
    info!(board_id = %id, max_attempts, "Received request for final state");

    let result = state.service.final_state(id, max_attempts).await?;
    Ok(Json(FinalStateView {
        id,
        generation: result.record.generation,
        attempts: result.attempts,
        grid: result.record.grid,
    }))
}
