//! Price index endpoints
//!
//! POST /indices/{laspeyres,paasche,fisher}/{anio_base}/{anio_actual}
//! GET  /indices/comparar/{anio_base}/{anio_actual}
//! GET  /indices/formula/{tipo}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::error;

use crate::error::IndexError;
use crate::models::error::ErrorResponse;
use crate::models::index::{ComparisonResponseEntry, FormulaResponse, IndexResponse};
use crate::services::interpretation;
use crate::AppState;

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: IndexError) -> HandlerError {
    let status = match &err {
        IndexError::MissingPrerequisite { .. } => StatusCode::BAD_REQUEST,
        IndexError::Overflow { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        IndexError::Collaborator(e) => {
            error!(error = %e, "Index computation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

pub async fn compute_laspeyres(
    State(state): State<AppState>,
    Path((base_year, current_year)): Path<(i32, i32)>,
) -> Result<Json<IndexResponse>, HandlerError> {
    let outcome = state
        .engine
        .compute_laspeyres(base_year, current_year)
        .await
        .map_err(error_response)?;

    Ok(Json(outcome.into()))
}

pub async fn compute_paasche(
    State(state): State<AppState>,
    Path((base_year, current_year)): Path<(i32, i32)>,
) -> Result<Json<IndexResponse>, HandlerError> {
    let outcome = state
        .engine
        .compute_paasche(base_year, current_year)
        .await
        .map_err(error_response)?;

    Ok(Json(outcome.into()))
}

/// Responds 400 until Laspeyres and Paasche exist for the same period.
pub async fn compute_fisher(
    State(state): State<AppState>,
    Path((base_year, current_year)): Path<(i32, i32)>,
) -> Result<Json<IndexResponse>, HandlerError> {
    let outcome = state
        .engine
        .compute_fisher(base_year, current_year)
        .await
        .map_err(error_response)?;

    Ok(Json(outcome.into()))
}

pub async fn compare_indices(
    State(state): State<AppState>,
    Path((base_year, current_year)): Path<(i32, i32)>,
) -> Result<Json<Vec<ComparisonResponseEntry>>, HandlerError> {
    let entries = state
        .engine
        .compare_indices(base_year, current_year)
        .await
        .map_err(error_response)?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

pub async fn get_formula(Path(label): Path<String>) -> Json<FormulaResponse> {
    let formula = interpretation::formula_for_label(&label);
    Json(FormulaResponse {
        label,
        formula: formula.to_string(),
    })
}
