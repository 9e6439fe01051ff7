//! Axum route handlers for the outreach API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::extraction::{extract_jobs, JobPosting};
use crate::pipeline::{generate_outreach, OutreachRequest, OutreachResponse};
use crate::portfolio::PortfolioRow;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub jobs: Vec<JobPosting>,
}

/// POST /api/v1/jobs/extract
/// Extraction only — useful for inspecting what a page yields before
/// generating any emails.
pub async fn handle_extract_jobs(
    State(state): State<AppState>,
    Json(req): Json<OutreachRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    let jobs = extract_jobs(&req.page_text, state.model.as_ref()).await?;
    Ok(Json(ExtractResponse { jobs }))
}

/// POST /api/v1/outreach/generate
/// The full pipeline: one email per extracted job posting.
pub async fn handle_generate_outreach(
    State(state): State<AppState>,
    Json(req): Json<OutreachRequest>,
) -> Result<Json<OutreachResponse>, AppError> {
    let response = generate_outreach(
        &req.page_text,
        state.model.as_ref(),
        &state.index,
        &state.persona,
    )
    .await?;
    Ok(Json(response))
}

/// GET /api/v1/portfolio
/// The portfolio rows loaded at startup, as read from the tabular source.
pub async fn handle_list_portfolio(State(state): State<AppState>) -> Json<Vec<PortfolioRow>> {
    Json(state.projects.as_ref().clone())
}
