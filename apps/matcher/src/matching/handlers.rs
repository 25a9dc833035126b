//! Axum route handlers for the Matching API.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::aggregator::MatchReport;
use crate::matching::export::reports_to_csv;
use crate::matching::normalize::normalize_skill;
use crate::models::profile::{
    CandidatePayload, CandidateProfile, JobRequirement, RequirementPayload,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub candidate: Option<CandidatePayload>,
    pub requirement: Option<RequirementPayload>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub report: MatchReport,
}

#[derive(Debug, Deserialize)]
pub struct BatchCandidate {
    pub id: Option<String>,
    pub candidate: Option<CandidatePayload>,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub requirement: Option<RequirementPayload>,
    pub candidates: Option<Vec<BatchCandidate>>,
}

#[derive(Debug, Serialize)]
pub struct BatchResult {
    pub id: String,
    pub report: MatchReport,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub total: usize,
    pub results: Vec<BatchResult>,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub skill: String,
    pub normalized: String,
    pub canonical: Option<String>,
    pub family: Option<String>,
    pub equivalents: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Scores one candidate profile against one job requirement.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let candidate = CandidateProfile::try_from(
        request
            .candidate
            .ok_or_else(|| AppError::Validation("candidate is required".to_string()))?,
    )?;
    let requirement = parse_requirement(request.requirement)?;

    let report = state.engine.score(&candidate, &requirement);

    Ok(Json(MatchResponse { report }))
}

/// POST /api/v1/match/batch
///
/// Scores every candidate against the same requirement. Results keep the
/// request order.
pub async fn handle_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    let results = run_batch(&state, request).await?;
    Ok(Json(BatchResponse {
        total: results.len(),
        results,
    }))
}

/// POST /api/v1/match/batch/csv
///
/// Same as the batch endpoint, rendered as one CSV row per candidate.
pub async fn handle_batch_csv(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let results = run_batch(&state, request).await?;
    let csv = reports_to_csv(results.iter().map(|r| (r.id.as_str(), &r.report)))?;

    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], csv))
}

/// GET /api/v1/taxonomy/resolve/:skill
///
/// Shows how a skill string resolves against the taxonomy.
pub async fn handle_resolve(
    State(state): State<AppState>,
    Path(skill): Path<String>,
) -> Result<Json<ResolveResponse>, AppError> {
    let normalized = normalize_skill(&skill);
    if normalized.is_empty() {
        return Err(AppError::Validation(
            "skill must contain at least one letter or digit".to_string(),
        ));
    }

    let taxonomy = state.engine.taxonomy();
    Ok(Json(ResolveResponse {
        canonical: taxonomy.resolve(&skill).map(str::to_string),
        family: taxonomy.family_of(&normalized).map(str::to_string),
        equivalents: taxonomy.equivalents(&normalized),
        normalized,
        skill,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn parse_requirement(payload: Option<RequirementPayload>) -> Result<JobRequirement, AppError> {
    JobRequirement::try_from(
        payload.ok_or_else(|| AppError::Validation("requirement is required".to_string()))?,
    )
}

/// Validates the whole batch up front, then scores it off the async runtime.
async fn run_batch(state: &AppState, request: BatchRequest) -> Result<Vec<BatchResult>, AppError> {
    let requirement = parse_requirement(request.requirement)?;
    let entries = request
        .candidates
        .ok_or_else(|| AppError::Validation("candidates is required".to_string()))?;
    if entries.is_empty() {
        return Err(AppError::Validation(
            "candidates must contain at least one entry".to_string(),
        ));
    }

    let mut ids = Vec::with_capacity(entries.len());
    let mut profiles = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        let id = entry.id.unwrap_or_else(|| format!("candidate-{}", idx + 1));
        let payload = entry.candidate.ok_or_else(|| {
            AppError::Validation(format!("candidates[{idx}].candidate is required"))
        })?;
        profiles.push(CandidateProfile::try_from(payload).map_err(|e| match e {
            AppError::Validation(msg) => AppError::Validation(format!("candidates[{idx}]: {msg}")),
            other => other,
        })?);
        ids.push(id);
    }

    let engine = state.engine.clone();
    let reports =
        tokio::task::spawn_blocking(move || engine.score_batch(&requirement, &profiles))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("batch scoring task failed: {e}")))?;

    tracing::info!(candidates = reports.len(), "Batch scored");

    Ok(ids
        .into_iter()
        .zip(reports)
        .map(|(id, report)| BatchResult { id, report })
        .collect())
}
