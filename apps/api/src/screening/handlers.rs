//! Axum route handlers for the Screening API.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderValue},
    response::{Html, IntoResponse},
    Json,
};

use crate::errors::AppError;
use crate::models::report::ScreeningReport;
use crate::screening::page::render_index;
use crate::screening::pipeline::{screen, NO_MATCH_WARNING};
use crate::screening::report::{write_csv, CSV_FILE_NAME, CSV_MIME_TYPE};
use crate::screening::skills::SkillSet;
use crate::screening::upload::{parse_multipart, ScreeningForm};
use crate::state::AppState;

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.config.default_skills))
}

/// POST /api/v1/screen
///
/// Returns the ranked shortlist as JSON. An empty shortlist is a normal
/// response carrying `warning`.
pub async fn handle_screen(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScreeningReport>, AppError> {
    let form = parse_multipart(multipart).await?;
    let report = run_screening(&state, form).await?;
    Ok(Json(report))
}

/// POST /api/v1/screen/csv
///
/// Same input as `/api/v1/screen`; returns `shortlisted_resumes.csv`.
/// Nothing to download when no resume qualifies (422).
pub async fn handle_screen_csv(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = parse_multipart(multipart).await?;
    let report = run_screening(&state, form).await?;

    if report.shortlisted.is_empty() {
        return Err(AppError::UnprocessableEntity(NO_MATCH_WARNING.to_string()));
    }

    let body = write_csv(&report.shortlisted)?;
    let disposition = format!("attachment; filename=\"{CSV_FILE_NAME}\"");
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid content-disposition: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(CSV_MIME_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// Validates the form and runs the pipeline off the async executor.
async fn run_screening(state: &AppState, form: ScreeningForm) -> Result<ScreeningReport, AppError> {
    let skills_input = form
        .skills
        .unwrap_or_else(|| state.config.default_skills.clone());
    let skills = SkillSet::parse(&skills_input);
    if skills.is_empty() {
        return Err(AppError::Validation(
            "Enter at least one required skill".to_string(),
        ));
    }
    if form.uploads.is_empty() {
        return Err(AppError::Validation(
            "Upload at least one PDF resume".to_string(),
        ));
    }

    let embedder = Arc::clone(&state.embedder);
    let uploads = form.uploads;
    let report = tokio::task::spawn_blocking(move || screen(uploads, &skills, embedder.as_ref()))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in screening: {e}")))??;

    Ok(report)
}
