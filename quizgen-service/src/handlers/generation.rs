//! Generation endpoints.
//!
//! Every failure, from an unreadable body to unusable model output, is
//! answered with 400 and `{"error": "..."}`.

use crate::dtos::{GenerateMaterialRequest, GenerateMcqRequest, MaterialResponse, McqResponse};
use crate::startup::AppState;
use axum::extract::{rejection::JsonRejection, Json, State};
use service_core::error::AppError;
use validator::Validate;

fn reject_body(rejection: JsonRejection) -> AppError {
    tracing::warn!(error = %rejection.body_text(), "Rejected request body");
    AppError::BadRequest(anyhow::anyhow!(rejection.body_text()))
}

/// Generate a multiple-choice quiz.
///
/// POST /generate-mcq
pub async fn generate_mcq(
    State(state): State<AppState>,
    payload: Result<Json<GenerateMcqRequest>, JsonRejection>,
) -> Result<Json<McqResponse>, AppError> {
    let Json(req) = payload.map_err(reject_body)?;
    req.validate()?;

    tracing::info!(
        course_title = %req.course_title,
        quiz_title = %req.quiz_title,
        "Generating MCQs"
    );

    let questions = state.generator.generate_mcqs(&req).await.map_err(|e| {
        tracing::error!(error = %e, "MCQ generation failed");
        AppError::from(e)
    })?;

    Ok(Json(McqResponse { questions }))
}

/// Generate study material for a lesson.
///
/// POST /generate-material
pub async fn generate_material(
    State(state): State<AppState>,
    payload: Result<Json<GenerateMaterialRequest>, JsonRejection>,
) -> Result<Json<MaterialResponse>, AppError> {
    let Json(req) = payload.map_err(reject_body)?;
    req.validate()?;

    tracing::info!(
        course_title = %req.course_title,
        material_title = %req.material_title,
        "Generating material"
    );

    let content = state.generator.generate_material(&req).await.map_err(|e| {
        tracing::error!(error = %e, "Material generation failed");
        AppError::from(e)
    })?;

    Ok(Json(MaterialResponse { content }))
}
