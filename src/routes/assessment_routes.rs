use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::assessment_dto::{SaveAssessmentPayload, SubmitResponsePayload, SubmitResponseResult},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/assessments/{job_id}",
    params(
        ("job_id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Saved assessment tree"),
        (status = 404, description = "No assessment for this job")
    )
)]
#[axum::debug_handler]
pub async fn get_assessment(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let assessment = state.assessment_service.get_by_job(job_id).await?;
    Ok(Json(assessment))
}

#[utoipa::path(
    post,
    path = "/assessments/{job_id}",
    params(
        ("job_id" = Uuid, Path, description = "Job ID")
    ),
    request_body = SaveAssessmentPayload,
    responses(
        (status = 200, description = "Tree replaced wholesale"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn save_assessment(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(payload): Json<SaveAssessmentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let assessment = state
        .assessment_service
        .save(job_id, payload.sections)
        .await?;
    Ok(Json(assessment))
}

#[utoipa::path(
    post,
    path = "/assessments/{job_id}/submit",
    params(
        ("job_id" = Uuid, Path, description = "Job ID")
    ),
    request_body = SubmitResponsePayload,
    responses(
        (status = 201, description = "Responses accepted", body = Json<SubmitResponseResult>),
        (status = 400, description = "Per-question validation errors"),
        (status = 404, description = "No assessment for this job")
    )
)]
#[axum::debug_handler]
pub async fn submit_assessment(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(payload): Json<SubmitResponsePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let response = state.assessment_service.submit(job_id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmitResponseResult { id: response.id }),
    ))
}
