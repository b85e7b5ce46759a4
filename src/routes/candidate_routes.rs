use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::candidate_dto::{
        ApplicationResponse, AttachCandidatePayload, AttachCandidateResponse,
        CandidateDetailResponse, CandidateListQuery, CandidateListResponse, CandidateResponse,
        CreateCandidatePayload, UpdateApplicationStatusPayload, UpdateCandidatePayload,
    },
    error::Result,
    models::user::Principal,
    services::export_service::ExportService,
    services::policy_service::{self, Action, Resource},
    AppState,
};

#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    principal: Principal,
    Json(payload): Json<CreateCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    policy_service::authorize(&principal, Action::Create, &Resource::CandidateCollection)
        .require()?;
    let candidate = state.candidate_service.create(payload, &principal).await?;
    Ok((StatusCode::CREATED, Json(CandidateResponse::from(candidate))))
}

#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<CandidateListQuery>,
) -> Result<impl IntoResponse> {
    policy_service::authorize(&principal, Action::ViewList, &Resource::CandidateCollection)
        .require()?;
    let result = state.candidate_service.list(query).await?;
    Ok(Json(CandidateListResponse::from(result)))
}

#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.get_by_id(id).await?;
    policy_service::authorize(&principal, Action::ViewDetail, &Resource::Candidate(&candidate))
        .require()?;
    let skills = state.candidate_service.skills_for(id).await?;
    Ok(Json(CandidateDetailResponse::new(candidate, skills)))
}

#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let current = state.candidate_service.get_by_id(id).await?;
    policy_service::authorize(&principal, Action::Edit, &Resource::Candidate(&current))
        .require()?;
    let candidate = state.candidate_service.update(id, payload, &principal).await?;
    Ok(Json(CandidateResponse::from(candidate)))
}

#[axum::debug_handler]
pub async fn delete_candidate(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let current = state.candidate_service.get_by_id(id).await?;
    policy_service::authorize(&principal, Action::Delete, &Resource::Candidate(&current))
        .require()?;
    state.candidate_service.delete(id, &principal).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Attach a candidate to a vacancy. Attaching an already linked pair is not
/// an error; the existing application comes back with `created = false`.
#[axum::debug_handler]
pub async fn attach_candidate(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(payload): Json<AttachCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    policy_service::authorize(&principal, Action::Create, &Resource::ApplicationCollection)
        .require()?;
    let (application, created) = state
        .application_service
        .attach_candidate(id, payload.vacancy_id, &principal, payload.notes)
        .await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(AttachCandidateResponse {
            created,
            application: ApplicationResponse::from(application),
        }),
    ))
}

#[axum::debug_handler]
pub async fn list_candidate_applications(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    policy_service::authorize(&principal, Action::ViewList, &Resource::ApplicationCollection)
        .require()?;
    let applications = state.application_service.list_for_candidate(id).await?;
    let items: Vec<ApplicationResponse> = applications.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[axum::debug_handler]
pub async fn update_application_status(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApplicationStatusPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state
        .application_service
        .update_status(id, &payload.status, &principal)
        .await?;
    Ok(Json(ApplicationResponse::from(application)))
}

#[axum::debug_handler]
pub async fn export_candidates(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse> {
    policy_service::authorize(&principal, Action::Export, &Resource::CandidateCollection)
        .require()?;
    let candidates = state.candidate_service.list_all().await?;
    let buffer = ExportService::candidates_workbook(&candidates)?;

    Ok((
        [
            (
                axum::http::header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ),
            (
                axum::http::header::CONTENT_DISPOSITION,
                "attachment; filename=\"candidates.xlsx\"",
            ),
        ],
        buffer,
    ))
}
