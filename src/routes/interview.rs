use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::interview_dto::{
        InterviewListQuery, InterviewResponse, ScheduleInterviewPayload, SweepResponse,
        UpdateInterviewStatusPayload,
    },
    error::Result,
    models::user::Principal,
    services::policy_service::{self, Action, Resource},
    utils::time,
    AppState,
};

#[axum::debug_handler]
pub async fn schedule_interview(
    State(state): State<AppState>,
    principal: Principal,
    Json(payload): Json<ScheduleInterviewPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    policy_service::authorize(&principal, Action::Create, &Resource::InterviewCollection)
        .require()?;
    let interview = state.interview_service.schedule(payload, &principal).await?;
    Ok((StatusCode::CREATED, Json(InterviewResponse::from(interview))))
}

#[axum::debug_handler]
pub async fn list_interviews(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<InterviewListQuery>,
) -> Result<impl IntoResponse> {
    policy_service::authorize(&principal, Action::ViewList, &Resource::InterviewCollection)
        .require()?;
    let interviews = state.interview_service.list(query).await?;
    let items: Vec<InterviewResponse> = interviews.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[axum::debug_handler]
pub async fn get_interview(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let interview = state.interview_service.get_by_id(id).await?;
    policy_service::authorize(&principal, Action::ViewDetail, &Resource::Interview(&interview))
        .require()?;
    Ok(Json(InterviewResponse::from(interview)))
}

#[axum::debug_handler]
pub async fn update_interview_status(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(payload): Json<UpdateInterviewStatusPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let current = state.interview_service.get_by_id(id).await?;
    policy_service::authorize(&principal, Action::Edit, &Resource::Interview(&current))
        .require()?;

    let new_status = payload.status.clone();
    let interview = state
        .interview_service
        .update_status(id, payload, &principal)
        .await?;
    state
        .audit_service
        .log(
            Some(&principal.username),
            "interview_status_changed",
            "interview",
            id,
            Some(json!({ "from": current.status, "to": new_status })),
            headers
                .get(axum::http::header::USER_AGENT)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
        )
        .await?;

    Ok(Json(InterviewResponse::from(interview)))
}

/// Manual trigger for one reminder pass; the scheduler runs the same sweep
/// on its cron cadence.
#[axum::debug_handler]
pub async fn sweep_reminders(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse> {
    policy_service::authorize(&principal, Action::ChangeStatus, &Resource::InterviewCollection)
        .require()?;
    let outcome = state
        .interview_service
        .sweep_reminders(&state.notification_service, time::now())
        .await?;
    Ok(Json(SweepResponse::from(outcome)))
}
