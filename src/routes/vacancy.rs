use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::vacancy_dto::{
        ChangeVacancyStatusPayload, CreateVacancyPayload, UpdateVacancyPayload,
        VacancyDetailResponse, VacancyListQuery, VacancyListResponse, VacancyResponse,
        VacancyStatusChangeResponse,
    },
    error::Result,
    models::user::{Principal, Role},
    models::vacancy::VacancyStatus,
    services::policy_service::{self, Action, Resource},
    AppState,
};

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[utoipa::path(
    post,
    path = "/api/vacancies",
    request_body = CreateVacancyPayload,
    responses(
        (status = 201, description = "Vacancy created successfully", body = Json<VacancyResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Forbidden")
    )
)]
#[axum::debug_handler]
pub async fn create_vacancy(
    State(state): State<AppState>,
    principal: Principal,
    Json(payload): Json<CreateVacancyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    policy_service::authorize(&principal, Action::Create, &Resource::VacancyCollection)
        .require()?;
    let vacancy = state.vacancy_service.create(payload, &principal).await?;
    Ok((StatusCode::CREATED, Json(VacancyResponse::from(vacancy))))
}

#[utoipa::path(
    get,
    path = "/api/vacancies",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("search" = Option<String>, Query, description = "Search query")
    ),
    responses(
        (status = 200, description = "List of vacancies", body = Json<VacancyListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_vacancies(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<VacancyListQuery>,
) -> Result<impl IntoResponse> {
    policy_service::authorize(&principal, Action::ViewList, &Resource::VacancyCollection)
        .require()?;
    let mut query = query;
    // Callers without a recognized role only ever see the public board.
    if principal.role == Role::Unknown {
        query.status = Some(VacancyStatus::Open.as_str().to_string());
    }
    let result = state.vacancy_service.list(query).await?;
    Ok(Json(VacancyListResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/vacancies/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Vacancy found", body = Json<VacancyDetailResponse>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn get_vacancy(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.get_by_id(id).await?;
    policy_service::authorize(&principal, Action::ViewDetail, &Resource::Vacancy(&vacancy))
        .require()?;
    let skills = state.vacancy_service.skills_for(id).await?;
    Ok(Json(VacancyDetailResponse::new(vacancy, skills)))
}

#[utoipa::path(
    patch,
    path = "/api/vacancies/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    request_body = UpdateVacancyPayload,
    responses(
        (status = 200, description = "Vacancy updated successfully", body = Json<VacancyResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn update_vacancy(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVacancyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let current = state.vacancy_service.get_by_id(id).await?;
    policy_service::authorize(&principal, Action::Edit, &Resource::Vacancy(&current)).require()?;
    let vacancy = state.vacancy_service.update(id, payload, &principal).await?;
    Ok(Json(VacancyResponse::from(vacancy)))
}

#[utoipa::path(
    post,
    path = "/api/vacancies/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    request_body = ChangeVacancyStatusPayload,
    responses(
        (status = 200, description = "Status changed", body = Json<VacancyStatusChangeResponse>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Vacancy not found"),
        (status = 422, description = "Unknown status value")
    )
)]
#[axum::debug_handler]
pub async fn change_vacancy_status(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(payload): Json<ChangeVacancyStatusPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let current = state.vacancy_service.get_by_id(id).await?;
    policy_service::authorize(&principal, Action::ChangeStatus, &Resource::Vacancy(&current))
        .require()?;

    let change = state
        .vacancy_service
        .change_status(id, &payload.status, &principal)
        .await?;
    state
        .audit_service
        .log(
            Some(&principal.username),
            "vacancy_status_changed",
            "vacancy",
            id,
            Some(json!({ "from": change.previous, "to": change.current })),
            user_agent(&headers),
        )
        .await?;

    Ok(Json(VacancyStatusChangeResponse::from(change)))
}

#[utoipa::path(
    delete,
    path = "/api/vacancies/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 204, description = "Vacancy deleted successfully"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_vacancy(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let current = state.vacancy_service.get_by_id(id).await?;
    policy_service::authorize(&principal, Action::Delete, &Resource::Vacancy(&current))
        .require()?;
    state.vacancy_service.delete(id, &principal).await?;
    state
        .audit_service
        .log(
            Some(&principal.username),
            "vacancy_deleted",
            "vacancy",
            id,
            None,
            user_agent(&headers),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
