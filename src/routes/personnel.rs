use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::personnel_dto::{CreatePersonnelFormPayload, PersonnelFormResponse},
    error::Result,
    models::user::Principal,
    services::policy_service::{self, Action, Resource},
    AppState,
};

#[axum::debug_handler]
pub async fn create_form(
    State(state): State<AppState>,
    principal: Principal,
    Json(payload): Json<CreatePersonnelFormPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    policy_service::authorize(&principal, Action::Create, &Resource::PersonnelFormCollection)
        .require()?;
    let form = state.personnel_service.create(payload, &principal).await?;
    Ok((StatusCode::CREATED, Json(PersonnelFormResponse::from(form))))
}

#[axum::debug_handler]
pub async fn list_forms(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse> {
    policy_service::authorize(&principal, Action::ViewList, &Resource::PersonnelFormCollection)
        .require()?;
    let forms = state.personnel_service.list().await?;
    let items: Vec<PersonnelFormResponse> = forms.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[axum::debug_handler]
pub async fn get_form(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let form = state.personnel_service.get_by_id(id).await?;
    policy_service::authorize(&principal, Action::ViewDetail, &Resource::PersonnelForm(&form))
        .require()?;
    Ok(Json(PersonnelFormResponse::from(form)))
}

#[axum::debug_handler]
pub async fn approve_form(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let current = state.personnel_service.get_by_id(id).await?;
    policy_service::authorize(&principal, Action::Edit, &Resource::PersonnelForm(&current))
        .require()?;
    let form = state.personnel_service.approve(id, &principal).await?;
    Ok(Json(PersonnelFormResponse::from(form)))
}
