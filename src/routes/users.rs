use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::user_dto::{AdminStatsResponse, CreateUserPayload, UpdateUserPayload, UserResponse},
    error::Result,
    models::user::Principal,
    services::policy_service::{self, Action, Resource},
    AppState,
};

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse> {
    policy_service::authorize(&principal, Action::ManageUsers, &Resource::UserCollection)
        .require()?;
    let users = state.user_service.list().await?;
    let items: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    principal: Principal,
    headers: HeaderMap,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    policy_service::authorize(&principal, Action::ManageUsers, &Resource::UserCollection)
        .require()?;
    let user = state.user_service.create(payload).await?;
    state
        .audit_service
        .log(
            Some(&principal.username),
            "user_created",
            "user",
            user.id,
            Some(json!({ "username": user.username, "role": user.role })),
            user_agent(&headers),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[axum::debug_handler]
pub async fn update_user(
    State(state): State<AppState>,
    principal: Principal,
    Path(username): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    // The systemadmin guard fires here, before the record is even looked up.
    policy_service::authorize(&principal, Action::Edit, &Resource::UserAccount(&username))
        .require()?;
    let user = state.user_service.update(&username, payload).await?;
    state
        .audit_service
        .log(
            Some(&principal.username),
            "user_updated",
            "user",
            user.id,
            Some(json!({ "username": user.username, "role": user.role })),
            user_agent(&headers),
        )
        .await?;
    Ok(Json(UserResponse::from(user)))
}

#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    principal: Principal,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    policy_service::authorize(&principal, Action::Delete, &Resource::UserAccount(&username))
        .require()?;
    let user = state.user_service.get_by_username(&username).await?;
    state.user_service.delete(&username).await?;
    state
        .audit_service
        .log(
            Some(&principal.username),
            "user_deleted",
            "user",
            user.id,
            None,
            user_agent(&headers),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn admin_stats(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse> {
    policy_service::authorize(&principal, Action::ManageUsers, &Resource::UserCollection)
        .require()?;
    let stats = state.user_service.stats().await?;
    Ok(Json(AdminStatsResponse::from(stats)))
}
