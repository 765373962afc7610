//! User management within a tenant (staff only; role changes gated further).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use service_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

use crate::dtos::users::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::middleware::AuthUser;
use crate::models::{Role, User};
use crate::tenancy::CurrentTenant;
use crate::utils::hash_password;
use crate::AppState;

fn parse_role(value: &str) -> Result<Role, AppError> {
    Role::parse(value)
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Unknown role: {}", value)))
}

/// Only an OWNER may grant staff roles.
fn check_role_grant(claims_role: Role, granted: Role) -> Result<(), AppError> {
    if granted.is_staff() && claims_role != Role::Owner {
        return Err(AppError::Forbidden(anyhow::anyhow!(
            "Only the owner may grant staff roles"
        )));
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/users",
    responses((status = 200, description = "Users in the tenant", body = [UserResponse])),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
) -> Result<impl IntoResponse, AppError> {
    let users = state.db.list_users_in_tenant(tenant.tenant_id).await?;
    let body: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(Json(body))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 409, description = "Email already registered", body = crate::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let role = parse_role(&req.role)?;
    check_role_grant(claims.role(), role)?;

    if state
        .db
        .find_user_by_email_in_tenant(tenant.tenant_id, &req.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Email is already registered for this tenant"
        )));
    }

    let password_hash = hash_password(&req.password)?;
    let user = User::new(tenant.tenant_id, &req.name, &req.email, password_hash, role);
    state.db.insert_user(&user).await?;

    tracing::info!(user_id = %user.user_id, tenant_id = %tenant.tenant_id, role = %user.role_code, "user created");
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "Not found in this tenant", body = crate::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .db
        .find_user_by_id(tenant.tenant_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("User not found")))?;
    Ok(Json(UserResponse::from(&user)))
}

#[utoipa::path(
    patch,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 404, description = "Not found in this tenant", body = crate::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let mut user = state
        .db
        .find_user_by_id(tenant.tenant_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("User not found")))?;

    if let Some(role) = &req.role {
        let role = parse_role(role)?;
        check_role_grant(claims.role(), role)?;
        user.role_code = role.as_str().to_string();
    }
    if let Some(name) = req.name {
        user.name = name;
    }
    user.updated_utc = Utc::now();

    state.db.update_user(&user).await?;
    Ok(Json(UserResponse::from(&user)))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "Not found in this tenant", body = crate::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id().map_err(AppError::Unauthorized)?;
    if user_id == id {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Cannot delete your own account"
        )));
    }

    if !state.db.delete_user(tenant.tenant_id, id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!("User not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
