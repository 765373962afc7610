//! Authentication handlers.
//!
//! Login, register and refresh are public routes: the tenant middleware
//! skips them, so they resolve their own tenant from the request headers
//! or, failing that, from the `tenant_code` in the body.

use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;
use validator::Validate;

use crate::dtos::auth::{LoginRequest, MeResponse, RefreshRequest, RegisterRequest, RegisterResponse};
use crate::middleware::AuthUser;
use crate::models::{Role, Tenant, User};
use crate::tenancy::{extract_identifier, resolve_tenant, CurrentTenant, TenantError};
use crate::utils::{hash_password, verify_password};
use crate::AppState;

/// Resolve the tenant for a public auth route: request identifier first,
/// body `tenant_code` as the fallback.
async fn resolve_auth_tenant(
    state: &AppState,
    headers: &HeaderMap,
    body_tenant_code: Option<&str>,
) -> Result<Tenant, AppError> {
    let identifier = extract_identifier(headers, None)
        .map(|extracted| extracted.value)
        .or_else(|| body_tenant_code.map(|code| code.to_string()))
        .ok_or(TenantError::Missing)?;

    Ok(resolve_tenant(state.directory.as_ref(), &identifier).await?)
}

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Missing or invalid tenant", body = crate::dtos::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::dtos::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let tenant = resolve_auth_tenant(&state, &headers, req.tenant_code.as_deref()).await?;

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
    let user = User::new(
        tenant.tenant_id,
        &req.name,
        &req.email,
        password_hash,
        Role::Customer,
    );
    state.db.insert_user(&user).await?;

    tracing::info!(user_id = %user.user_id, tenant_id = %tenant.tenant_id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user.user_id.to_string(),
            message: "Registration successful".to_string(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token pair issued", body = crate::services::jwt::TokenResponse),
        (status = 401, description = "Invalid credentials", body = crate::dtos::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let tenant = resolve_auth_tenant(&state, &headers, req.tenant_code.as_deref()).await?;

    let user = state
        .db
        .find_user_by_email_in_tenant(tenant.tenant_id, &req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized(anyhow::anyhow!("Invalid email or password")))?;

    if !verify_password(&req.password, &user.password_hash)? {
        tracing::warn!(tenant_id = %tenant.tenant_id, email = %req.email, "failed login attempt");
        return Err(AppError::Unauthorized(anyhow::anyhow!(
            "Invalid email or password"
        )));
    }

    let tokens = state.jwt.issue_token_pair(&user, &tenant)?;
    tracing::info!(user_id = %user.user_id, tenant_id = %tenant.tenant_id, "user logged in");
    Ok(Json(tokens))
}

#[utoipa::path(
    post,
    path = "/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New token pair", body = crate::services::jwt::TokenResponse),
        (status = 401, description = "Invalid refresh token", body = crate::dtos::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<impl IntoResponse, AppError> {
    let claims = state
        .jwt
        .validate_refresh_token(&req.refresh_token)
        .map_err(|_| AppError::Unauthorized(anyhow::anyhow!("Invalid or expired refresh token")))?;

    // The refresh token carries its tenant; re-resolve so a tenant deleted
    // since issuance invalidates its outstanding tokens. A miss here is a
    // credential failure, not a routing 404.
    let tenant = resolve_tenant(state.directory.as_ref(), &claims.tenant_id)
        .await
        .map_err(|e| match e {
            TenantError::DirectoryUnavailable(_) => AppError::from(e),
            _ => AppError::Unauthorized(anyhow::anyhow!("Tenant for this token no longer exists")),
        })?;

    let user_id = uuid::Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized(anyhow::anyhow!("Invalid refresh token subject")))?;
    let user = state
        .db
        .find_user_by_id(tenant.tenant_id, user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized(anyhow::anyhow!("User no longer exists")))?;

    let tokens = state.jwt.issue_token_pair(&user, &tenant)?;
    Ok(Json(tokens))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Not authenticated", body = crate::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn me(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id().map_err(AppError::Unauthorized)?;
    let user = state
        .db
        .find_user_by_id(tenant.tenant_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("User not found")))?;

    Ok(Json(MeResponse {
        user_id: user.user_id.to_string(),
        name: user.name,
        email: user.email,
        role: user.role_code,
        tenant_code: tenant.code,
    }))
}
