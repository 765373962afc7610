//! Tenant management handlers.
//!
//! These live outside the tenant-scoped surface: `/tenants` is a public
//! prefix, so the tenant middleware does not gate it. Mutations verify the
//! caller's token against the tenant being changed instead.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

use crate::dtos::tenants::{CreateTenantRequest, TenantResponse, UpdateTenantRequest};
use crate::middleware::AuthUser;
use crate::models::{Role, Tenant, User};
use crate::services::jwt::AccessTokenClaims;
use crate::utils::hash_password;
use crate::AppState;

/// Caller must hold an OWNER token issued for this tenant.
fn require_owner_of(claims: &AccessTokenClaims, tenant_id: Uuid) -> Result<(), AppError> {
    if claims.tenant_id != tenant_id.to_string() {
        return Err(AppError::Forbidden(anyhow::anyhow!(
            "User does not belong to the active tenant"
        )));
    }
    if claims.role() != Role::Owner {
        return Err(AppError::Forbidden(anyhow::anyhow!(
            "Insufficient role for this operation"
        )));
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/tenants",
    request_body = CreateTenantRequest,
    responses(
        (status = 201, description = "Tenant and owner created", body = TenantResponse),
        (status = 409, description = "Code or domain already in use", body = crate::dtos::ErrorResponse),
    ),
    tag = "tenants"
)]
pub async fn create_tenant(
    State(state): State<AppState>,
    Json(req): Json<CreateTenantRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if state.db.find_tenant_by_code(&req.code).await?.is_some() {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Tenant code is already in use"
        )));
    }
    if let Some(domain) = &req.domain {
        if state.db.find_tenant_by_domain(domain).await?.is_some() {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "Tenant domain is already in use"
            )));
        }
    }

    let mut tenant = Tenant::new(&req.code, &req.name, req.domain.as_deref());
    tenant.address = req.address.clone();
    tenant.email = req.email.clone();
    tenant.phone = req.phone.clone();

    let password_hash = hash_password(&req.owner.password)?;
    let owner = User::new(
        tenant.tenant_id,
        &req.owner.name,
        &req.owner.email,
        password_hash,
        Role::Owner,
    );

    // Tenant and its first OWNER are created in one transaction; a tenant
    // without an owner is unreachable.
    state.db.create_tenant_with_owner(&tenant, &owner).await?;

    tracing::info!(tenant_id = %tenant.tenant_id, code = %tenant.code, "tenant created");
    Ok((StatusCode::CREATED, Json(TenantResponse::from(&tenant))))
}

#[utoipa::path(
    get,
    path = "/tenants",
    responses((status = 200, description = "All live tenants", body = [TenantResponse])),
    tag = "tenants"
)]
pub async fn list_tenants(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let tenants = state.db.list_tenants().await?;
    let body: Vec<TenantResponse> = tenants.iter().map(TenantResponse::from).collect();
    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/tenants/{id}",
    params(("id" = Uuid, Path, description = "Tenant ID")),
    responses(
        (status = 200, description = "Tenant", body = TenantResponse),
        (status = 404, description = "Unknown or deleted tenant", body = crate::dtos::ErrorResponse),
    ),
    tag = "tenants"
)]
pub async fn get_tenant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = state
        .db
        .find_tenant_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Tenant not found")))?;
    Ok(Json(TenantResponse::from(&tenant)))
}

#[utoipa::path(
    patch,
    path = "/tenants/{id}",
    params(("id" = Uuid, Path, description = "Tenant ID")),
    request_body = UpdateTenantRequest,
    responses(
        (status = 200, description = "Updated tenant", body = TenantResponse),
        (status = 403, description = "Not the tenant owner", body = crate::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "tenants"
)]
pub async fn update_tenant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AuthUser(claims): AuthUser,
    Json(req): Json<UpdateTenantRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;
    require_owner_of(&claims, id)?;

    let mut tenant = state
        .db
        .find_tenant_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Tenant not found")))?;

    if let Some(domain) = &req.domain {
        let existing = state.db.find_tenant_by_domain(domain).await?;
        if existing.is_some_and(|other| other.tenant_id != id) {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "Tenant domain is already in use"
            )));
        }
        tenant.domain = Some(domain.trim().to_lowercase());
    }
    if let Some(name) = req.name {
        tenant.name = name;
    }
    if let Some(address) = req.address {
        tenant.address = Some(address);
    }
    if let Some(email) = req.email {
        tenant.email = Some(email);
    }
    if let Some(phone) = req.phone {
        tenant.phone = Some(phone);
    }

    state.db.update_tenant(&tenant).await?;
    Ok(Json(TenantResponse::from(&tenant)))
}

#[utoipa::path(
    delete,
    path = "/tenants/{id}",
    params(("id" = Uuid, Path, description = "Tenant ID")),
    responses(
        (status = 204, description = "Tenant soft deleted"),
        (status = 403, description = "Not the tenant owner", body = crate::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "tenants"
)]
pub async fn delete_tenant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    require_owner_of(&claims, id)?;

    if !state.db.soft_delete_tenant(id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!("Tenant not found")));
    }

    tracing::info!(tenant_id = %id, "tenant soft deleted");
    Ok(StatusCode::NO_CONTENT)
}
