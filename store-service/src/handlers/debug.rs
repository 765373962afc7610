//! Diagnostics: echo what the tenant pipeline would resolve for a request.
//!
//! `/debug` is a public prefix, so the middleware itself does not resolve a
//! tenant here; the handler runs the same extraction and resolution on its
//! own and reports the outcome instead of rejecting.

use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use service_core::error::AppError;

use crate::services::jwt::AccessTokenClaims;
use crate::tenancy::context::TenantContextView;
use crate::tenancy::{extract_identifier, resolve_tenant};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/debug/context",
    responses((status = 200, description = "Resolved tenant context view", body = TenantContextView)),
    tag = "debug"
)]
pub async fn debug_context(
    State(state): State<AppState>,
    claims: Option<axum::Extension<AccessTokenClaims>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let claims = claims.map(|ext| ext.0);

    let Some(identifier) = extract_identifier(&headers, claims.as_ref()) else {
        return Ok(Json(TenantContextView {
            tenant_id: None,
            tenant_code: None,
            source: "none",
        }));
    };

    match resolve_tenant(state.directory.as_ref(), &identifier.value).await {
        Ok(tenant) => Ok(Json(TenantContextView {
            tenant_id: Some(tenant.tenant_id),
            tenant_code: Some(tenant.code),
            source: identifier.source.as_str(),
        })),
        Err(err) => Err(err.into()),
    }
}
