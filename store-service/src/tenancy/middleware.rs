use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use service_core::error::AppError;

use super::context::{self, TenantContext};
use super::error::TenantError;
use super::extract::extract_identifier;
use super::resolver::resolve_tenant;
use crate::AppState;
use crate::services::jwt::AccessTokenClaims;

/// Bind the request to a tenant before any handler runs.
///
/// Public routes and `OPTIONS` preflight get an explicit empty context and
/// proceed. Everything else must produce an identifier that resolves to a
/// live tenant, or the request is rejected; the empty context is attached
/// before any rejection so error-handling code never observes a stale or
/// partially-populated view.
pub async fn tenant_context_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    if state.public_routes.is_public(&method, &path) {
        context::attach(req.extensions_mut(), TenantContext::empty());
        tracing::debug!(%method, %path, "public route, skipping tenant resolution");
        return Ok(next.run(req).await);
    }

    let claims = req.extensions().get::<AccessTokenClaims>().cloned();
    let Some(identifier) = extract_identifier(req.headers(), claims.as_ref()) else {
        context::attach(req.extensions_mut(), TenantContext::empty());
        tracing::debug!(%method, %path, "no tenant identifier found");
        return Err(TenantError::Missing.into());
    };

    tracing::debug!(
        %method,
        %path,
        source = identifier.source.as_str(),
        "tenant identifier extracted"
    );

    let tenant = match resolve_tenant(state.directory.as_ref(), &identifier.value).await {
        Ok(tenant) => tenant,
        Err(err) => {
            context::attach(req.extensions_mut(), TenantContext::empty());
            if let TenantError::DirectoryUnavailable(ref source) = err {
                tracing::error!(%method, %path, error = %source, "tenant directory unavailable");
            }
            return Err(err.into());
        }
    };

    // A principal is bound to exactly one tenant; a mismatch with the
    // resolved tenant is a hard failure, never a silent rebind.
    if let Some(claims) = &claims {
        if claims.tenant_id != tenant.tenant_id.to_string() {
            context::attach(req.extensions_mut(), TenantContext::empty());
            tracing::warn!(
                %method,
                %path,
                tenant_id = %tenant.tenant_id,
                principal_tenant = %claims.tenant_id,
                "principal does not belong to the active tenant"
            );
            return Err(AppError::Forbidden(anyhow::anyhow!(
                "User does not belong to the active tenant"
            )));
        }
    }

    tracing::debug!(
        %method,
        %path,
        tenant_id = %tenant.tenant_id,
        code = %tenant.code,
        "tenant resolved"
    );
    context::attach(
        req.extensions_mut(),
        TenantContext::attached(tenant, identifier.source),
    );

    Ok(next.run(req).await)
}
