use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{Extensions, request::Parts},
};
use serde::Serialize;
use service_core::error::AppError;
use uuid::Uuid;

use super::extract::ResolutionSource;
use crate::models::Tenant;

/// Request-scoped tenant view, one per inbound request.
///
/// This is the single carrier downstream code reads; the middleware writes
/// it exactly once per attach and a later attach fully replaces the earlier
/// one. Once attached, `tenant_id` is either `None` (public route) or the
/// verified id of a non-deleted tenant, never a raw identifier.
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub tenant: Option<Tenant>,
    pub tenant_id: Option<Uuid>,
    pub source: ResolutionSource,
}

impl TenantContext {
    /// Context for a resolved tenant.
    pub fn attached(tenant: Tenant, source: ResolutionSource) -> Self {
        Self {
            tenant_id: Some(tenant.tenant_id),
            tenant: Some(tenant),
            source,
        }
    }

    /// Explicit absence (public route, or cleared before a rejection).
    pub fn empty() -> Self {
        Self {
            tenant: None,
            tenant_id: None,
            source: ResolutionSource::None,
        }
    }

    pub fn require_tenant_id(&self) -> Result<Uuid, AppError> {
        self.tenant_id
            .ok_or_else(|| AppError::Forbidden(anyhow::anyhow!("Tenant context not found")))
    }

    /// Diagnostic view, safe to return to clients.
    pub fn describe(&self) -> TenantContextView {
        TenantContextView {
            tenant_id: self.tenant_id,
            tenant_code: self.tenant.as_ref().map(|t| t.code.clone()),
            source: self.source.as_str(),
        }
    }
}

/// Serializable summary for the debug endpoint.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TenantContextView {
    pub tenant_id: Option<Uuid>,
    pub tenant_code: Option<String>,
    pub source: &'static str,
}

/// Write the context onto the request. Insert fully replaces any previous
/// context, so attaching `None` (an empty context) clears everything.
pub fn attach(extensions: &mut Extensions, context: TenantContext) {
    extensions.insert(context);
}

pub fn get(extensions: &Extensions) -> Option<&TenantContext> {
    extensions.get::<TenantContext>()
}

#[async_trait]
impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .cloned()
            .ok_or_else(|| AppError::Forbidden(anyhow::anyhow!("Tenant context not found")))
    }
}

/// Extractor for handlers that cannot run without a resolved tenant.
///
/// ```ignore
/// async fn handler(CurrentTenant(tenant): CurrentTenant) -> impl IntoResponse {
///     // tenant.tenant_id is verified and non-deleted
/// }
/// ```
pub struct CurrentTenant(pub Tenant);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentTenant
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let context = TenantContext::from_request_parts(parts, state).await?;
        context
            .tenant
            .ok_or_else(|| AppError::Forbidden(anyhow::anyhow!("Tenant context not found")))
            .map(CurrentTenant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_overwrites_fully() {
        let mut extensions = Extensions::new();

        let tenant = Tenant::new("salwa", "Toko Salwa", None);
        attach(
            &mut extensions,
            TenantContext::attached(tenant, ResolutionSource::Header),
        );
        assert!(get(&extensions).unwrap().tenant_id.is_some());

        attach(&mut extensions, TenantContext::empty());
        let cleared = get(&extensions).unwrap();
        assert!(cleared.tenant.is_none());
        assert!(cleared.tenant_id.is_none());
        assert_eq!(cleared.source, ResolutionSource::None);
    }

    #[test]
    fn test_describe_empty_context() {
        let view = TenantContext::empty().describe();
        assert!(view.tenant_id.is_none());
        assert!(view.tenant_code.is_none());
        assert_eq!(view.source, "none");
    }
}
