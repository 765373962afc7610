use async_trait::async_trait;
use uuid::Uuid;

use super::error::TenantError;
use crate::models::Tenant;

/// Lookup interface over persisted tenant records.
///
/// Implementations must exclude soft-deleted tenants from every lookup;
/// the resolver does not know about soft-delete specifics. Storage failures
/// surface as [`TenantError::DirectoryUnavailable`], never as a plain miss.
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    async fn find_by_id(&self, tenant_id: Uuid) -> Result<Option<Tenant>, TenantError>;

    /// `code` is expected to be lowercase+trimmed by the caller.
    async fn find_by_code(&self, code: &str) -> Result<Option<Tenant>, TenantError>;

    async fn find_by_domain(&self, domain: &str) -> Result<Option<Tenant>, TenantError>;
}
