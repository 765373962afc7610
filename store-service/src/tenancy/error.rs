use service_core::error::AppError;
use thiserror::Error;

/// Failures of the tenant-resolution pipeline.
#[derive(Debug, Error)]
pub enum TenantError {
    /// No identifier found on a protected route.
    #[error("Tenant context not found")]
    Missing,

    /// Identifier present but malformed (empty after normalization).
    #[error("Invalid tenant identifier: {0}")]
    Invalid(String),

    /// Identifier well-formed but no matching, non-deleted tenant exists.
    #[error("Tenant not found (ID/Code: {0})")]
    NotFound(String),

    /// The directory lookup itself failed. Operationally distinct from
    /// NotFound, but presented to clients identically so resolution
    /// internals cannot be probed.
    #[error("Tenant directory unavailable")]
    DirectoryUnavailable(#[source] anyhow::Error),
}

impl From<TenantError> for AppError {
    fn from(err: TenantError) -> Self {
        match err {
            TenantError::Missing => AppError::BadRequest(anyhow::anyhow!("Tenant context not found")),
            TenantError::Invalid(id) => {
                AppError::BadRequest(anyhow::anyhow!("Invalid tenant identifier: {}", id))
            }
            TenantError::NotFound(id) => {
                AppError::NotFound(anyhow::anyhow!("Tenant not found (ID/Code: {})", id))
            }
            TenantError::DirectoryUnavailable(_) => {
                AppError::NotFound(anyhow::anyhow!("Tenant not found"))
            }
        }
    }
}
