//! Tenant model - root of the multi-tenancy hierarchy.
//!
//! A tenant is one store. Its `code` is the lowercase slug carried in the
//! `X-Tenant-Id` header or subdomain; `domain` is an optional custom domain.
//! Tenants are never hard-deleted: `deleted_utc` marks them as gone and every
//! directory lookup excludes marked rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Tenant entity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Tenant {
    pub tenant_id: Uuid,
    /// Unique lowercase slug, e.g. "salwa".
    pub code: String,
    pub name: String,
    /// Optional unique custom domain, e.g. "salwa.mysite.com".
    pub domain: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
    /// Soft-delete marker; set instead of removing the row.
    pub deleted_utc: Option<DateTime<Utc>>,
}

impl Tenant {
    /// Create a new tenant. Code and domain are normalized to lowercase.
    pub fn new(code: &str, name: &str, domain: Option<&str>) -> Self {
        let now = Utc::now();
        Self {
            tenant_id: Uuid::new_v4(),
            code: code.trim().to_lowercase(),
            name: name.to_string(),
            domain: domain.map(|d| d.trim().to_lowercase()),
            address: None,
            email: None,
            phone: None,
            created_utc: now,
            updated_utc: now,
            deleted_utc: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_utc.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_code_and_domain() {
        let tenant = Tenant::new(" Salwa ", "Toko Salwa", Some("Salwa.MySite.com"));
        assert_eq!(tenant.code, "salwa");
        assert_eq!(tenant.domain.as_deref(), Some("salwa.mysite.com"));
        assert!(!tenant.is_deleted());
    }
}
