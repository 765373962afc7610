use uuid::Uuid;

use super::directory::TenantDirectory;
use super::error::TenantError;
use crate::models::Tenant;

/// Whether an identifier has the canonical surrogate-id shape
/// (hyphenated UUID). Codes and ids share the same channel, so the shape
/// decides which lookup runs; the check is deliberately strict to keep the
/// decision deterministic.
pub fn looks_like_tenant_id(value: &str) -> bool {
    value.len() == 36 && Uuid::try_parse(value).is_ok()
}

/// Turn a candidate identifier into a tenant.
///
/// Id-shaped identifiers are looked up by id only: a miss is a hard
/// `TenantNotFound`, never a fall-through to a code lookup, so a code that
/// happens to look like an id cannot resolve ambiguously. Human codes are
/// normalized to lowercase and tried against the code column, then the
/// domain column as a last resort. Lookups run sequentially, never raced; a
/// strategy that fails is not retried, the chain just moves on.
pub async fn resolve_tenant(
    directory: &dyn TenantDirectory,
    identifier: &str,
) -> Result<Tenant, TenantError> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(TenantError::Invalid(identifier.to_string()));
    }

    if looks_like_tenant_id(identifier) {
        let tenant_id = Uuid::parse_str(identifier)
            .map_err(|_| TenantError::Invalid(identifier.to_string()))?;
        return match directory.find_by_id(tenant_id).await? {
            Some(tenant) => Ok(tenant),
            None => Err(TenantError::NotFound(identifier.to_string())),
        };
    }

    let code = identifier.to_lowercase();
    let mut unavailable: Option<TenantError> = None;

    match directory.find_by_code(&code).await {
        Ok(Some(tenant)) => return Ok(tenant),
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(identifier = %code, error = %err, "tenant lookup by code failed");
            unavailable = Some(err);
        }
    }

    match directory.find_by_domain(&code).await {
        Ok(Some(tenant)) => return Ok(tenant),
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(identifier = %code, error = %err, "tenant lookup by domain failed");
            unavailable = Some(err);
        }
    }

    // An exhausted chain that saw a storage failure is reported as such,
    // not as a clean miss.
    Err(unavailable.unwrap_or_else(|| TenantError::NotFound(identifier.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeDirectory {
        tenants: Vec<Tenant>,
        fail_code_lookups: bool,
        calls: Mutex<Vec<&'static str>>,
    }

    impl FakeDirectory {
        fn with_tenants(tenants: Vec<Tenant>) -> Self {
            Self {
                tenants,
                fail_code_lookups: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TenantDirectory for FakeDirectory {
        async fn find_by_id(&self, tenant_id: Uuid) -> Result<Option<Tenant>, TenantError> {
            self.record("id");
            Ok(self
                .tenants
                .iter()
                .find(|t| t.tenant_id == tenant_id && !t.is_deleted())
                .cloned())
        }

        async fn find_by_code(&self, code: &str) -> Result<Option<Tenant>, TenantError> {
            self.record("code");
            if self.fail_code_lookups {
                return Err(TenantError::DirectoryUnavailable(anyhow::anyhow!(
                    "connection refused"
                )));
            }
            Ok(self
                .tenants
                .iter()
                .find(|t| t.code == code && !t.is_deleted())
                .cloned())
        }

        async fn find_by_domain(&self, domain: &str) -> Result<Option<Tenant>, TenantError> {
            self.record("domain");
            Ok(self
                .tenants
                .iter()
                .find(|t| t.domain.as_deref() == Some(domain) && !t.is_deleted())
                .cloned())
        }
    }

    #[tokio::test]
    async fn test_resolves_by_code_with_normalization() {
        let directory =
            FakeDirectory::with_tenants(vec![Tenant::new("salwa", "Toko Salwa", None)]);

        for input in ["salwa", "SALWA", "  Salwa  "] {
            let tenant = resolve_tenant(&directory, input).await.unwrap();
            assert_eq!(tenant.code, "salwa");
        }
    }

    #[tokio::test]
    async fn test_repeated_resolution_yields_same_tenant() {
        let directory =
            FakeDirectory::with_tenants(vec![Tenant::new("salwa", "Toko Salwa", None)]);

        let first = resolve_tenant(&directory, "salwa").await.unwrap();
        let second = resolve_tenant(&directory, "salwa").await.unwrap();

        assert_eq!(first.tenant_id, second.tenant_id);
        // Both passes ran the same lookup strategy.
        assert_eq!(directory.calls(), vec!["code", "code"]);
    }

    #[tokio::test]
    async fn test_resolves_by_id() {
        let tenant = Tenant::new("salwa", "Toko Salwa", None);
        let id = tenant.tenant_id;
        let directory = FakeDirectory::with_tenants(vec![tenant]);

        let resolved = resolve_tenant(&directory, &id.to_string()).await.unwrap();
        assert_eq!(resolved.tenant_id, id);
        assert_eq!(directory.calls(), vec!["id"]);
    }

    #[tokio::test]
    async fn test_id_shaped_miss_does_not_fall_through_to_code() {
        let directory =
            FakeDirectory::with_tenants(vec![Tenant::new("salwa", "Toko Salwa", None)]);

        let missing_id = Uuid::new_v4().to_string();
        let err = resolve_tenant(&directory, &missing_id).await.unwrap_err();
        assert!(matches!(err, TenantError::NotFound(_)));
        // Only the id strategy may run for an id-shaped identifier.
        assert_eq!(directory.calls(), vec!["id"]);
    }

    #[tokio::test]
    async fn test_falls_back_to_domain_for_human_inputs() {
        let directory = FakeDirectory::with_tenants(vec![Tenant::new(
            "salwa",
            "Toko Salwa",
            Some("salwa.mysite.com"),
        )]);

        let tenant = resolve_tenant(&directory, "salwa.mysite.com").await.unwrap();
        assert_eq!(tenant.code, "salwa");
        assert_eq!(directory.calls(), vec!["code", "domain"]);
    }

    #[tokio::test]
    async fn test_unknown_code_is_not_found() {
        let directory = FakeDirectory::with_tenants(vec![]);
        let err = resolve_tenant(&directory, "unknown-code").await.unwrap_err();
        assert!(matches!(err, TenantError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_identifier_is_invalid() {
        let directory = FakeDirectory::with_tenants(vec![]);
        let err = resolve_tenant(&directory, "   ").await.unwrap_err();
        assert!(matches!(err, TenantError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_soft_deleted_tenant_is_not_found() {
        let mut tenant = Tenant::new("old-store", "Old Store", None);
        tenant.deleted_utc = Some(chrono::Utc::now());
        let directory = FakeDirectory::with_tenants(vec![tenant]);

        let err = resolve_tenant(&directory, "old-store").await.unwrap_err();
        assert!(matches!(err, TenantError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_failed_code_lookup_moves_to_domain_then_reports_unavailable() {
        let mut directory =
            FakeDirectory::with_tenants(vec![Tenant::new("salwa", "Toko Salwa", None)]);
        directory.fail_code_lookups = true;

        let err = resolve_tenant(&directory, "salwa").await.unwrap_err();
        assert!(matches!(err, TenantError::DirectoryUnavailable(_)));
        // The domain strategy was still attempted after the code failure.
        assert_eq!(directory.calls(), vec!["code", "domain"]);
    }

    #[test]
    fn test_looks_like_tenant_id() {
        assert!(looks_like_tenant_id("c9a1f9c2-87e5-4a0f-8a1b-49dc421cf16e"));
        assert!(looks_like_tenant_id("C9A1F9C2-87E5-4A0F-8A1B-49DC421CF16E"));
        assert!(!looks_like_tenant_id("salwa"));
        assert!(!looks_like_tenant_id("c9a1f9c287e54a0f8a1b49dc421cf16e"));
        assert!(!looks_like_tenant_id(""));
    }
}
