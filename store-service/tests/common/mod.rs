//! Shared test fixtures: an in-memory tenant directory and an `AppState`
//! that never touches a live database.
#![allow(dead_code)]

use std::sync::Arc;

use service_core::async_trait::async_trait;
use sqlx::postgres::PgPool;
use store_service::config::{
    DatabaseConfig, Environment, JwtConfig, SecurityConfig, StoreConfig, SwaggerConfig,
    SwaggerMode,
};
use store_service::models::Tenant;
use store_service::services::{Database, JwtService};
use store_service::tenancy::{PublicRoutes, TenantDirectory, TenantError};
use store_service::AppState;
use uuid::Uuid;

/// Directory backed by a fixed set of tenants. `failing` simulates a
/// storage outage on every lookup.
pub struct InMemoryTenantDirectory {
    tenants: Vec<Tenant>,
    failing: bool,
}

impl InMemoryTenantDirectory {
    pub fn new(tenants: Vec<Tenant>) -> Self {
        Self {
            tenants,
            failing: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            tenants: Vec::new(),
            failing: true,
        }
    }

    fn live(&self) -> impl Iterator<Item = &Tenant> {
        self.tenants.iter().filter(|tenant| !tenant.is_deleted())
    }

    fn check_available(&self) -> Result<(), TenantError> {
        if self.failing {
            Err(TenantError::DirectoryUnavailable(anyhow::anyhow!(
                "simulated outage"
            )))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TenantDirectory for InMemoryTenantDirectory {
    async fn find_by_id(&self, tenant_id: Uuid) -> Result<Option<Tenant>, TenantError> {
        self.check_available()?;
        Ok(self.live().find(|t| t.tenant_id == tenant_id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Tenant>, TenantError> {
        self.check_available()?;
        Ok(self.live().find(|t| t.code == code).cloned())
    }

    async fn find_by_domain(&self, domain: &str) -> Result<Option<Tenant>, TenantError> {
        self.check_available()?;
        Ok(self
            .live()
            .find(|t| t.domain.as_deref() == Some(domain))
            .cloned())
    }
}

pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub fn test_config() -> StoreConfig {
    StoreConfig {
        common: service_core::config::Config { port: 0 },
        environment: Environment::Dev,
        service_name: "store-service".to_string(),
        service_version: "0.0.0-test".to_string(),
        log_level: "error".to_string(),
        database: DatabaseConfig {
            url: "postgres://localhost/store_test".to_string(),
            max_connections: 2,
            min_connections: 0,
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_minutes: 15,
            refresh_token_expiry_days: 7,
        },
        security: SecurityConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        swagger: SwaggerConfig {
            enabled: SwaggerMode::Disabled,
        },
    }
}

/// Build an `AppState` over the given directory. The SQL pool is lazy and
/// is never connected by the tenant-resolution tests.
pub fn test_state(directory: Arc<dyn TenantDirectory>) -> AppState {
    let config = test_config();
    let pool = PgPool::connect_lazy(&config.database.url).expect("lazy pool");
    let jwt = JwtService::new(&config.jwt).expect("jwt service");

    AppState {
        config,
        db: Database::new(pool),
        directory,
        jwt,
        public_routes: Arc::new(PublicRoutes::default()),
    }
}

pub fn tenant(code: &str, domain: Option<&str>) -> Tenant {
    Tenant::new(code, &format!("Store {code}"), domain)
}

pub fn deleted_tenant(code: &str) -> Tenant {
    let mut tenant = tenant(code, None);
    tenant.deleted_utc = Some(chrono::Utc::now());
    tenant
}
