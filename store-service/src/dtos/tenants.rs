use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Tenant;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTenantRequest {
    /// Short unique slug; stored lowercase.
    #[validate(length(min = 2, max = 64, message = "Code must be 2-64 characters"))]
    #[schema(example = "salwa")]
    pub code: String,

    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Toko Salwa")]
    pub name: String,

    #[schema(example = "shop.salwa.example.com")]
    pub domain: Option<String>,

    pub address: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub phone: Option<String>,

    #[validate(nested)]
    pub owner: OwnerRequest,
}

/// The tenant's initial OWNER account, created atomically with the tenant.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OwnerRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Salwa")]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "salwa@example.com")]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTenantRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    pub domain: Option<String>,
    pub address: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TenantResponse {
    pub tenant_id: String,
    pub code: String,
    pub name: String,
    pub domain: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<&Tenant> for TenantResponse {
    fn from(tenant: &Tenant) -> Self {
        Self {
            tenant_id: tenant.tenant_id.to_string(),
            code: tenant.code.clone(),
            name: tenant.name.clone(),
            domain: tenant.domain.clone(),
            address: tenant.address.clone(),
            email: tenant.email.clone(),
            phone: tenant.phone.clone(),
        }
    }
}
