pub mod auth;
pub mod orders;
pub mod payments;
pub mod products;
pub mod subscribe;
pub mod tenants;
pub mod users;

use serde::Serialize;
use utoipa::ToSchema;

/// Error body shared by all endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Tenant not found")]
    pub error: String,
}
