//! Tenant resolution and request context.
//!
//! Every non-public request is bound to exactly one tenant before any
//! handler runs. The pipeline is: classify the route (public routes skip
//! resolution entirely), extract a candidate identifier from the request
//! (header, cookie, verified token claim, then hostname subdomain), resolve
//! it against the tenant directory, and attach the outcome to the request
//! extensions. Downstream authorization and data access read the attached
//! [`TenantContext`] and nothing else.

pub mod context;
pub mod directory;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod resolver;
pub mod routes;

pub use context::{CurrentTenant, TenantContext};
pub use directory::TenantDirectory;
pub use error::TenantError;
pub use extract::{ExtractedIdentifier, ResolutionSource, extract_identifier};
pub use middleware::tenant_context_middleware;
pub use resolver::resolve_tenant;
pub use routes::PublicRoutes;
