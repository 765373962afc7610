pub mod auth;
pub mod roles;

pub use auth::{auth_middleware, claims_middleware, AuthUser};
pub use roles::{require_roles, require_staff, OWNER, STAFF};
