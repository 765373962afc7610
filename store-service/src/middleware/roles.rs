use axum::{extract::Request, middleware::Next, response::Response};
use service_core::error::AppError;

use crate::models::Role;
use crate::services::jwt::AccessTokenClaims;

/// Restrict a route group to the given roles.
///
/// Must run after [`auth_middleware`](super::auth_middleware): it reads the
/// claims that middleware verified. An unknown role code in the token is
/// treated as no role at all.
pub async fn require_roles(
    required: &'static [Role],
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = req
        .extensions()
        .get::<AccessTokenClaims>()
        .ok_or_else(|| AppError::Unauthorized(anyhow::anyhow!("Authentication required")))?;

    let role = Role::parse(&claims.role);
    if !role.is_some_and(|role| required.contains(&role)) {
        tracing::warn!(
            role = %claims.role,
            sub = %claims.sub,
            "role not permitted for this route"
        );
        return Err(AppError::Forbidden(anyhow::anyhow!(
            "Insufficient role for this operation"
        )));
    }

    Ok(next.run(req).await)
}

/// Staff roles: tenant management within the tenant.
pub const STAFF: &[Role] = &[Role::Owner, Role::Admin];

/// Owner only.
pub const OWNER: &[Role] = &[Role::Owner];

/// Route-layer form of [`require_roles`] for the staff set.
pub async fn require_staff(req: Request, next: Next) -> Result<Response, AppError> {
    require_roles(STAFF, req, next).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_sets() {
        assert!(STAFF.contains(&Role::Admin));
        assert!(!STAFF.contains(&Role::Customer));
        assert_eq!(OWNER, &[Role::Owner]);
    }
}
