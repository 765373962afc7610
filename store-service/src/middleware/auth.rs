use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use service_core::error::AppError;

use crate::services::jwt::AccessTokenClaims;
use crate::AppState;

/// Decode a bearer token if one is present and stash the claims in request
/// extensions. Runs on every request, before tenant resolution, so the
/// resolver can fall back to the token's tenant claim.
///
/// A present-but-invalid token is rejected here; an absent token is not an
/// error, route guards decide whether authentication is required.
pub async fn claims_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if let Some(token) = token {
        let claims = state.jwt.validate_access_token(token).map_err(|e| {
            tracing::debug!(error = %e, "rejecting invalid bearer token");
            AppError::AuthError(anyhow::anyhow!("Invalid or expired token"))
        })?;
        req.extensions_mut().insert(claims);
    }

    Ok(next.run(req).await)
}

/// Middleware to require authentication on a route group.
pub async fn auth_middleware(req: Request, next: Next) -> Result<Response, AppError> {
    if req.extensions().get::<AccessTokenClaims>().is_none() {
        return Err(AppError::Unauthorized(anyhow::anyhow!(
            "Missing or invalid Authorization header"
        )));
    }
    Ok(next.run(req).await)
}

/// Extractor to easily get claims in handlers.
pub struct AuthUser(pub AccessTokenClaims);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts.extensions.get::<AccessTokenClaims>().ok_or_else(|| {
            AppError::Unauthorized(anyhow::anyhow!("Authentication required"))
        })?;

        Ok(AuthUser(claims.clone()))
    }
}
