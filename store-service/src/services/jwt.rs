use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::models::{Tenant, User};

/// JWT service for token generation and validation (HS256, shared secret).
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry_minutes: i64,
    refresh_token_expiry_days: i64,
}

/// Claims for access tokens (short-lived).
///
/// `tenant_id` and `tenant_code` bind the token to the tenant it was issued
/// under; the tenant middleware rejects requests where they disagree with
/// the resolved tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    pub role: String,
    pub tenant_id: String,
    pub tenant_code: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// JWT ID
    pub jti: String,
}

impl AccessTokenClaims {
    pub fn user_id(&self) -> Result<Uuid, anyhow::Error> {
        Uuid::parse_str(&self.sub).map_err(|e| anyhow::anyhow!("Invalid subject claim: {}", e))
    }

    pub fn role(&self) -> crate::models::Role {
        crate::models::Role::parse(&self.role).unwrap_or(crate::models::Role::Customer)
    }
}

/// Claims for refresh tokens (long-lived).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    pub sub: String,
    pub tenant_id: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Token pair returned to the client.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl JwtService {
    pub fn new(config: &JwtConfig) -> Result<Self, anyhow::Error> {
        if config.secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "JWT secret must be at least 32 bytes, got {}",
                config.secret.len()
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            access_token_expiry_minutes: config.access_token_expiry_minutes,
            refresh_token_expiry_days: config.refresh_token_expiry_days,
        })
    }

    /// Generate an access token for a user under a tenant.
    pub fn generate_access_token(
        &self,
        user: &User,
        tenant: &Tenant,
    ) -> Result<String, anyhow::Error> {
        let now = Utc::now();
        let exp = now + Duration::minutes(self.access_token_expiry_minutes);

        let claims = AccessTokenClaims {
            sub: user.user_id.to_string(),
            email: user.email.clone(),
            role: user.role_code.clone(),
            tenant_id: tenant.tenant_id.to_string(),
            tenant_code: tenant.code.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to encode access token: {}", e))
    }

    /// Generate a refresh token bound to the same tenant.
    pub fn generate_refresh_token(
        &self,
        user: &User,
        tenant: &Tenant,
    ) -> Result<String, anyhow::Error> {
        let now = Utc::now();
        let exp = now + Duration::days(self.refresh_token_expiry_days);

        let claims = RefreshTokenClaims {
            sub: user.user_id.to_string(),
            tenant_id: tenant.tenant_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to encode refresh token: {}", e))
    }

    /// Issue an access/refresh pair.
    pub fn issue_token_pair(
        &self,
        user: &User,
        tenant: &Tenant,
    ) -> Result<TokenResponse, anyhow::Error> {
        Ok(TokenResponse {
            access_token: self.generate_access_token(user, tenant)?,
            refresh_token: self.generate_refresh_token(user, tenant)?,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry_minutes * 60,
        })
    }

    pub fn validate_access_token(
        &self,
        token: &str,
    ) -> Result<AccessTokenClaims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<AccessTokenClaims>(token, &self.decoding_key, &validation).map(|data| data.claims)
    }

    pub fn validate_refresh_token(
        &self,
        token: &str,
    ) -> Result<RefreshTokenClaims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<RefreshTokenClaims>(token, &self.decoding_key, &validation).map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn test_service(expiry_minutes: i64) -> JwtService {
        JwtService::new(&JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            access_token_expiry_minutes: expiry_minutes,
            refresh_token_expiry_days: 7,
        })
        .unwrap()
    }

    fn test_user_and_tenant() -> (User, Tenant) {
        let tenant = Tenant::new("salwa", "Toko Salwa", None);
        let user = User::new(
            tenant.tenant_id,
            "Siti",
            "siti@example.com",
            "hash".to_string(),
            Role::Customer,
        );
        (user, tenant)
    }

    #[test]
    fn test_access_token_round_trip() {
        let jwt = test_service(15);
        let (user, tenant) = test_user_and_tenant();

        let token = jwt.generate_access_token(&user, &tenant).unwrap();
        let claims = jwt.validate_access_token(&token).unwrap();

        assert_eq!(claims.sub, user.user_id.to_string());
        assert_eq!(claims.tenant_id, tenant.tenant_id.to_string());
        assert_eq!(claims.tenant_code, "salwa");
        assert_eq!(claims.role(), Role::Customer);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let jwt = test_service(-10);
        let (user, tenant) = test_user_and_tenant();

        let token = jwt.generate_access_token(&user, &tenant).unwrap();
        assert!(jwt.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let jwt = test_service(15);
        let (user, tenant) = test_user_and_tenant();

        let mut token = jwt.generate_access_token(&user, &tenant).unwrap();
        token.push('x');
        assert!(jwt.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_refresh_token_carries_tenant() {
        let jwt = test_service(15);
        let (user, tenant) = test_user_and_tenant();

        let token = jwt.generate_refresh_token(&user, &tenant).unwrap();
        let claims = jwt.validate_refresh_token(&token).unwrap();
        assert_eq!(claims.tenant_id, tenant.tenant_id.to_string());
    }

    #[test]
    fn test_short_secret_is_rejected() {
        let result = JwtService::new(&JwtConfig {
            secret: "short".to_string(),
            access_token_expiry_minutes: 15,
            refresh_token_expiry_days: 7,
        });
        assert!(result.is_err());
    }
}
