use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::Cookie;
use serde::Serialize;

use crate::services::jwt::AccessTokenClaims;

/// Header carrying an explicit tenant identifier. Highest precedence.
pub const TENANT_HEADER: &str = "x-tenant-id";

/// Cookie carrying a tenant identifier (URL-encoded value).
pub const TENANT_COOKIE: &str = "tenant_id";

/// Where the winning identifier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    Header,
    Cookie,
    Claim,
    Hostname,
    None,
}

impl ResolutionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionSource::Header => "header",
            ResolutionSource::Cookie => "cookie",
            ResolutionSource::Claim => "claim",
            ResolutionSource::Hostname => "hostname",
            ResolutionSource::None => "none",
        }
    }
}

/// A candidate tenant identifier pulled from the request. Trimmed but not
/// lowercased; lowercasing happens at resolution.
#[derive(Debug, Clone)]
pub struct ExtractedIdentifier {
    pub value: String,
    pub source: ResolutionSource,
}

/// Pull a candidate tenant identifier from the request.
///
/// Precedence, first non-empty wins: `X-Tenant-Id` header, `tenant_id`
/// cookie, tenant claim from already-verified token claims, hostname
/// subdomain. Claims come from the auth layer which runs earlier in the
/// pipeline; they are trusted here because the token signature was already
/// checked.
pub fn extract_identifier(
    headers: &HeaderMap,
    claims: Option<&AccessTokenClaims>,
) -> Option<ExtractedIdentifier> {
    if let Some(value) = from_header(headers) {
        return Some(ExtractedIdentifier {
            value,
            source: ResolutionSource::Header,
        });
    }

    if let Some(value) = from_cookie(headers) {
        return Some(ExtractedIdentifier {
            value,
            source: ResolutionSource::Cookie,
        });
    }

    if let Some(value) = claims.and_then(from_claims) {
        return Some(ExtractedIdentifier {
            value,
            source: ResolutionSource::Claim,
        });
    }

    if let Some(value) = from_host(headers) {
        return Some(ExtractedIdentifier {
            value,
            source: ResolutionSource::Hostname,
        });
    }

    None
}

/// Trim; empty means absent.
fn normalize(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn from_header(headers: &HeaderMap) -> Option<String> {
    // HeaderMap names are case-insensitive; get() returns the first value
    // of a repeated header.
    headers
        .get(TENANT_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(normalize)
}

fn from_cookie(headers: &HeaderMap) -> Option<String> {
    for raw in headers.get_all(header::COOKIE) {
        let Ok(raw) = raw.to_str() else { continue };
        for part in raw.split(';') {
            let Ok(cookie) = Cookie::parse_encoded(part.trim()) else {
                continue;
            };
            if cookie.name() == TENANT_COOKIE {
                if let Some(value) = normalize(cookie.value()) {
                    return Some(value);
                }
            }
        }
    }
    None
}

fn from_claims(claims: &AccessTokenClaims) -> Option<String> {
    normalize(&claims.tenant_id).or_else(|| normalize(&claims.tenant_code))
}

/// Leftmost host label is a candidate tenant code when the host has more
/// than two dot-separated labels and is not a `www` alias.
fn from_host(headers: &HeaderMap) -> Option<String> {
    let host = headers
        .get("x-forwarded-host")
        .or_else(|| headers.get(header::HOST))
        .and_then(|value| value.to_str().ok())?;

    let host = host.split(':').next().unwrap_or(host);
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() <= 2 {
        return None;
    }

    let subdomain = labels[0];
    if subdomain.eq_ignore_ascii_case("www") {
        return None;
    }

    normalize(subdomain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    fn claims_with_tenant(tenant_id: &str, tenant_code: &str) -> AccessTokenClaims {
        AccessTokenClaims {
            sub: "user-1".to_string(),
            email: "user@example.com".to_string(),
            role: "CUSTOMER".to_string(),
            tenant_id: tenant_id.to_string(),
            tenant_code: tenant_code.to_string(),
            iat: 0,
            exp: 0,
            jti: "jti".to_string(),
        }
    }

    #[test]
    fn test_header_wins_over_cookie() {
        let headers = headers(&[
            ("x-tenant-id", "from-header"),
            ("cookie", "tenant_id=from-cookie"),
        ]);
        let extracted = extract_identifier(&headers, None).unwrap();
        assert_eq!(extracted.value, "from-header");
        assert_eq!(extracted.source, ResolutionSource::Header);
    }

    #[test]
    fn test_header_name_is_case_insensitive() {
        let headers = headers(&[("X-Tenant-Id", "salwa")]);
        let extracted = extract_identifier(&headers, None).unwrap();
        assert_eq!(extracted.value, "salwa");
    }

    #[test]
    fn test_header_value_is_trimmed_not_lowercased() {
        let headers = headers(&[("x-tenant-id", "  SALWA  ")]);
        let extracted = extract_identifier(&headers, None).unwrap();
        assert_eq!(extracted.value, "SALWA");
    }

    #[test]
    fn test_empty_header_falls_through_to_cookie() {
        let headers = headers(&[
            ("x-tenant-id", "   "),
            ("cookie", "session=abc; tenant_id=salwa; theme=dark"),
        ]);
        let extracted = extract_identifier(&headers, None).unwrap();
        assert_eq!(extracted.value, "salwa");
        assert_eq!(extracted.source, ResolutionSource::Cookie);
    }

    #[test]
    fn test_cookie_value_is_url_decoded() {
        let headers = headers(&[("cookie", "tenant_id=toko%20salwa")]);
        let extracted = extract_identifier(&headers, None).unwrap();
        assert_eq!(extracted.value, "toko salwa");
    }

    #[test]
    fn test_repeated_header_takes_first_value() {
        let headers = headers(&[("x-tenant-id", "first"), ("x-tenant-id", "second")]);
        let extracted = extract_identifier(&headers, None).unwrap();
        assert_eq!(extracted.value, "first");
    }

    #[test]
    fn test_claims_fill_in_when_no_header_or_cookie() {
        let headers = headers(&[]);
        let claims = claims_with_tenant("c9a1f9c2-87e5-4a0f-8a1b-49dc421cf16e", "salwa");
        let extracted = extract_identifier(&headers, Some(&claims)).unwrap();
        assert_eq!(extracted.value, "c9a1f9c2-87e5-4a0f-8a1b-49dc421cf16e");
        assert_eq!(extracted.source, ResolutionSource::Claim);
    }

    #[test]
    fn test_claims_fall_back_to_tenant_code() {
        let headers = headers(&[]);
        let claims = claims_with_tenant("", "salwa");
        let extracted = extract_identifier(&headers, Some(&claims)).unwrap();
        assert_eq!(extracted.value, "salwa");
    }

    #[test]
    fn test_subdomain_is_extracted_from_host() {
        let headers = headers(&[("host", "salwa.mysite.com")]);
        let extracted = extract_identifier(&headers, None).unwrap();
        assert_eq!(extracted.value, "salwa");
        assert_eq!(extracted.source, ResolutionSource::Hostname);
    }

    #[test]
    fn test_subdomain_ignores_port() {
        let headers = headers(&[("host", "salwa.mysite.com:8080")]);
        let extracted = extract_identifier(&headers, None).unwrap();
        assert_eq!(extracted.value, "salwa");
    }

    #[test]
    fn test_two_label_host_is_not_a_subdomain() {
        let headers = headers(&[("host", "mysite.com")]);
        assert!(extract_identifier(&headers, None).is_none());
    }

    #[test]
    fn test_www_is_not_a_tenant_code() {
        let headers = headers(&[("host", "www.mysite.com")]);
        assert!(extract_identifier(&headers, None).is_none());
    }

    #[test]
    fn test_forwarded_host_wins_over_host() {
        let headers = headers(&[
            ("x-forwarded-host", "salwa.mysite.com"),
            ("host", "internal.lb.local"),
        ]);
        let extracted = extract_identifier(&headers, None).unwrap();
        assert_eq!(extracted.value, "salwa");
    }

    #[test]
    fn test_nothing_found() {
        let headers = headers(&[("host", "localhost")]);
        assert!(extract_identifier(&headers, None).is_none());
    }
}
