use axum::http::Method;

/// One exemption rule. Rules are checked in order; first match wins.
#[derive(Debug, Clone)]
enum RouteRule {
    /// Path matches exactly.
    Exact(&'static str),
    /// Path is the prefix itself or continues with `/` after it.
    Prefix(&'static str),
    /// Exact path, but only for one method.
    MethodExact(Method, &'static str),
}

/// Decides which requests are exempt from tenant resolution.
///
/// Total and side-effect free: an unmatched path is NOT public (fail
/// closed). `OPTIONS` preflight is always public regardless of path.
#[derive(Debug, Clone)]
pub struct PublicRoutes {
    rules: Vec<RouteRule>,
}

impl Default for PublicRoutes {
    fn default() -> Self {
        Self {
            rules: vec![
                // Root landing and static noise
                RouteRule::Exact("/"),
                RouteRule::Exact("/favicon.ico"),
                // Health and diagnostics
                RouteRule::Exact("/health"),
                RouteRule::Prefix("/debug"),
                // API documentation
                RouteRule::Prefix("/docs"),
                RouteRule::Prefix("/swagger-ui"),
                RouteRule::Exact("/.well-known/openapi.json"),
                // Authentication entry points; the handlers resolve their
                // tenant from the request body instead.
                RouteRule::MethodExact(Method::POST, "/auth/login"),
                RouteRule::MethodExact(Method::POST, "/auth/register"),
                RouteRule::MethodExact(Method::POST, "/auth/refresh"),
                // Tenant self-registration and platform-level management
                RouteRule::Prefix("/tenants"),
            ],
        }
    }
}

impl PublicRoutes {
    /// Whether tenant resolution should be skipped for this request.
    ///
    /// `path` is the request path with any query string already stripped and
    /// guaranteed to start with `/`; a defensive strip is applied anyway.
    pub fn is_public(&self, method: &Method, path: &str) -> bool {
        if method == Method::OPTIONS {
            return true;
        }

        let path = path.split('?').next().unwrap_or("/");

        self.rules.iter().any(|rule| match rule {
            RouteRule::Exact(p) => path == *p,
            RouteRule::Prefix(p) => matches_prefix(path, p),
            RouteRule::MethodExact(m, p) => method == m && path == *p,
        })
    }
}

/// `/auth` matches `/auth` and `/auth/login`, but not `/authx`.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_and_prefix_rules() {
        let routes = PublicRoutes::default();
        assert!(routes.is_public(&Method::GET, "/"));
        assert!(routes.is_public(&Method::GET, "/health"));
        assert!(routes.is_public(&Method::GET, "/docs"));
        assert!(routes.is_public(&Method::GET, "/docs/index.html"));
        assert!(routes.is_public(&Method::GET, "/debug/context"));
        assert!(routes.is_public(&Method::GET, "/tenants"));
        assert!(routes.is_public(&Method::POST, "/tenants/register"));
    }

    #[test]
    fn test_prefix_does_not_match_sibling_paths() {
        let routes = PublicRoutes::default();
        assert!(!routes.is_public(&Method::GET, "/docsx"));
        assert!(!routes.is_public(&Method::GET, "/debugging"));
    }

    #[test]
    fn test_method_qualified_rules() {
        let routes = PublicRoutes::default();
        assert!(routes.is_public(&Method::POST, "/auth/login"));
        assert!(routes.is_public(&Method::POST, "/auth/register"));
        assert!(!routes.is_public(&Method::GET, "/auth/login"));
    }

    #[test]
    fn test_options_is_always_public() {
        let routes = PublicRoutes::default();
        assert!(routes.is_public(&Method::OPTIONS, "/orders"));
        assert!(routes.is_public(&Method::OPTIONS, "/anything/at/all"));
    }

    #[test]
    fn test_unmatched_paths_fail_closed() {
        let routes = PublicRoutes::default();
        assert!(!routes.is_public(&Method::GET, "/products"));
        assert!(!routes.is_public(&Method::GET, "/orders/123"));
        assert!(!routes.is_public(&Method::GET, "/users/me"));
    }

    #[test]
    fn test_query_string_is_ignored() {
        let routes = PublicRoutes::default();
        assert!(routes.is_public(&Method::GET, "/health?verbose=1"));
        assert!(!routes.is_public(&Method::GET, "/products?page=2"));
    }
}
