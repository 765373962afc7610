pub mod config;
pub mod db;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod tenancy;
pub mod utils;

use std::sync::Arc;

use service_core::axum::{
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post},
    Json, Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    security_headers::security_headers_middleware, tracing::request_id_middleware,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{openapi::security::SecurityScheme, Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::StoreConfig;
use crate::services::{Database, JwtService};
use crate::tenancy::{tenant_context_middleware, PublicRoutes, TenantDirectory};

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::auth::me,
        handlers::tenants::create_tenant,
        handlers::tenants::list_tenants,
        handlers::tenants::get_tenant,
        handlers::tenants::update_tenant,
        handlers::tenants::delete_tenant,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::update_order_status,
        handlers::payments::create_payment,
        handlers::payments::list_payments,
        handlers::payments::get_payment,
        handlers::payments::update_payment_status,
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::get_user,
        handlers::users::update_user,
        handlers::users::delete_user,
        handlers::subscribe::subscribe,
        handlers::subscribe::list_subscribers,
        handlers::debug::debug_context,
    ),
    components(
        schemas(
            dtos::ErrorResponse,
            dtos::auth::RegisterRequest,
            dtos::auth::RegisterResponse,
            dtos::auth::LoginRequest,
            dtos::auth::RefreshRequest,
            dtos::auth::MeResponse,
            dtos::tenants::CreateTenantRequest,
            dtos::tenants::OwnerRequest,
            dtos::tenants::UpdateTenantRequest,
            dtos::tenants::TenantResponse,
            dtos::products::CreateProductRequest,
            dtos::products::UpdateProductRequest,
            dtos::orders::CreateOrderRequest,
            dtos::orders::OrderItemRequest,
            dtos::orders::UpdateOrderStatusRequest,
            dtos::orders::OrderResponse,
            dtos::payments::CreatePaymentRequest,
            dtos::payments::UpdatePaymentStatusRequest,
            dtos::subscribe::SubscribeRequest,
            dtos::users::CreateUserRequest,
            dtos::users::UpdateUserRequest,
            dtos::users::UserResponse,
            services::jwt::TokenResponse,
            tenancy::context::TenantContextView,
            models::Tenant,
            models::Product,
            models::Order,
            models::OrderItem,
            models::OrderStatus,
            models::Payment,
            models::PaymentStatus,
            models::Subscriber,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication and token management"),
        (name = "tenants", description = "Tenant registration and management"),
        (name = "products", description = "Tenant-scoped product catalog"),
        (name = "orders", description = "Tenant-scoped orders"),
        (name = "payments", description = "Tenant-scoped payments"),
        (name = "subscribe", description = "Tenant newsletter subscriptions"),
        (name = "users", description = "Tenant-scoped user management"),
        (name = "debug", description = "Diagnostics"),
        (name = "observability", description = "Service health"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: StoreConfig,
    pub db: Database,
    /// Tenant lookups go through the trait so tests can swap the backend.
    pub directory: Arc<dyn TenantDirectory>,
    pub jwt: JwtService,
    pub public_routes: Arc<PublicRoutes>,
}

pub fn build_router(state: AppState) -> Router {
    // Tenant management lives outside the tenant-scoped surface; mutations
    // verify the caller's token against the path tenant in the handlers.
    let tenant_routes = Router::new()
        .route(
            "/tenants",
            post(handlers::tenants::create_tenant).get(handlers::tenants::list_tenants),
        )
        .route(
            "/tenants/:id",
            get(handlers::tenants::get_tenant)
                .patch(handlers::tenants::update_tenant)
                .delete(handlers::tenants::delete_tenant),
        );

    let auth_routes = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh));

    // Storefront routes need only a resolved tenant, no principal.
    let storefront_routes = Router::new()
        .route("/products", get(handlers::products::list_products))
        .route("/products/:id", get(handlers::products::get_product))
        .route("/subscribe", post(handlers::subscribe::subscribe));

    let authed_routes = Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .route("/orders", post(handlers::orders::create_order))
        .route("/orders", get(handlers::orders::list_orders))
        .route("/orders/:id", get(handlers::orders::get_order))
        .route("/payments", post(handlers::payments::create_payment))
        .layer(from_fn(middleware::auth_middleware));

    let staff_routes = Router::new()
        .route("/products", post(handlers::products::create_product))
        .route(
            "/products/:id",
            patch(handlers::products::update_product).delete(handlers::products::delete_product),
        )
        .route(
            "/orders/:id/status",
            patch(handlers::orders::update_order_status),
        )
        .route("/payments", get(handlers::payments::list_payments))
        .route("/payments/:id", get(handlers::payments::get_payment))
        .route(
            "/payments/:id/status",
            patch(handlers::payments::update_payment_status),
        )
        .route("/subscribe", get(handlers::subscribe::list_subscribers))
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/users/:id",
            get(handlers::users::get_user)
                .patch(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .layer(from_fn(middleware::require_staff))
        .layer(from_fn(middleware::auth_middleware));

    let mut app = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/debug/context", get(handlers::debug::debug_context));

    let swagger_enabled = match state.config.environment {
        config::Environment::Dev => true,
        config::Environment::Prod => state.config.swagger.enabled == config::SwaggerMode::Public,
    };

    if swagger_enabled {
        app =
            app.merge(SwaggerUi::new("/docs").url("/.well-known/openapi.json", ApiDoc::openapi()));
    } else {
        app = app.route(
            "/.well-known/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .security
                .allowed_origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(e) => {
                        tracing::error!("Invalid CORS origin '{}': {}", origin, e);
                        None
                    }
                })
                .collect::<Vec<HeaderValue>>(),
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-tenant-id"),
            header::HeaderName::from_static("x-request-id"),
        ]);

    // Layer order matters: the last layer added runs first, so the request
    // passes cors, security headers, request id, tracing, then claims
    // decoding, then tenant resolution, before any route-level guard.
    app.merge(tenant_routes)
        .merge(auth_routes)
        .merge(storefront_routes)
        .merge(authed_routes)
        .merge(staff_routes)
        .with_state(state.clone())
        .layer(from_fn_with_state(
            state.clone(),
            tenant_context_middleware,
        ))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::claims_middleware,
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(
                |request: &service_core::axum::http::Request<_>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");

                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                },
            ),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
}

async fn root(
    service_core::axum::extract::State(state): service_core::axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": state.config.service_name,
        "version": state.config.service_version,
    }))
}

/// Service health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 503, description = "Service is unhealthy")
    ),
    tag = "observability"
)]
pub async fn health_check(
    service_core::axum::extract::State(state): service_core::axum::extract::State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.db.health_check().await.map_err(|e| {
        tracing::error!(error = %e, "Database health check failed");
        AppError::ServiceUnavailable
    })?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "service": state.config.service_name,
        "version": state.config.service_version,
    })))
}
