//! Tests against the full service router: route classification and tenant
//! gating as wired for production, without touching a live database.

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use store_service::build_router;
use tower::util::ServiceExt;

use common::{deleted_tenant, tenant, test_state, InMemoryTenantDirectory};

#[tokio::test]
async fn test_root_is_public() {
    let state = test_state(Arc::new(InMemoryTenantDirectory::new(vec![])));
    let app = build_router(state);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_openapi_json_is_served_when_swagger_disabled() {
    let state = test_state(Arc::new(InMemoryTenantDirectory::new(vec![])));
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/.well-known/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_tenant_scoped_route_requires_identifier() {
    let state = test_state(Arc::new(InMemoryTenantDirectory::new(vec![tenant(
        "salwa", None,
    )])));
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/products")
                .header("host", "localhost")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_tenant_scoped_route_rejects_unknown_tenant() {
    let state = test_state(Arc::new(InMemoryTenantDirectory::new(vec![tenant(
        "salwa", None,
    )])));
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/products")
                .header("x-tenant-id", "nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_subscribe_requires_tenant_identifier() {
    let state = test_state(Arc::new(InMemoryTenantDirectory::new(vec![tenant(
        "salwa", None,
    )])));
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/subscribe")
                .header("host", "localhost")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"email":"rina@example.com"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_subscriber_list_requires_authentication() {
    let state = test_state(Arc::new(InMemoryTenantDirectory::new(vec![tenant(
        "salwa", None,
    )])));
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/subscribe")
                .header("x-tenant-id", "salwa")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_for_deleted_tenant_is_unauthorized() {
    let gone = deleted_tenant("closed-shop");
    let customer = store_service::models::User::new(
        gone.tenant_id,
        "Rina",
        "rina@example.com",
        "hash".to_string(),
        store_service::models::Role::Customer,
    );
    let state = test_state(Arc::new(InMemoryTenantDirectory::new(vec![gone.clone()])));
    let refresh_token = state.jwt.generate_refresh_token(&customer, &gone).unwrap();
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/auth/refresh")
                .header("content-type", "application/json")
                .body(Body::from(format!(
                    r#"{{"refresh_token":"{refresh_token}"}}"#
                )))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_debug_context_echoes_resolution() {
    let salwa = tenant("salwa", None);
    let tenant_id = salwa.tenant_id;
    let state = test_state(Arc::new(InMemoryTenantDirectory::new(vec![salwa])));
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/debug/context")
                .header("x-tenant-id", "salwa")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["tenant_id"], tenant_id.to_string());
    assert_eq!(body["source"], "header");
}

#[tokio::test]
async fn test_debug_context_reports_none_without_identifier() {
    let state = test_state(Arc::new(InMemoryTenantDirectory::new(vec![])));
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/debug/context")
                .header("host", "localhost")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["source"], "none");
}

#[tokio::test]
async fn test_staff_route_requires_authentication() {
    let state = test_state(Arc::new(InMemoryTenantDirectory::new(vec![tenant(
        "salwa", None,
    )])));
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/products")
                .header("x-tenant-id", "salwa")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_customer_cannot_reach_staff_route() {
    let salwa = tenant("salwa", None);
    let customer = store_service::models::User::new(
        salwa.tenant_id,
        "Siti",
        "siti@example.com",
        "hash".to_string(),
        store_service::models::Role::Customer,
    );
    let state = test_state(Arc::new(InMemoryTenantDirectory::new(vec![salwa.clone()])));
    let token = state.jwt.generate_access_token(&customer, &salwa).unwrap();
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/products")
                .header("x-tenant-id", "salwa")
                .header("authorization", format!("Bearer {token}"))
                .header("content-type", "application/json")
                .body(Body::from(r#"{"name":"Kopi","price_cents":1000,"stock":5}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
