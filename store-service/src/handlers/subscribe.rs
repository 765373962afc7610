//! Newsletter subscription handlers.
//!
//! Subscribing is open to anyone on the resolved tenant's storefront;
//! reading the list is staff-only.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;
use validator::Validate;

use crate::dtos::subscribe::SubscribeRequest;
use crate::models::Subscriber;
use crate::tenancy::CurrentTenant;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/subscribe",
    request_body = SubscribeRequest,
    responses(
        (status = 201, description = "Subscription recorded", body = Subscriber),
        (status = 400, description = "Missing or invalid tenant", body = crate::dtos::ErrorResponse),
    ),
    tag = "subscribe"
)]
pub async fn subscribe(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    Json(req): Json<SubscribeRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let subscriber = Subscriber::new(tenant.tenant_id, &req.email, req.name.clone());
    let subscriber = state.db.upsert_subscriber(&subscriber).await?;

    tracing::info!(tenant_id = %tenant.tenant_id, "subscriber recorded");
    Ok((StatusCode::CREATED, Json(subscriber)))
}

#[utoipa::path(
    get,
    path = "/subscribe",
    responses((status = 200, description = "Subscribers in the tenant", body = [Subscriber])),
    security(("bearer_auth" = [])),
    tag = "subscribe"
)]
pub async fn list_subscribers(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
) -> Result<impl IntoResponse, AppError> {
    let subscribers = state.db.list_subscribers(tenant.tenant_id).await?;
    Ok(Json(subscribers))
}
