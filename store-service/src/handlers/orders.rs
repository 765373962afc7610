//! Order handlers. Customers operate on their own orders; staff see every
//! order in the tenant.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

use crate::dtos::orders::{CreateOrderRequest, OrderResponse, UpdateOrderStatusRequest};
use crate::middleware::AuthUser;
use crate::tenancy::CurrentTenant;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Insufficient stock", body = crate::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let user_id = claims.user_id().map_err(AppError::Unauthorized)?;
    let items: Vec<(Uuid, i32)> = req
        .items
        .iter()
        .map(|item| (item.product_id, item.quantity))
        .collect();

    let (order, items) = state.db.create_order(tenant.tenant_id, user_id, &items).await?;

    tracing::info!(
        order_id = %order.order_id,
        tenant_id = %tenant.tenant_id,
        total_cents = order.total_cents,
        "order created"
    );
    Ok((StatusCode::CREATED, Json(OrderResponse { order, items })))
}

#[utoipa::path(
    get,
    path = "/orders",
    responses((status = 200, description = "Orders visible to the caller", body = [Order])),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let filter = if claims.role().is_staff() {
        None
    } else {
        Some(claims.user_id().map_err(AppError::Unauthorized)?)
    };

    let orders = state.db.list_orders(tenant.tenant_id, filter).await?;
    Ok(Json(orders))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with items", body = OrderResponse),
        (status = 404, description = "Not found in this tenant", body = crate::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let order = state
        .db
        .find_order(tenant.tenant_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Order not found")))?;

    if !claims.role().is_staff() {
        let user_id = claims.user_id().map_err(AppError::Unauthorized)?;
        if order.user_id != user_id {
            // Hide other customers' orders entirely.
            return Err(AppError::NotFound(anyhow::anyhow!("Order not found")));
        }
    }

    let items = state.db.list_order_items(order.order_id).await?;
    Ok(Json(OrderResponse { order, items }))
}

#[utoipa::path(
    patch,
    path = "/orders/{id}/status",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Updated order", body = Order),
        (status = 404, description = "Not found in this tenant", body = crate::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let order = state
        .db
        .update_order_status(tenant.tenant_id, id, req.status)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Order not found")))?;

    tracing::info!(order_id = %order.order_id, status = %order.status_code, "order status updated");
    Ok(Json(order))
}
