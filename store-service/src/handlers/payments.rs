//! Payment handlers. Payments are recorded and transitioned through the
//! API; there is no gateway callback surface.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

use crate::dtos::payments::{CreatePaymentRequest, UpdatePaymentStatusRequest};
use crate::middleware::AuthUser;
use crate::tenancy::CurrentTenant;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment recorded", body = Payment),
        (status = 400, description = "Amount does not match order total", body = crate::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "payments"
)]
pub async fn create_payment(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    // Customers may only pay for their own orders.
    if !claims.role().is_staff() {
        let user_id = claims.user_id().map_err(AppError::Unauthorized)?;
        let order = state
            .db
            .find_order(tenant.tenant_id, req.order_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Order not found")))?;
        if order.user_id != user_id {
            return Err(AppError::NotFound(anyhow::anyhow!("Order not found")));
        }
    }

    let payment = state
        .db
        .create_payment(tenant.tenant_id, req.order_id, req.amount_cents, &req.method)
        .await?;

    tracing::info!(
        payment_id = %payment.payment_id,
        order_id = %payment.order_id,
        "payment recorded"
    );
    Ok((StatusCode::CREATED, Json(payment)))
}

#[utoipa::path(
    get,
    path = "/payments",
    responses((status = 200, description = "Payments in the tenant", body = [Payment])),
    security(("bearer_auth" = [])),
    tag = "payments"
)]
pub async fn list_payments(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
) -> Result<impl IntoResponse, AppError> {
    let payments = state.db.list_payments(tenant.tenant_id).await?;
    Ok(Json(payments))
}

#[utoipa::path(
    get,
    path = "/payments/{id}",
    params(("id" = Uuid, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment", body = Payment),
        (status = 404, description = "Not found in this tenant", body = crate::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "payments"
)]
pub async fn get_payment(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let payment = state
        .db
        .find_payment(tenant.tenant_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Payment not found")))?;
    Ok(Json(payment))
}

#[utoipa::path(
    patch,
    path = "/payments/{id}/status",
    params(("id" = Uuid, Path, description = "Payment ID")),
    request_body = UpdatePaymentStatusRequest,
    responses(
        (status = 200, description = "Updated payment", body = Payment),
        (status = 404, description = "Not found in this tenant", body = crate::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "payments"
)]
pub async fn update_payment_status(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePaymentStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payment = state
        .db
        .update_payment_status(tenant.tenant_id, id, req.status)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Payment not found")))?;

    tracing::info!(
        payment_id = %payment.payment_id,
        status = %payment.status_code,
        "payment status updated"
    );
    Ok(Json(payment))
}
