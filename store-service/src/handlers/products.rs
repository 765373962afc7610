//! Product catalog handlers, all scoped to the resolved tenant.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use service_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

use crate::dtos::products::{CreateProductRequest, UpdateProductRequest};
use crate::models::Product;
use crate::tenancy::CurrentTenant;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/products",
    responses((status = 200, description = "Products in the tenant", body = [Product])),
    tag = "products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
) -> Result<impl IntoResponse, AppError> {
    let products = state.db.list_products(tenant.tenant_id).await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 404, description = "Not found in this tenant", body = crate::dtos::ErrorResponse),
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let product = state
        .db
        .find_product(tenant.tenant_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Product not found")))?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses((status = 201, description = "Product created", body = Product)),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    Json(req): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let product = Product::new(
        tenant.tenant_id,
        &req.name,
        req.description.clone(),
        req.price_cents,
        req.stock,
    );
    state.db.insert_product(&product).await?;

    tracing::info!(product_id = %product.product_id, tenant_id = %tenant.tenant_id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    patch,
    path = "/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 404, description = "Not found in this tenant", body = crate::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let mut product = state
        .db
        .find_product(tenant.tenant_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Product not found")))?;

    if let Some(name) = req.name {
        product.name = name;
    }
    if let Some(description) = req.description {
        product.description = Some(description);
    }
    if let Some(price_cents) = req.price_cents {
        product.price_cents = price_cents;
    }
    if let Some(stock) = req.stock {
        product.stock = stock;
    }
    product.updated_utc = Utc::now();

    state.db.update_product(&product).await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Not found in this tenant", body = crate::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !state.db.delete_product(tenant.tenant_id, id).await? {
        return Err(AppError::NotFound(anyhow::anyhow!("Product not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
