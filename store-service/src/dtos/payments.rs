use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::PaymentStatus;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentRequest {
    pub order_id: Uuid,

    #[validate(range(min = 1, message = "Amount must be positive"))]
    #[schema(example = 110000)]
    pub amount_cents: i64,

    #[validate(length(min = 1, message = "Method is required"))]
    #[schema(example = "bank_transfer")]
    pub method: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePaymentStatusRequest {
    pub status: PaymentStatus,
}
