//! Payment model - records against orders. Gateway integration is out of
//! scope; payments are created and transitioned by the API only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Success => "SUCCESS",
            PaymentStatus::Failed => "FAILED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "PENDING" => Some(PaymentStatus::Pending),
            "SUCCESS" => Some(PaymentStatus::Success),
            "FAILED" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

/// Payment entity.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Payment {
    pub payment_id: Uuid,
    #[serde(skip_serializing)]
    pub tenant_id: Uuid,
    pub order_id: Uuid,
    pub amount_cents: i64,
    pub method: String,
    pub status_code: String,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl Payment {
    pub fn new(tenant_id: Uuid, order_id: Uuid, amount_cents: i64, method: &str) -> Self {
        let now = Utc::now();
        Self {
            payment_id: Uuid::new_v4(),
            tenant_id,
            order_id,
            amount_cents,
            method: method.to_string(),
            status_code: PaymentStatus::Pending.as_str().to_string(),
            created_utc: now,
            updated_utc: now,
        }
    }

    pub fn status(&self) -> PaymentStatus {
        PaymentStatus::parse(&self.status_code).unwrap_or(PaymentStatus::Pending)
    }
}
