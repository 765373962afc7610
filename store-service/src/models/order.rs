//! Order model - tenant-scoped orders with line items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Order lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "PENDING" => Some(OrderStatus::Pending),
            "PAID" => Some(OrderStatus::Paid),
            "SHIPPED" => Some(OrderStatus::Shipped),
            "COMPLETED" => Some(OrderStatus::Completed),
            "CANCELLED" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

/// Order entity.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Order {
    pub order_id: Uuid,
    #[serde(skip_serializing)]
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub status_code: String,
    pub total_cents: i64,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl Order {
    pub fn new(tenant_id: Uuid, user_id: Uuid, total_cents: i64) -> Self {
        let now = Utc::now();
        Self {
            order_id: Uuid::new_v4(),
            tenant_id,
            user_id,
            status_code: OrderStatus::Pending.as_str().to_string(),
            total_cents,
            created_utc: now,
            updated_utc: now,
        }
    }

    pub fn status(&self) -> OrderStatus {
        OrderStatus::parse(&self.status_code).unwrap_or(OrderStatus::Pending)
    }
}

/// One line of an order; unit price is captured at order time.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct OrderItem {
    pub order_item_id: Uuid,
    #[serde(skip_serializing)]
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Paid,
            OrderStatus::Shipped,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("REFUNDED"), None);
    }
}
