//! Product model - tenant-scoped catalog entries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Product entity. Prices are integer cents; no floating point money.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Product {
    pub product_id: Uuid,
    #[serde(skip_serializing)]
    pub tenant_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock: i32,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl Product {
    pub fn new(
        tenant_id: Uuid,
        name: &str,
        description: Option<String>,
        price_cents: i64,
        stock: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            product_id: Uuid::new_v4(),
            tenant_id,
            name: name.to_string(),
            description,
            price_cents,
            stock,
            created_utc: now,
            updated_utc: now,
        }
    }
}
