//! Newsletter subscriber - tenant-scoped mailing list entries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Subscriber {
    pub subscriber_id: Uuid,
    #[serde(skip_serializing)]
    pub tenant_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub subscribed: bool,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl Subscriber {
    pub fn new(tenant_id: Uuid, email: &str, name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            subscriber_id: Uuid::new_v4(),
            tenant_id,
            email: email.to_string(),
            name,
            subscribed: true,
            created_utc: now,
            updated_utc: now,
        }
    }
}
