//! PostgreSQL database service for store-service.
//!
//! All tenant-scoped queries take the resolved tenant id explicitly; there
//! is no query path that reads another tenant's rows. Tenants are soft
//! deleted: reads filter on `deleted_utc IS NULL`.

use async_trait::async_trait;
use chrono::Utc;
use service_core::error::AppError;
use sqlx::postgres::PgPool;
use uuid::Uuid;

use crate::models::{
    Order, OrderItem, OrderStatus, Payment, PaymentStatus, Product, Subscriber, Tenant, User,
};
use crate::tenancy::{TenantDirectory, TenantError};

/// PostgreSQL database wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Health check - ping the database.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Database health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!("Database health check failed: {}", e))
            })?;
        Ok(())
    }

    // ==================== Tenant Operations ====================

    pub async fn find_tenant_by_id(&self, tenant_id: Uuid) -> Result<Option<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants WHERE tenant_id = $1 AND deleted_utc IS NULL",
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    pub async fn find_tenant_by_code(&self, code: &str) -> Result<Option<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants WHERE code = LOWER($1) AND deleted_utc IS NULL",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    pub async fn find_tenant_by_domain(&self, domain: &str) -> Result<Option<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants WHERE domain = LOWER($1) AND deleted_utc IS NULL",
        )
        .bind(domain)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    pub async fn list_tenants(&self) -> Result<Vec<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants WHERE deleted_utc IS NULL ORDER BY created_utc DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    pub async fn insert_tenant(&self, tenant: &Tenant) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO tenants (tenant_id, code, name, domain, address, email, phone, created_utc, updated_utc, deleted_utc)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(tenant.tenant_id)
        .bind(&tenant.code)
        .bind(&tenant.name)
        .bind(&tenant.domain)
        .bind(&tenant.address)
        .bind(&tenant.email)
        .bind(&tenant.phone)
        .bind(tenant.created_utc)
        .bind(tenant.updated_utc)
        .bind(tenant.deleted_utc)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        Ok(())
    }

    pub async fn update_tenant(&self, tenant: &Tenant) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE tenants
            SET code = $2, name = $3, domain = $4, address = $5, email = $6, phone = $7, updated_utc = $8
            WHERE tenant_id = $1 AND deleted_utc IS NULL
            "#,
        )
        .bind(tenant.tenant_id)
        .bind(&tenant.code)
        .bind(&tenant.name)
        .bind(&tenant.domain)
        .bind(&tenant.address)
        .bind(&tenant.email)
        .bind(&tenant.phone)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        Ok(())
    }

    /// Soft delete: sets the marker, never removes the row.
    pub async fn soft_delete_tenant(&self, tenant_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE tenants SET deleted_utc = $2 WHERE tenant_id = $1 AND deleted_utc IS NULL",
        )
        .bind(tenant_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        Ok(result.rows_affected() > 0)
    }

    /// Create a tenant and its OWNER account in one transaction.
    pub async fn create_tenant_with_owner(
        &self,
        tenant: &Tenant,
        owner: &User,
    ) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;

        sqlx::query(
            r#"
            INSERT INTO tenants (tenant_id, code, name, domain, address, email, phone, created_utc, updated_utc, deleted_utc)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(tenant.tenant_id)
        .bind(&tenant.code)
        .bind(&tenant.name)
        .bind(&tenant.domain)
        .bind(&tenant.address)
        .bind(&tenant.email)
        .bind(&tenant.phone)
        .bind(tenant.created_utc)
        .bind(tenant.updated_utc)
        .bind(tenant.deleted_utc)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;

        sqlx::query(
            r#"
            INSERT INTO users (user_id, tenant_id, name, email, password_hash, role_code, created_utc, updated_utc)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(owner.user_id)
        .bind(owner.tenant_id)
        .bind(&owner.name)
        .bind(&owner.email)
        .bind(&owner.password_hash)
        .bind(&owner.role_code)
        .bind(owner.created_utc)
        .bind(owner.updated_utc)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        Ok(())
    }

    // ==================== User Operations ====================

    pub async fn find_user_by_id(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE tenant_id = $1 AND user_id = $2")
            .bind(tenant_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    pub async fn find_user_by_email_in_tenant(
        &self,
        tenant_id: Uuid,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE tenant_id = $1 AND LOWER(email) = LOWER($2)",
        )
        .bind(tenant_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, tenant_id, name, email, password_hash, role_code, created_utc, updated_utc)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.user_id)
        .bind(user.tenant_id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role_code)
        .bind(user.created_utc)
        .bind(user.updated_utc)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        Ok(())
    }

    pub async fn list_users_in_tenant(&self, tenant_id: Uuid) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE tenant_id = $1 ORDER BY created_utc DESC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    pub async fn update_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE users
            SET name = $3, email = $4, password_hash = $5, role_code = $6, updated_utc = $7
            WHERE tenant_id = $1 AND user_id = $2
            "#,
        )
        .bind(user.tenant_id)
        .bind(user.user_id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role_code)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        Ok(())
    }

    pub async fn delete_user(&self, tenant_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE tenant_id = $1 AND user_id = $2")
            .bind(tenant_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        Ok(result.rows_affected() > 0)
    }

    // ==================== Product Operations ====================

    pub async fn list_products(&self, tenant_id: Uuid) -> Result<Vec<Product>, AppError> {
        sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE tenant_id = $1 ORDER BY created_utc DESC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    pub async fn find_product(
        &self,
        tenant_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<Product>, AppError> {
        sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE tenant_id = $1 AND product_id = $2",
        )
        .bind(tenant_id)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    pub async fn insert_product(&self, product: &Product) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO products (product_id, tenant_id, name, description, price_cents, stock, created_utc, updated_utc)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(product.product_id)
        .bind(product.tenant_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(product.created_utc)
        .bind(product.updated_utc)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        Ok(())
    }

    pub async fn update_product(&self, product: &Product) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE products
            SET name = $3, description = $4, price_cents = $5, stock = $6, updated_utc = $7
            WHERE tenant_id = $1 AND product_id = $2
            "#,
        )
        .bind(product.tenant_id)
        .bind(product.product_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        Ok(())
    }

    pub async fn delete_product(
        &self,
        tenant_id: Uuid,
        product_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE tenant_id = $1 AND product_id = $2")
            .bind(tenant_id)
            .bind(product_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        Ok(result.rows_affected() > 0)
    }

    // ==================== Subscriber Operations ====================

    /// Insert or re-activate a subscriber. An existing row for the same
    /// tenant and email keeps its name and is flipped back to subscribed.
    pub async fn upsert_subscriber(
        &self,
        subscriber: &Subscriber,
    ) -> Result<Subscriber, AppError> {
        sqlx::query_as::<_, Subscriber>(
            r#"
            INSERT INTO subscribers (subscriber_id, tenant_id, email, name, subscribed, created_utc, updated_utc)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (tenant_id, LOWER(email))
            DO UPDATE SET subscribed = TRUE, updated_utc = EXCLUDED.updated_utc
            RETURNING *
            "#,
        )
        .bind(subscriber.subscriber_id)
        .bind(subscriber.tenant_id)
        .bind(&subscriber.email)
        .bind(&subscriber.name)
        .bind(subscriber.subscribed)
        .bind(subscriber.created_utc)
        .bind(subscriber.updated_utc)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    pub async fn list_subscribers(&self, tenant_id: Uuid) -> Result<Vec<Subscriber>, AppError> {
        sqlx::query_as::<_, Subscriber>(
            "SELECT * FROM subscribers WHERE tenant_id = $1 ORDER BY created_utc",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    // ==================== Order Operations ====================

    /// Create an order from (product_id, quantity) pairs.
    ///
    /// Runs in one transaction: each product row is locked, stock is
    /// checked and decremented, the unit price is captured into the line
    /// item, and the order total is computed server-side.
    pub async fn create_order(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        items: &[(Uuid, i32)],
    ) -> Result<(Order, Vec<OrderItem>), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;

        let mut order_items = Vec::with_capacity(items.len());
        let mut total_cents: i64 = 0;
        let order_id = Uuid::new_v4();

        for (product_id, quantity) in items {
            let product = sqlx::query_as::<_, Product>(
                "SELECT * FROM products WHERE tenant_id = $1 AND product_id = $2 FOR UPDATE",
            )
            .bind(tenant_id)
            .bind(product_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?
            .ok_or_else(|| {
                AppError::NotFound(anyhow::anyhow!("Product {} not found", product_id))
            })?;

            if product.stock < *quantity {
                return Err(AppError::BadRequest(anyhow::anyhow!(
                    "Insufficient stock for product {}: {} available, {} requested",
                    product.name,
                    product.stock,
                    quantity
                )));
            }

            sqlx::query(
                "UPDATE products SET stock = stock - $3, updated_utc = $4 WHERE tenant_id = $1 AND product_id = $2",
            )
            .bind(tenant_id)
            .bind(product_id)
            .bind(quantity)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;

            total_cents += product.price_cents * i64::from(*quantity);
            order_items.push(OrderItem {
                order_item_id: Uuid::new_v4(),
                order_id,
                product_id: *product_id,
                quantity: *quantity,
                unit_price_cents: product.price_cents,
            });
        }

        let now = Utc::now();
        let order = Order {
            order_id,
            tenant_id,
            user_id,
            status_code: OrderStatus::Pending.as_str().to_string(),
            total_cents,
            created_utc: now,
            updated_utc: now,
        };

        sqlx::query(
            r#"
            INSERT INTO orders (order_id, tenant_id, user_id, status_code, total_cents, created_utc, updated_utc)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(order.order_id)
        .bind(order.tenant_id)
        .bind(order.user_id)
        .bind(&order.status_code)
        .bind(order.total_cents)
        .bind(order.created_utc)
        .bind(order.updated_utc)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;

        for item in &order_items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_item_id, order_id, product_id, quantity, unit_price_cents)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(item.order_item_id)
            .bind(item.order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        Ok((order, order_items))
    }

    /// List orders in a tenant; `user_id` restricts to one customer's own.
    pub async fn list_orders(
        &self,
        tenant_id: Uuid,
        user_id: Option<Uuid>,
    ) -> Result<Vec<Order>, AppError> {
        match user_id {
            Some(user_id) => sqlx::query_as::<_, Order>(
                "SELECT * FROM orders WHERE tenant_id = $1 AND user_id = $2 ORDER BY created_utc DESC",
            )
            .bind(tenant_id)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await,
            None => sqlx::query_as::<_, Order>(
                "SELECT * FROM orders WHERE tenant_id = $1 ORDER BY created_utc DESC",
            )
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await,
        }
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    pub async fn find_order(
        &self,
        tenant_id: Uuid,
        order_id: Uuid,
    ) -> Result<Option<Order>, AppError> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE tenant_id = $1 AND order_id = $2")
            .bind(tenant_id)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    pub async fn list_order_items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, AppError> {
        sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE order_id = $1")
            .bind(order_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    pub async fn update_order_status(
        &self,
        tenant_id: Uuid,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, AppError> {
        sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders SET status_code = $3, updated_utc = $4
            WHERE tenant_id = $1 AND order_id = $2
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(order_id)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    // ==================== Payment Operations ====================

    /// Record a payment for an order. The order must belong to the tenant
    /// and the amount must match the order total exactly.
    pub async fn create_payment(
        &self,
        tenant_id: Uuid,
        order_id: Uuid,
        amount_cents: i64,
        method: &str,
    ) -> Result<Payment, AppError> {
        let order = self
            .find_order(tenant_id, order_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Order {} not found", order_id)))?;

        if order.total_cents != amount_cents {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Payment amount {} does not match order total {}",
                amount_cents,
                order.total_cents
            )));
        }

        let payment = Payment::new(tenant_id, order_id, amount_cents, method);
        sqlx::query(
            r#"
            INSERT INTO payments (payment_id, tenant_id, order_id, amount_cents, method, status_code, created_utc, updated_utc)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(payment.payment_id)
        .bind(payment.tenant_id)
        .bind(payment.order_id)
        .bind(payment.amount_cents)
        .bind(&payment.method)
        .bind(&payment.status_code)
        .bind(payment.created_utc)
        .bind(payment.updated_utc)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        Ok(payment)
    }

    pub async fn find_payment(
        &self,
        tenant_id: Uuid,
        payment_id: Uuid,
    ) -> Result<Option<Payment>, AppError> {
        sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE tenant_id = $1 AND payment_id = $2",
        )
        .bind(tenant_id)
        .bind(payment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    pub async fn list_payments(&self, tenant_id: Uuid) -> Result<Vec<Payment>, AppError> {
        sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE tenant_id = $1 ORDER BY created_utc DESC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))
    }

    /// Transition a payment; a successful payment marks its order PAID in
    /// the same transaction.
    pub async fn update_payment_status(
        &self,
        tenant_id: Uuid,
        payment_id: Uuid,
        status: PaymentStatus,
    ) -> Result<Option<Payment>, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;

        let payment = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments SET status_code = $3, updated_utc = $4
            WHERE tenant_id = $1 AND payment_id = $2
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(payment_id)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;

        if let Some(payment) = &payment {
            if status == PaymentStatus::Success {
                sqlx::query(
                    "UPDATE orders SET status_code = $3, updated_utc = $4 WHERE tenant_id = $1 AND order_id = $2",
                )
                .bind(tenant_id)
                .bind(payment.order_id)
                .bind(OrderStatus::Paid.as_str())
                .bind(Utc::now())
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!(e)))?;
        Ok(payment)
    }
}

// The middleware sees storage only through this trait; failures map to
// DirectoryUnavailable so they are never mistaken for a clean miss.
#[async_trait]
impl TenantDirectory for Database {
    async fn find_by_id(&self, tenant_id: Uuid) -> Result<Option<Tenant>, TenantError> {
        self.find_tenant_by_id(tenant_id)
            .await
            .map_err(|e| TenantError::DirectoryUnavailable(anyhow::anyhow!(e)))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Tenant>, TenantError> {
        self.find_tenant_by_code(code)
            .await
            .map_err(|e| TenantError::DirectoryUnavailable(anyhow::anyhow!(e)))
    }

    async fn find_by_domain(&self, domain: &str) -> Result<Option<Tenant>, TenantError> {
        self.find_tenant_by_domain(domain)
            .await
            .map_err(|e| TenantError::DirectoryUnavailable(anyhow::anyhow!(e)))
    }
}
