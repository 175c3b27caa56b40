//! Payment accessors
//!
//! Payments are created `pending` here and driven to a terminal status by the
//! external gateway's webhook callback. Gateway authenticity is the caller's
//! concern, not this layer's.

use quotapay_shared::{Payment, PaymentStatus, StoreResult};

use crate::store::Store;

impl Store {
    /// Create a pending USD payment for the user and return its id
    ///
    /// `plan_id` identifies what is being bought; it is traced but not
    /// persisted on the payment row. Fails with `Unavailable` without a
    /// connection.
    pub async fn create_payment(
        &self,
        user_id: i64,
        plan_id: i64,
        amount: i64,
    ) -> StoreResult<i64> {
        let pool = self.require_pool()?;

        tracing::debug!(user_id, plan_id, amount, "Creating pending payment");

        let (payment_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO payments (user_id, amount, currency, status)
            VALUES ($1, $2, 'USD', 'pending')
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .fetch_one(pool)
        .await?;

        Ok(payment_id)
    }

    /// Record a status transition reported by the payment gateway
    ///
    /// Also stores the gateway invoice id when one is supplied, and refreshes
    /// `updated_at`. A non-existent payment id is a silent zero-row no-op.
    pub async fn update_payment_status(
        &self,
        payment_id: i64,
        status: PaymentStatus,
        invoice_id: Option<&str>,
    ) -> StoreResult<()> {
        let pool = self.require_pool()?;

        let result = sqlx::query(
            r#"
            UPDATE payments
            SET status = $2,
                invoice_id = COALESCE($3, invoice_id),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(payment_id)
        .bind(status)
        .bind(invoice_id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(payment_id, %status, "No payment row matched status update");
        }

        Ok(())
    }

    /// All payment rows for the user; order is not contracted
    pub async fn get_user_payments(&self, user_id: i64) -> StoreResult<Vec<Payment>> {
        let Some(pool) = self.pool() else {
            return Ok(Vec::new());
        };

        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, user_id, subscription_id, amount, currency, status,
                   invoice_id, payment_url, metadata, created_at, updated_at
            FROM payments
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(payments)
    }
}
