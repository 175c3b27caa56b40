//! AI usage counter accessors
//!
//! One counter per (user, month); the provider column records who served the
//! first request of the month and is not part of the key.

use quotapay_shared::{AiProvider, AiUsage, StoreResult};

use crate::store::Store;

impl Store {
    /// The user's usage counter for a `YYYY-MM` month key, `None` if absent
    pub async fn get_ai_usage(&self, user_id: i64, month: &str) -> StoreResult<Option<AiUsage>> {
        let Some(pool) = self.pool() else {
            return Ok(None);
        };

        let usage = sqlx::query_as::<_, AiUsage>(
            r#"
            SELECT id, user_id, provider, request_count, month,
                   created_at, updated_at
            FROM ai_usage
            WHERE user_id = $1 AND month = $2
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(month)
        .fetch_optional(pool)
        .await?;

        Ok(usage)
    }

    /// Count one request against the user's monthly quota
    ///
    /// Atomic increment-or-insert on the (user, month) key: the first call in
    /// a month creates the row with count 1 and the supplied provider, later
    /// calls add 1 without touching the provider. Concurrent calls cannot
    /// lose updates. Fails with `Unavailable` without a connection.
    pub async fn increment_ai_usage(
        &self,
        user_id: i64,
        provider: AiProvider,
        month: &str,
    ) -> StoreResult<()> {
        let pool = self.require_pool()?;

        sqlx::query(
            r#"
            INSERT INTO ai_usage (user_id, provider, request_count, month)
            VALUES ($1, $2, 1, $3)
            ON CONFLICT (user_id, month) DO UPDATE SET
                request_count = ai_usage.request_count + 1,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(provider)
        .bind(month)
        .execute(pool)
        .await?;

        Ok(())
    }
}
