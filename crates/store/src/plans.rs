//! Subscription plan catalog accessors
//!
//! Plans are seeded out-of-band; this layer only reads them.

use quotapay_shared::{StoreResult, SubscriptionPlan};

use crate::store::Store;

impl Store {
    /// All plans currently offered (active flag set); order is not contracted
    pub async fn get_subscription_plans(&self) -> StoreResult<Vec<SubscriptionPlan>> {
        let Some(pool) = self.pool() else {
            return Ok(Vec::new());
        };

        let plans = sqlx::query_as::<_, SubscriptionPlan>(
            r#"
            SELECT id, display_name, description, price_usd, ai_request_limit,
                   features, is_active, created_at, updated_at
            FROM subscription_plans
            WHERE is_active = TRUE
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(plans)
    }

    /// Exact-match plan lookup, `None` if absent
    pub async fn get_plan_by_id(&self, plan_id: i64) -> StoreResult<Option<SubscriptionPlan>> {
        let Some(pool) = self.pool() else {
            return Ok(None);
        };

        let plan = sqlx::query_as::<_, SubscriptionPlan>(
            r#"
            SELECT id, display_name, description, price_usd, ai_request_limit,
                   features, is_active, created_at, updated_at
            FROM subscription_plans
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(plan_id)
        .fetch_optional(pool)
        .await?;

        Ok(plan)
    }
}
