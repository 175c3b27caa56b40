//! User subscription accessors

use quotapay_shared::{StoreResult, SubscriptionWithPlan, UserSubscription};

use crate::store::Store;

impl Store {
    /// The user's active subscription, enriched with its plan
    ///
    /// Reads the first row matching `(user_id, is_active)`; at-most-one active
    /// subscription per user is intended but not validated here. The embedded
    /// plan is `None` when the referenced catalog entry no longer exists.
    pub async fn get_user_subscription(
        &self,
        user_id: i64,
    ) -> StoreResult<Option<SubscriptionWithPlan>> {
        let Some(pool) = self.pool() else {
            return Ok(None);
        };

        let subscription = sqlx::query_as::<_, UserSubscription>(
            r#"
            SELECT id, user_id, plan_id, start_date, end_date, is_active,
                   created_at, updated_at
            FROM user_subscriptions
            WHERE user_id = $1 AND is_active = TRUE
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        let Some(subscription) = subscription else {
            return Ok(None);
        };

        let plan = self.get_plan_by_id(subscription.plan_id).await?;

        Ok(Some(SubscriptionWithPlan { subscription, plan }))
    }
}
