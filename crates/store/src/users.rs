//! User accessors: sign-in upsert and lookup

use quotapay_shared::{StoreError, StoreResult, User, UserRole, UserUpsert};
use time::OffsetDateTime;

use crate::store::Store;

impl Store {
    /// Insert or refresh a user, keyed by the unique `open_id`
    ///
    /// Only explicitly supplied fields participate in the conflict update set.
    /// A candidate with no fields at all still refreshes `last_signed_in`, so
    /// a bare re-sign-in always performs at least one column write and
    /// `updated_at` tracks it.
    ///
    /// When no store is available this is a logged no-op; genuine database
    /// failures are logged and re-raised.
    pub async fn upsert_user(&self, candidate: &UserUpsert) -> StoreResult<()> {
        if candidate.open_id.is_empty() {
            return Err(StoreError::InvalidArgument(
                "user open_id is required for upsert".to_string(),
            ));
        }

        let Some(pool) = self.pool() else {
            tracing::warn!(
                open_id = %candidate.open_id,
                "Cannot upsert user: database not available"
            );
            return Ok(());
        };

        // Owner auto-promotion applies only when the caller did not pick a role.
        let role = candidate.role.or_else(|| {
            (self.owner_open_id() == Some(candidate.open_id.as_str())).then_some(UserRole::Admin)
        });

        let sign_in = candidate
            .last_signed_in
            .unwrap_or_else(OffsetDateTime::now_utc);
        let update_set_empty = candidate.name.is_keep()
            && candidate.email.is_keep()
            && candidate.login_method.is_keep()
            && candidate.last_signed_in.is_none()
            && role.is_none();
        // Fallback column write for the conflict branch of an empty update set.
        let touch_sign_in = candidate.last_signed_in.is_some() || update_set_empty;

        let result = sqlx::query(
            r#"
            INSERT INTO users (open_id, name, email, login_method, role, last_signed_in)
            VALUES ($1, $2, $3, $4, COALESCE($5, 'user'), $6)
            ON CONFLICT (open_id) DO UPDATE SET
                name = CASE WHEN $7 THEN EXCLUDED.name ELSE users.name END,
                email = CASE WHEN $8 THEN EXCLUDED.email ELSE users.email END,
                login_method = CASE WHEN $9 THEN EXCLUDED.login_method ELSE users.login_method END,
                role = COALESCE($5, users.role),
                last_signed_in = CASE WHEN $10 THEN EXCLUDED.last_signed_in ELSE users.last_signed_in END,
                updated_at = NOW()
            "#,
        )
        .bind(&candidate.open_id)
        .bind(candidate.name.value().map(String::as_str))
        .bind(candidate.email.value().map(String::as_str))
        .bind(candidate.login_method.value().map(String::as_str))
        .bind(role)
        .bind(sign_in)
        .bind(!candidate.name.is_keep())
        .bind(!candidate.email.is_keep())
        .bind(!candidate.login_method.is_keep())
        .bind(touch_sign_in)
        .execute(pool)
        .await;

        if let Err(err) = result {
            tracing::error!(open_id = %candidate.open_id, "Failed to upsert user: {}", err);
            return Err(err.into());
        }

        Ok(())
    }

    /// Look up a user by its external identity, `None` if absent
    pub async fn get_user_by_open_id(&self, open_id: &str) -> StoreResult<Option<User>> {
        let Some(pool) = self.pool() else {
            tracing::warn!("Cannot get user: database not available");
            return Ok(None);
        };

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, open_id, name, email, login_method, role,
                   created_at, updated_at, last_signed_in
            FROM users
            WHERE open_id = $1
            LIMIT 1
            "#,
        )
        .bind(open_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}
