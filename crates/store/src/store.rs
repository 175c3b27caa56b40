//! Store handle and degraded-mode plumbing

use quotapay_shared::{create_pool, run_migrations, StoreError, StoreResult};
use sqlx::PgPool;

use crate::config::StoreConfig;

/// Handle to the QuotaPay database
///
/// Constructed explicitly at startup and passed to callers; wraps a
/// maybe-unavailable pool instead of a module-level global so initialization
/// order stays visible and testable.
#[derive(Clone)]
pub struct Store {
    pool: Option<PgPool>,
    owner_open_id: Option<String>,
}

impl Store {
    /// Connect using the given configuration
    ///
    /// Never fails: a missing URL or a failed pool construction yields an
    /// unavailable store with a logged diagnostic.
    pub async fn connect(config: &StoreConfig) -> Self {
        let pool = match &config.database_url {
            Some(url) => match create_pool(url).await {
                Ok(pool) => Some(pool),
                Err(err) => {
                    tracing::warn!("Failed to connect to database: {}", err);
                    None
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not configured; store is unavailable");
                None
            }
        };

        Self {
            pool,
            owner_open_id: config.owner_open_id.clone(),
        }
    }

    /// Wrap an externally constructed pool
    pub fn with_pool(pool: PgPool, owner_open_id: Option<String>) -> Self {
        Self {
            pool: Some(pool),
            owner_open_id,
        }
    }

    /// An explicitly unavailable store
    pub fn unavailable() -> Self {
        Self {
            pool: None,
            owner_open_id: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.pool.is_some()
    }

    /// Run pending schema migrations
    pub async fn migrate(&self) -> StoreResult<()> {
        let pool = self.require_pool()?;
        run_migrations(pool)
            .await
            .map_err(|err| StoreError::Database(err.to_string()))
    }

    /// Pool for read paths; callers degrade to empty results on `None`
    pub(crate) fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Pool for writes with financial or quota effect
    pub(crate) fn require_pool(&self) -> StoreResult<&PgPool> {
        self.pool.as_ref().ok_or(StoreError::Unavailable)
    }

    pub(crate) fn owner_open_id(&self) -> Option<&str> {
        self.owner_open_id.as_deref()
    }
}
