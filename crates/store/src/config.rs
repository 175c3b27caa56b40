//! Store configuration

use std::env;

/// Configuration for constructing a [`Store`](crate::Store)
///
/// A missing `DATABASE_URL` is a valid, handled state, not a startup failure:
/// the store comes up unavailable and every accessor degrades per its
/// contract. `OWNER_OPEN_ID` names the identity auto-promoted to admin on
/// sign-in.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub database_url: Option<String>,
    pub owner_open_id: Option<String>,
}

impl StoreConfig {
    /// Load configuration from the environment, honoring a `.env` file
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            database_url: env::var("DATABASE_URL").ok(),
            owner_open_id: env::var("OWNER_OPEN_ID").ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_fully_unset() {
        let config = StoreConfig::default();
        assert!(config.database_url.is_none());
        assert!(config.owner_open_id.is_none());
    }

    #[test]
    fn test_from_env_reads_owner_open_id() {
        env::set_var("OWNER_OPEN_ID", "owner-abc");
        let config = StoreConfig::from_env();
        assert_eq!(config.owner_open_id.as_deref(), Some("owner-abc"));
        env::remove_var("OWNER_OPEN_ID");
    }
}
