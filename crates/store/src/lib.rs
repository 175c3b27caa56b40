//! QuotaPay Store
//!
//! Data-access layer over the QuotaPay billing schema: users, subscription
//! plans, user subscriptions, payments, and per-month AI usage counters.
//!
//! The [`Store`] handle is constructed once at startup from a [`StoreConfig`]
//! and injected into callers. It wraps a maybe-unavailable connection pool:
//! reads degrade to empty results without one, while writes with financial or
//! quota effect fail with [`StoreError::Unavailable`].

pub mod config;
mod payments;
mod plans;
mod store;
mod subscriptions;
mod usage;
mod users;

pub use config::StoreConfig;
pub use store::Store;

// Re-export the shared vocabulary so hosts depend on a single crate.
pub use quotapay_shared::{
    current_month_key, month_key, AiProvider, AiUsage, FieldUpdate, Payment, PaymentStatus,
    StoreError, StoreResult, SubscriptionPlan, SubscriptionWithPlan, User, UserRole,
    UserSubscription, UserUpsert,
};
