//! Common types used across the QuotaPay store

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

// =============================================================================
// Enums
// =============================================================================

/// Application role of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::User
    }
}

impl UserRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

/// Payment lifecycle status
///
/// Created as `Pending`; moved to a terminal status by the gateway callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Cancelled,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl PaymentStatus {
    /// Whether this status is terminal (no further transitions expected)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Paid => write!(f, "paid"),
            Self::Failed => write!(f, "failed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("Invalid payment status: {}", s)),
        }
    }
}

/// AI provider a usage counter is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    OpenAi,
    Manus,
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAi => write!(f, "openai"),
            Self::Manus => write!(f, "manus"),
        }
    }
}

impl std::str::FromStr for AiProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "manus" => Ok(Self::Manus),
            _ => Err(format!("Invalid AI provider: {}", s)),
        }
    }
}

// =============================================================================
// Database Models
// =============================================================================

/// User model
///
/// One row per external identity (`open_id`), refreshed on every sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
    pub role: UserRole,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub last_signed_in: OffsetDateTime,
}

/// Subscription plan catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubscriptionPlan {
    pub id: i64,
    pub display_name: String,
    pub description: Option<String>,
    /// Opaque integer price; the gateway decides the unit
    pub price_usd: i64,
    pub ai_request_limit: i64,
    /// Ordered feature list, stored as JSON
    pub features: Option<serde_json::Value>,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A user's subscription to a plan for a time window
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserSubscription {
    pub id: i64,
    pub user_id: i64,
    pub plan_id: i64,
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Payment model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: i64,
    pub user_id: i64,
    pub subscription_id: Option<i64>,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    /// External gateway invoice id, set by the webhook callback
    pub invoice_id: Option<String>,
    pub payment_url: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Per-user, per-month AI request counter
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AiUsage {
    pub id: i64,
    pub user_id: i64,
    pub provider: AiProvider,
    pub request_count: i64,
    /// Calendar month key, `YYYY-MM`
    pub month: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// An active subscription together with its plan
///
/// The plan is `None` when the referenced catalog entry has been deleted.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionWithPlan {
    #[serde(flatten)]
    pub subscription: UserSubscription,
    pub plan: Option<SubscriptionPlan>,
}

// =============================================================================
// Upsert Candidate
// =============================================================================

/// Tri-state update for a nullable column
///
/// `Keep` leaves the stored value untouched on conflict and falls back to the
/// column default on insert. `Clear` writes an explicit NULL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// Build from an explicitly supplied value: `None` clears, `Some` sets.
    pub fn from_supplied(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Set(v),
            None => Self::Clear,
        }
    }

    /// Whether the stored value should be left as-is
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// The value to write, if any (`Clear` writes NULL)
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Set(v) => Some(v),
            _ => None,
        }
    }
}

/// Candidate record for `Store::upsert_user`
///
/// Text fields default to `Keep` so a bare sign-in refresh touches nothing
/// but the timestamps.
#[derive(Debug, Clone, Default)]
pub struct UserUpsert {
    pub open_id: String,
    pub name: FieldUpdate<String>,
    pub email: FieldUpdate<String>,
    pub login_method: FieldUpdate<String>,
    pub last_signed_in: Option<OffsetDateTime>,
    pub role: Option<UserRole>,
}

impl UserUpsert {
    pub fn new(open_id: impl Into<String>) -> Self {
        Self {
            open_id: open_id.into(),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: Option<impl Into<String>>) -> Self {
        self.name = FieldUpdate::from_supplied(name.map(Into::into));
        self
    }

    pub fn email(mut self, email: Option<impl Into<String>>) -> Self {
        self.email = FieldUpdate::from_supplied(email.map(Into::into));
        self
    }

    pub fn login_method(mut self, method: Option<impl Into<String>>) -> Self {
        self.login_method = FieldUpdate::from_supplied(method.map(Into::into));
        self
    }

    pub fn last_signed_in(mut self, at: OffsetDateTime) -> Self {
        self.last_signed_in = Some(at);
        self
    }

    pub fn role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Whether any column beyond the timestamps was explicitly supplied
    pub fn has_explicit_fields(&self) -> bool {
        !self.name.is_keep()
            || !self.email.is_keep()
            || !self.login_method.is_keep()
            || self.last_signed_in.is_some()
            || self.role.is_some()
    }
}

// =============================================================================
// Month Keys
// =============================================================================

/// Canonical `YYYY-MM` key for a usage month
pub fn month_key(at: OffsetDateTime) -> String {
    format!("{:04}-{:02}", at.year(), u8::from(at.month()))
}

/// Month key for the current UTC month
pub fn current_month_key() -> String {
    month_key(OffsetDateTime::now_utc())
}

// =============================================================================
// Tests
// =============================================================================
