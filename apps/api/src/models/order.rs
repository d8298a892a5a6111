use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const ORDER_STATUS_PENDING: &str = "pending";
pub const ORDER_STATUS_COMPLETED: &str = "completed";

/// A payment-capture record. Created `pending`; transitioned to `completed`
/// exactly once by the payment webhook.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    /// Amount in minor currency units (e.g. paise).
    pub amount: i64,
    pub currency: String,
    pub status: String,
    /// Order identifier issued by the payment provider.
    pub external_order_id: String,
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
