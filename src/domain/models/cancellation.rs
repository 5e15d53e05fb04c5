use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum RefundStatus {
    NotRequested,
    Pending,
    Completed,
    Failed,
}

/// Post-payment cancellations go through this entity instead of touching the
/// booking directly: a user files the request, an admin resolves it, and only
/// an approved request can carry a refund.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct CancellationRequest {
    pub id: String,
    pub booking_id: String,
    pub user_id: String,
    pub reason: String,
    pub status: RequestStatus,
    pub refund_status: RefundStatus,
    pub refund_amount: i64,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl CancellationRequest {
    pub fn new(booking_id: String, user_id: String, reason: String, refund_amount: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            booking_id,
            user_id,
            reason,
            status: RequestStatus::Pending,
            refund_status: RefundStatus::NotRequested,
            refund_amount,
            admin_notes: None,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }
}
