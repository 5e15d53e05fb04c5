use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use rand::{distributions::Alphanumeric, Rng};

/// Application lifecycle state. Independent from the payment axis: a booking
/// can sit at `Pending` while its payment is already `Paid` until the
/// reconciliation write lands.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub code: String,
    pub user_id: String,
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adult_count: i32,
    pub child_count: i32,
    pub room_count: i32,
    pub total_price: i64,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub note: Option<String>,
    pub trans_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub user_id: String,
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adult_count: i32,
    pub child_count: i32,
    pub room_count: i32,
    pub total_price: i64,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub note: Option<String>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        let code: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(|c| (c as char).to_ascii_uppercase())
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            code: format!("BK{}", code),
            user_id: params.user_id,
            room_id: params.room_id,
            check_in: params.check_in,
            check_out: params.check_out,
            adult_count: params.adult_count,
            child_count: params.child_count,
            room_count: params.room_count,
            total_price: params.total_price,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            contact_name: params.contact_name,
            contact_email: params.contact_email,
            contact_phone: params.contact_phone,
            note: params.note,
            trans_id: None,
            created_at: Utc::now(),
        }
    }
}
