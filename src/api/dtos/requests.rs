use crate::domain::models::booking::BookingStatus;
use crate::domain::models::cancellation::RequestStatus;
use crate::domain::models::room::RoomStatus;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub name: String,
    pub room_type: String,
    pub bed_type: String,
    pub price: i64,
    pub capacity: i32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
    pub room_type: Option<String>,
    pub bed_type: Option<String>,
    pub price: Option<i64>,
    pub capacity: Option<i32>,
    pub status: Option<RoomStatus>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub room_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub adult_count: i32,
    #[serde(default)]
    pub child_count: i32,
    pub room_count: i32,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub note: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentRequest {
    pub return_url: String,
}

/// Notify payload from the wallet gateway. `transId` arrives as a number.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomoCallbackRequest {
    pub order_id: String,
    pub result_code: i64,
    #[serde(default)]
    pub trans_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCancellationRequest {
    pub booking_id: String,
    pub reason: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveCancellationRequest {
    pub status: RequestStatus,
    pub admin_notes: Option<String>,
}
