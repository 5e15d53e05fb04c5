use crate::domain::models::{
    auth::RefreshTokenRecord,
    booking::{Booking, BookingStatus},
    cancellation::{CancellationRequest, RefundStatus, RequestStatus},
    payment::{PaymentOutcome, PaymentSession, RefundOutcome},
    room::Room,
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, room: &Room) -> Result<Room, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Room>, AppError>;
    async fn list(&self) -> Result<Vec<Room>, AppError>;
    async fn update(&self, room: &Room) -> Result<Room, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn list_all(&self) -> Result<Vec<Booking>, AppError>;
    /// Non-cancelled bookings for the room whose stay intersects [check_in, check_out).
    async fn count_overlap(&self, room_id: &str, check_in: NaiveDate, check_out: NaiveDate) -> Result<i64, AppError>;
    /// All bookings ever made for the room, any status. Bookings are never
    /// deleted, so a non-zero count pins the room row.
    async fn count_for_room(&self, room_id: &str) -> Result<i64, AppError>;
    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, AppError>;
    async fn cancel(&self, id: &str) -> Result<Booking, AppError>;
    /// Conditional write: flips a booking to paid/confirmed only while its
    /// payment is still pending or failed and the booking itself is not
    /// terminal. Returns None when the condition did not hold.
    async fn mark_paid(&self, id: &str, trans_id: Option<&str>) -> Result<Option<Booking>, AppError>;
    /// Conditional write: records a failed attempt only while the payment is
    /// still pending. The booking stays `pending` so the user can retry.
    async fn mark_payment_failed(&self, id: &str) -> Result<Option<Booking>, AppError>;
}

#[async_trait]
pub trait CancellationRequestRepository: Send + Sync {
    async fn create(&self, request: &CancellationRequest) -> Result<CancellationRequest, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<CancellationRequest>, AppError>;
    async fn find_pending_for_booking(&self, booking_id: &str) -> Result<Option<CancellationRequest>, AppError>;
    async fn list_all(&self) -> Result<Vec<CancellationRequest>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<CancellationRequest>, AppError>;
    async fn resolve(&self, id: &str, status: RequestStatus, refund_status: RefundStatus, admin_notes: Option<String>) -> Result<CancellationRequest, AppError>;
    /// One transaction: request refund_status -> completed, booking ->
    /// cancelled + refunded.
    async fn complete_refund(&self, request_id: &str, booking_id: &str) -> Result<(), AppError>;
    async fn mark_refund_failed(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn latest_generation(&self, family_id: Uuid) -> Result<Option<i32>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_refresh_family(&self, family_id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_session(&self, booking: &Booking, return_url: &str) -> Result<PaymentSession, AppError>;
    async fn query_payment(&self, booking_id: &str) -> Result<PaymentOutcome, AppError>;
    async fn refund(&self, booking: &Booking, amount: i64) -> Result<RefundOutcome, AppError>;
}
