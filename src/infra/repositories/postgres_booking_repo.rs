use crate::domain::{models::booking::{Booking, BookingStatus}, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use chrono::NaiveDate;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>("INSERT INTO bookings (id, code, user_id, room_id, check_in, check_out, adult_count, child_count, room_count, total_price, status, payment_status, contact_name, contact_email, contact_phone, note, trans_id, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18) RETURNING *")
            .bind(&booking.id).bind(&booking.code).bind(&booking.user_id).bind(&booking.room_id)
            .bind(booking.check_in).bind(booking.check_out).bind(booking.adult_count).bind(booking.child_count)
            .bind(booking.room_count).bind(booking.total_price).bind(booking.status).bind(booking.payment_status)
            .bind(&booking.contact_name).bind(&booking.contact_email).bind(&booking.contact_phone)
            .bind(&booking.note).bind(&booking.trans_id).bind(booking.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE user_id = $1 ORDER BY created_at DESC").bind(user_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn count_overlap(&self, room_id: &str, check_in: NaiveDate, check_out: NaiveDate) -> Result<i64, AppError> {
        let result = sqlx::query("SELECT COUNT(*) as count FROM bookings WHERE room_id = $1 AND check_in < $2 AND check_out > $3 AND status != 'cancelled'").bind(room_id).bind(check_out).bind(check_in).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count"))
    }
    async fn count_for_room(&self, room_id: &str) -> Result<i64, AppError> {
        let result = sqlx::query("SELECT COUNT(*) as count FROM bookings WHERE room_id = $1").bind(room_id).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count"))
    }
    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = $1 WHERE id = $2 RETURNING *").bind(status).bind(id).fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn cancel(&self, id: &str) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = 'cancelled' WHERE id = $1 RETURNING *").bind(id).fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn mark_paid(&self, id: &str, trans_id: Option<&str>) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET payment_status = 'paid', status = 'confirmed', trans_id = $1 WHERE id = $2 AND payment_status IN ('pending', 'failed') AND status NOT IN ('cancelled', 'completed') RETURNING *")
            .bind(trans_id).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn mark_payment_failed(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET payment_status = 'failed' WHERE id = $1 AND payment_status = 'pending' RETURNING *").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
}
