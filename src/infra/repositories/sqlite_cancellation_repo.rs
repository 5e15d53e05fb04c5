use crate::domain::{
    models::cancellation::{CancellationRequest, RefundStatus, RequestStatus},
    ports::CancellationRequestRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::Utc;

pub struct SqliteCancellationRepo {
    pool: SqlitePool,
}

impl SqliteCancellationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CancellationRequestRepository for SqliteCancellationRepo {
    async fn create(&self, request: &CancellationRequest) -> Result<CancellationRequest, AppError> {
        sqlx::query_as::<_, CancellationRequest>(
            "INSERT INTO cancellation_requests (id, booking_id, user_id, reason, status, refund_status, refund_amount, admin_notes, created_at, resolved_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&request.id).bind(&request.booking_id).bind(&request.user_id).bind(&request.reason)
            .bind(request.status).bind(request.refund_status).bind(request.refund_amount)
            .bind(&request.admin_notes).bind(request.created_at).bind(request.resolved_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<CancellationRequest>, AppError> {
        sqlx::query_as::<_, CancellationRequest>("SELECT * FROM cancellation_requests WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_pending_for_booking(&self, booking_id: &str) -> Result<Option<CancellationRequest>, AppError> {
        sqlx::query_as::<_, CancellationRequest>("SELECT * FROM cancellation_requests WHERE booking_id = ? AND status = 'pending'").bind(booking_id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_all(&self) -> Result<Vec<CancellationRequest>, AppError> {
        sqlx::query_as::<_, CancellationRequest>("SELECT * FROM cancellation_requests ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<CancellationRequest>, AppError> {
        sqlx::query_as::<_, CancellationRequest>("SELECT * FROM cancellation_requests WHERE user_id = ? ORDER BY created_at DESC").bind(user_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn resolve(&self, id: &str, status: RequestStatus, refund_status: RefundStatus, admin_notes: Option<String>) -> Result<CancellationRequest, AppError> {
        sqlx::query_as::<_, CancellationRequest>(
            "UPDATE cancellation_requests SET status = ?, refund_status = ?, admin_notes = ?, resolved_at = ? WHERE id = ? RETURNING *"
        )
            .bind(status).bind(refund_status).bind(admin_notes).bind(Utc::now()).bind(id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn complete_refund(&self, request_id: &str, booking_id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        sqlx::query("UPDATE cancellation_requests SET refund_status = 'completed' WHERE id = ?").bind(request_id).execute(&mut *tx).await.map_err(AppError::Database)?;
        sqlx::query("UPDATE bookings SET status = 'cancelled', payment_status = 'refunded' WHERE id = ?").bind(booking_id).execute(&mut *tx).await.map_err(AppError::Database)?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }
    async fn mark_refund_failed(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE cancellation_requests SET refund_status = 'failed' WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
}
