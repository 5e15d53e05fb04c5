use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::api::dtos::requests::{CreateCancellationRequest, ResolveCancellationRequest};
use crate::domain::models::booking::{BookingStatus, PaymentStatus};
use crate::domain::models::cancellation::{CancellationRequest, RefundStatus, RequestStatus};
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn create_cancellation_request(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateCancellationRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.reason.trim().is_empty() {
        return Err(AppError::Validation("A reason is required".into()));
    }

    let booking = state.booking_repo.find_by_id(&payload.booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.user_id != user.id {
        return Err(AppError::Forbidden("You do not own this booking".into()));
    }

    if booking.payment_status != PaymentStatus::Paid {
        return Err(AppError::Conflict("Only paid bookings can request cancellation".into()));
    }
    if booking.status == BookingStatus::Cancelled {
        return Err(AppError::Conflict("Booking is already cancelled".into()));
    }
    if booking.status == BookingStatus::Completed {
        return Err(AppError::Conflict("Completed bookings cannot be cancelled".into()));
    }

    if state.cancellation_repo.find_pending_for_booking(&booking.id).await?.is_some() {
        return Err(AppError::Conflict(
            "A pending cancellation request already exists for this booking".into(),
        ));
    }

    // Refund the full amount paid. The partial unique index on
    // (booking_id) WHERE status = 'pending' backstops the check above.
    let request = CancellationRequest::new(
        booking.id,
        user.id,
        payload.reason,
        booking.total_price,
    );

    let created = state.cancellation_repo.create(&request).await?;

    info!(
        "Cancellation request {} created for booking {}",
        created.id, created.booking_id
    );

    Ok(Json(created))
}

pub async fn list_cancellation_requests(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let requests = if user.is_admin() {
        state.cancellation_repo.list_all().await?
    } else {
        state.cancellation_repo.list_by_user(&user.id).await?
    };

    Ok(Json(requests))
}

pub async fn get_cancellation_request(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(request_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let request = state.cancellation_repo.find_by_id(&request_id).await?
        .ok_or(AppError::NotFound("Cancellation request not found".into()))?;

    if request.user_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden("You do not own this request".into()));
    }

    Ok(Json(request))
}

pub async fn resolve_cancellation_request(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Path(request_id): Path<String>,
    Json(payload): Json<ResolveCancellationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let request = state.cancellation_repo.find_by_id(&request_id).await?
        .ok_or(AppError::NotFound("Cancellation request not found".into()))?;

    if request.status != RequestStatus::Pending {
        return Err(AppError::Conflict("Request has already been resolved".into()));
    }

    let resolved = match payload.status {
        RequestStatus::Pending => {
            return Err(AppError::Validation("Status must be approved or rejected".into()));
        }
        // Approval only queues the refund. Money moves when the admin
        // triggers the refund endpoint, and the booking flips with it.
        RequestStatus::Approved => {
            state.cancellation_repo
                .resolve(&request.id, RequestStatus::Approved, RefundStatus::Pending, payload.admin_notes)
                .await?
        }
        RequestStatus::Rejected => {
            state.cancellation_repo
                .resolve(&request.id, RequestStatus::Rejected, RefundStatus::NotRequested, payload.admin_notes)
                .await?
        }
    };

    info!(
        "Cancellation request {} {:?} for booking {}",
        resolved.id, resolved.status, resolved.booking_id
    );

    Ok(Json(resolved))
}

pub async fn refund_cancellation_request(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Path(request_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let request = state.cancellation_repo.find_by_id(&request_id).await?
        .ok_or(AppError::NotFound("Cancellation request not found".into()))?;

    if request.status != RequestStatus::Approved {
        return Err(AppError::Conflict("Only approved requests can be refunded".into()));
    }
    if request.refund_status == RefundStatus::Completed {
        return Err(AppError::Conflict("Refund has already been completed".into()));
    }

    let booking = state.booking_repo.find_by_id(&request.booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.payment_status == PaymentStatus::Refunded {
        return Err(AppError::Conflict("Booking has already been refunded".into()));
    }

    // An unreachable gateway errors out here and leaves the request
    // untouched, so the admin can simply trigger again later.
    let outcome = state.payment_gateway.refund(&booking, request.refund_amount).await?;

    if outcome.is_success() {
        state.cancellation_repo.complete_refund(&request.id, &booking.id).await?;

        info!(
            "Refund of {} completed for booking {} (request {})",
            request.refund_amount, booking.id, request.id
        );
    } else {
        state.cancellation_repo.mark_refund_failed(&request.id).await?;

        warn!(
            "Refund declined for booking {} (request {}, code {}): {}",
            booking.id,
            request.id,
            outcome.result_code,
            outcome.message.as_deref().unwrap_or("-")
        );
    }

    let updated = state.cancellation_repo.find_by_id(&request.id).await?
        .ok_or(AppError::NotFound("Cancellation request not found".into()))?;

    Ok(Json(updated))
}
