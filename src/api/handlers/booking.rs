use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::api::dtos::requests::{CreateBookingRequest, UpdateBookingStatusRequest};
use crate::domain::models::booking::{Booking, BookingStatus, NewBookingParams, PaymentStatus};
use crate::domain::services::pricing;
use crate::error::AppError;
use std::sync::Arc;
use chrono::{Duration, Utc};
use tracing::info;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let room = state.room_repo.find_by_id(&payload.room_id).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;

    if payload.check_in_date < Utc::now().date_naive() {
        return Err(AppError::Validation("Check-in date cannot be in the past".into()));
    }

    pricing::validate_stay(
        &room,
        payload.check_in_date,
        payload.check_out_date,
        payload.adult_count,
        payload.child_count,
        payload.room_count,
    )?;

    let overlapping = state.booking_repo
        .count_overlap(&room.id, payload.check_in_date, payload.check_out_date)
        .await?;
    if overlapping > 0 {
        return Err(AppError::Conflict("Room is not available for the selected dates".into()));
    }

    let total_price = pricing::total_price(
        room.price,
        payload.check_in_date,
        payload.check_out_date,
        payload.room_count,
    );

    let booking = Booking::new(NewBookingParams {
        user_id: user.id,
        room_id: room.id,
        check_in: payload.check_in_date,
        check_out: payload.check_out_date,
        adult_count: payload.adult_count,
        child_count: payload.child_count,
        room_count: payload.room_count,
        total_price,
        contact_name: payload.contact_name,
        contact_email: payload.contact_email,
        contact_phone: payload.contact_phone,
        note: payload.note,
    });

    let created = state.booking_repo.create(&booking).await?;

    info!(
        "Booking created: {} ({}, {} nights, total {})",
        created.id,
        created.code,
        pricing::nights(created.check_in, created.check_out),
        created.total_price
    );

    Ok(Json(created))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = if user.is_admin() {
        state.booking_repo.list_all().await?
    } else {
        state.booking_repo.list_by_user(&user.id).await?
    };

    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.user_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden("You do not own this booking".into()));
    }

    Ok(Json(booking))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.user_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden("You do not own this booking".into()));
    }

    if booking.status == BookingStatus::Cancelled {
        return Err(AppError::Conflict("Booking is already cancelled".into()));
    }
    if booking.payment_status == PaymentStatus::Paid {
        return Err(AppError::Conflict(
            "Paid bookings must go through a cancellation request".into(),
        ));
    }
    if booking.status != BookingStatus::Pending {
        return Err(AppError::Conflict("Only pending bookings can be cancelled directly".into()));
    }
    if Utc::now() - booking.created_at > Duration::hours(24) {
        return Err(AppError::Conflict(
            "Bookings can only be cancelled within 24 hours of creation".into(),
        ));
    }

    let cancelled = state.booking_repo.cancel(&booking.id).await?;

    info!("Booking cancelled: {}", cancelled.id);

    Ok(Json(cancelled))
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Path(booking_id): Path<String>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.status == BookingStatus::Cancelled && payload.status != BookingStatus::Cancelled {
        return Err(AppError::Conflict("Cancelled bookings cannot be reopened".into()));
    }
    if payload.status == BookingStatus::Cancelled && booking.payment_status == PaymentStatus::Paid {
        return Err(AppError::Conflict(
            "Use the cancellation workflow to cancel paid bookings".into(),
        ));
    }

    let updated = state.booking_repo.update_status(&booking.id, payload.status).await?;

    info!("Booking {} status set to {:?}", updated.id, updated.status);

    Ok(Json(updated))
}
