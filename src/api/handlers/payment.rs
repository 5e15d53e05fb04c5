use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{InitiatePaymentRequest, MomoCallbackRequest};
use crate::domain::models::booking::{Booking, BookingStatus, PaymentStatus};
use crate::domain::models::payment::PaymentOutcome;
use crate::domain::services::reconciliation::{reconcile, Transition};
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn initiate_payment(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<String>,
    Json(payload): Json<InitiatePaymentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.user_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden("You do not own this booking".into()));
    }

    if booking.payment_status == PaymentStatus::Paid {
        return Err(AppError::Conflict("Booking is already paid".into()));
    }
    if booking.status != BookingStatus::Pending {
        return Err(AppError::Conflict("Booking is not awaiting payment".into()));
    }

    let session = state.payment_gateway
        .create_session(&booking, &payload.return_url)
        .await?;

    info!(
        "Payment session created for booking {} (request {})",
        booking.id, session.request_id
    );

    Ok(Json(session))
}

/// Gateway-to-server notification. Unauthenticated; the gateway retries on
/// non-2xx, so everything it can tell us is absorbed with 204.
pub async fn momo_callback(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MomoCallbackRequest>,
) -> Result<impl IntoResponse, AppError> {
    let Some(booking) = state.booking_repo.find_by_id(&payload.order_id).await? else {
        warn!("Payment callback for unknown order {}, absorbing", payload.order_id);
        return Ok(StatusCode::NO_CONTENT);
    };

    let outcome = PaymentOutcome {
        order_id: payload.order_id,
        result_code: payload.result_code,
        trans_id: payload.trans_id.map(|t| t.to_string()),
    };

    apply_outcome(&state, booking, &outcome).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Client-triggered poll for users who closed the redirect tab before the
/// wallet finished. Asks the gateway for the order status and applies it
/// through the same transition logic as the callback.
pub async fn refresh_payment(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.user_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden("You do not own this booking".into()));
    }

    if matches!(booking.payment_status, PaymentStatus::Paid | PaymentStatus::Refunded) {
        return Ok(Json(booking));
    }

    let outcome = state.payment_gateway.query_payment(&booking.id).await?;
    let refreshed = apply_outcome(&state, booking, &outcome).await?;

    Ok(Json(refreshed))
}

/// Single write path for gateway results. The conditional repository updates
/// re-check the booking state inside the UPDATE itself, so a callback and a
/// refresh racing each other cannot double-apply.
async fn apply_outcome(
    state: &AppState,
    booking: Booking,
    outcome: &PaymentOutcome,
) -> Result<Booking, AppError> {
    match reconcile(&booking, outcome) {
        Transition::ConfirmPayment { trans_id } => {
            match state.booking_repo.mark_paid(&booking.id, trans_id.as_deref()).await? {
                Some(updated) => {
                    info!(
                        "Payment confirmed for booking {} (trans {})",
                        updated.id,
                        updated.trans_id.as_deref().unwrap_or("-")
                    );
                    Ok(updated)
                }
                None => {
                    warn!("Payment confirmation for booking {} lost the race, re-reading", booking.id);
                    state.booking_repo.find_by_id(&booking.id).await?
                        .ok_or(AppError::NotFound("Booking not found".into()))
                }
            }
        }
        Transition::RecordFailure => {
            match state.booking_repo.mark_payment_failed(&booking.id).await? {
                Some(updated) => {
                    info!(
                        "Payment failed for booking {} (code {})",
                        updated.id, outcome.result_code
                    );
                    Ok(updated)
                }
                None => {
                    warn!("Payment failure for booking {} lost the race, re-reading", booking.id);
                    state.booking_repo.find_by_id(&booking.id).await?
                        .ok_or(AppError::NotFound("Booking not found".into()))
                }
            }
        }
        Transition::AlreadySettled => {
            info!("Duplicate payment result for booking {} absorbed", booking.id);
            Ok(booking)
        }
        Transition::Ignored => {
            warn!(
                "Payment result {} for booking {} conflicts with status {:?}/{:?}, ignoring",
                outcome.result_code, booking.id, booking.status, booking.payment_status
            );
            Ok(booking)
        }
    }
}
