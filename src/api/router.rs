use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, booking, cancellation, health, payment, room, user};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::me))

        // Rooms (reads public, writes admin)
        .route("/api/v1/rooms", get(room::list_rooms).post(room::create_room))
        .route("/api/v1/rooms/{room_id}", get(room::get_room).put(room::update_room).delete(room::delete_room))
        .route("/api/v1/rooms/{room_id}/availability", get(room::check_availability))

        // Bookings
        .route("/api/v1/bookings", post(booking::create_booking).get(booking::list_bookings))
        .route("/api/v1/bookings/{booking_id}", get(booking::get_booking))
        .route("/api/v1/bookings/{booking_id}/cancel", put(booking::cancel_booking))
        .route("/api/v1/bookings/{booking_id}/status", put(booking::update_booking_status))

        // Payment flow. The callback is the gateway's server-to-server
        // notification and carries no session.
        .route("/api/v1/bookings/{booking_id}/momo-payment", post(payment::initiate_payment))
        .route("/api/v1/bookings/momo/callback", post(payment::momo_callback))
        .route("/api/v1/bookings/{booking_id}/refresh-payment", post(payment::refresh_payment))

        // Cancellation workflow
        .route("/api/v1/cancellation-requests", post(cancellation::create_cancellation_request).get(cancellation::list_cancellation_requests))
        .route("/api/v1/cancellation-requests/{request_id}", get(cancellation::get_cancellation_request))
        .route("/api/v1/cancellation-requests/{request_id}/status", put(cancellation::resolve_cancellation_request))
        .route("/api/v1/cancellation-requests/{request_id}/refund", post(cancellation::refund_cancellation_request))

        // User management
        .route("/api/v1/users", get(user::list_users))
        .route("/api/v1/users/{user_id}", delete(user::delete_user))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
