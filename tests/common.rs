use hotel_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_auth_repo::SqliteAuthRepo,
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_cancellation_repo::SqliteCancellationRepo,
        sqlite_room_repo::SqliteRoomRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    domain::services::auth_service::AuthService,
    domain::models::booking::Booking,
    domain::models::payment::{PaymentOutcome, PaymentSession, RefundOutcome},
    domain::ports::PaymentGateway,
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    Router,
};
use std::str::FromStr;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use tower::ServiceExt;
use serde_json::Value;

/// What the mocked wallet does when the refund endpoint is hit.
#[allow(dead_code)]
pub enum MockRefund {
    Success,
    Declined(i64),
    Unreachable,
}

/// Scriptable stand-in for the wallet gateway. Query and refund behavior
/// can be flipped mid-test to walk a booking through retries and failures.
pub struct MockPaymentGateway {
    pub query_code: Mutex<i64>,
    pub query_trans_id: Mutex<Option<String>>,
    pub refund_mode: Mutex<MockRefund>,
    pub refund_calls: Mutex<Vec<(String, i64)>>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self {
            query_code: Mutex::new(0),
            query_trans_id: Mutex::new(Some("99001".to_string())),
            refund_mode: Mutex::new(MockRefund::Success),
            refund_calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_session(&self, booking: &Booking, _return_url: &str) -> Result<PaymentSession, AppError> {
        Ok(PaymentSession {
            pay_url: format!("https://test-payment.momo.vn/pay/{}", booking.id),
            deeplink: None,
            request_id: Uuid::new_v4().to_string(),
        })
    }

    async fn query_payment(&self, booking_id: &str) -> Result<PaymentOutcome, AppError> {
        Ok(PaymentOutcome {
            order_id: booking_id.to_string(),
            result_code: *self.query_code.lock().unwrap(),
            trans_id: self.query_trans_id.lock().unwrap().clone(),
        })
    }

    async fn refund(&self, booking: &Booking, amount: i64) -> Result<RefundOutcome, AppError> {
        self.refund_calls.lock().unwrap().push((booking.id.clone(), amount));
        match *self.refund_mode.lock().unwrap() {
            MockRefund::Success => Ok(RefundOutcome { result_code: 0, message: Some("Successful.".to_string()) }),
            MockRefund::Declined(code) => Ok(RefundOutcome { result_code: code, message: Some("Refund rejected by issuer".to_string()) }),
            MockRefund::Unreachable => Err(AppError::Gateway("connection refused".to_string())),
        }
    }
}

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub gateway: Arc<MockPaymentGateway>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let priv_key_pem = include_str!("../tests/keys/test_private.pem");
        let pub_key_pem = include_str!("../tests/keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            public_base_url: "http://localhost:3000".to_string(),
            jwt_secret_key: priv_key_pem.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
            momo_endpoint: "https://test-payment.momo.vn".to_string(),
            momo_partner_code: "MOMOTEST".to_string(),
            momo_access_key: "access".to_string(),
            momo_secret_key: "secret".to_string(),
        };

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));
        let gateway = Arc::new(MockPaymentGateway::new());

        let state = Arc::new(AppState {
            config: config.clone(),
            room_repo: Arc::new(SqliteRoomRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            cancellation_repo: Arc::new(SqliteCancellationRepo::new(pool.clone())),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            auth_repo,
            auth_service,
            payment_gateway: gateway.clone(),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            gateway,
        }
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) {
        let payload = serde_json::json!({
            "username": username,
            "email": email,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Register failed in test helper: status {}", response.status());
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> AuthHeaders {
        let payload = serde_json::json!({
            "username": username,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies.iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..].find(';').unwrap_or(access_token_cookie.len() - start);
        let access_token = access_token_cookie[start..start+end].to_string();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        AuthHeaders {
            access_token,
            csrf_token
        }
    }

    /// Registers a fresh customer and logs them in. Email and password are
    /// derived from the username.
    pub async fn customer(&self, username: &str) -> AuthHeaders {
        self.register(username, &format!("{}@example.com", username), "password123").await;
        self.login(username, "password123").await
    }

    /// Registers "admin", promotes it via the role column, then logs in so
    /// the access token carries the admin role claim.
    pub async fn admin(&self) -> AuthHeaders {
        self.register("admin", "admin@example.com", "adminpassword").await;
        sqlx::query("UPDATE users SET role = 'admin' WHERE username = 'admin'")
            .execute(&self.pool)
            .await
            .expect("Failed to promote admin");
        self.login("admin", "adminpassword").await
    }

    pub async fn create_room(&self, auth: &AuthHeaders, name: &str, price: i64) -> Value {
        let payload = serde_json::json!({
            "name": name,
            "roomType": "deluxe",
            "bedType": "king",
            "price": price,
            "capacity": 4,
            "amenities": ["wifi", "minibar"],
            "images": ["https://img.example.com/room.jpg"],
            "description": "Test room"
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/rooms")
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("create_room failed in test helper: status {}", response.status());
        }

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    pub async fn create_booking(&self, auth: &AuthHeaders, room_id: &str, check_in: &str, check_out: &str) -> Value {
        let payload = serde_json::json!({
            "roomId": room_id,
            "checkInDate": check_in,
            "checkOutDate": check_out,
            "adultCount": 2,
            "childCount": 0,
            "roomCount": 1,
            "contactName": "Nguyen Van A",
            "contactEmail": "guest@example.com",
            "contactPhone": "0900000001"
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/bookings")
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("create_booking failed in test helper: status {}", response.status());
        }

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Drives a booking to confirmed/paid through the gateway callback.
    pub async fn pay_booking(&self, booking_id: &str) {
        let payload = serde_json::json!({
            "orderId": booking_id,
            "resultCode": 0,
            "transId": 99001_i64,
            "message": "Successful."
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/bookings/momo/callback")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("pay_booking failed in test helper: status {}", response.status());
        }
    }
}

/// ISO date `days` days from today, for stays that must lie in the future.
#[allow(dead_code)]
pub fn future_date(days: i64) -> String {
    (Utc::now().date_naive() + Duration::days(days)).to_string()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
