mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{future_date, TestApp};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        panic!("Response body is empty. Status: {}", status);
    }
    match serde_json::from_slice(&bytes) {
        Ok(v) => v,
        Err(e) => panic!("Failed to parse JSON: {:?}. Status: {}. Body: {:?}", e, status, String::from_utf8_lossy(&bytes))
    }
}

#[tokio::test]
async fn test_room_crud_flow() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    // 1. Create
    let room = app.create_room(&admin, "Deluxe 301", 1_200_000).await;
    let room_id = room["id"].as_str().unwrap().to_string();
    assert_eq!(room["name"], "Deluxe 301");
    assert_eq!(room["price"], 1_200_000);
    assert_eq!(room["status"], "available");
    assert_eq!(room["amenities"].as_array().unwrap().len(), 2);

    // 2. Public list and get, no auth required
    let list_res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/rooms")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(list_res.status(), StatusCode::OK);
    let rooms = parse_body(list_res).await;
    assert_eq!(rooms.as_array().unwrap().len(), 1);

    // 3. Update price and status
    let update_res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/rooms/{}", room_id))
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "price": 1_500_000,
                "status": "maintenance"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(update_res.status(), StatusCode::OK);
    let updated = parse_body(update_res).await;
    assert_eq!(updated["price"], 1_500_000);
    assert_eq!(updated["status"], "maintenance");
    assert_eq!(updated["name"], "Deluxe 301");

    // 4. Delete
    let delete_res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/v1/rooms/{}", room_id))
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(delete_res.status(), StatusCode::OK);

    let get_res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/v1/rooms/{}", room_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(get_res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_room_writes_require_admin() {
    let app = TestApp::new().await;
    let customer = app.customer("linh").await;

    let response = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/rooms")
            .header(header::COOKIE, format!("access_token={}", customer.access_token))
            .header("X-CSRF-Token", &customer.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "name": "Sneaky Suite",
                "roomType": "suite",
                "bedType": "king",
                "price": 1,
                "capacity": 2
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_availability_reflects_bookings() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let customer = app.customer("linh").await;

    let room = app.create_room(&admin, "Deluxe 301", 800_000).await;
    let room_id = room["id"].as_str().unwrap();

    app.create_booking(&customer, room_id, &future_date(10), &future_date(12)).await;

    let check = |from: String, to: String| {
        let uri = format!("/api/v1/rooms/{}/availability?check_in={}&check_out={}", room_id, from, to);
        let router = app.router.clone();
        async move {
            let res = router.oneshot(
                Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
            ).await.unwrap();
            assert_eq!(res.status(), StatusCode::OK);
            parse_body(res).await["available"].as_bool().unwrap()
        }
    };

    // Same dates: taken
    assert!(!check(future_date(10), future_date(12)).await);
    // Enclosing range: taken
    assert!(!check(future_date(8), future_date(15)).await);
    // Partial overlap: taken
    assert!(!check(future_date(11), future_date(14)).await);
    // Back-to-back, checkout day frees the room
    assert!(check(future_date(12), future_date(14)).await);
    assert!(check(future_date(8), future_date(10)).await);
}

#[tokio::test]
async fn test_availability_ignores_cancelled_bookings() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let customer = app.customer("linh").await;

    let room = app.create_room(&admin, "Deluxe 301", 800_000).await;
    let room_id = room["id"].as_str().unwrap();

    let booking = app.create_booking(&customer, room_id, &future_date(10), &future_date(12)).await;
    let booking_id = booking["id"].as_str().unwrap();

    let cancel_res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/bookings/{}/cancel", booking_id))
            .header(header::COOKIE, format!("access_token={}", customer.access_token))
            .header("X-CSRF-Token", &customer.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(cancel_res.status(), StatusCode::OK);

    let uri = format!(
        "/api/v1/rooms/{}/availability?check_in={}&check_out={}",
        room_id, future_date(10), future_date(12)
    );
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(res).await;
    assert_eq!(body["available"], true);
}

#[tokio::test]
async fn test_availability_rejects_inverted_range() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let room = app.create_room(&admin, "Deluxe 301", 800_000).await;
    let room_id = room["id"].as_str().unwrap();

    let uri = format!(
        "/api/v1/rooms/{}/availability?check_in={}&check_out={}",
        room_id, future_date(12), future_date(10)
    );
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_room_delete_blocked_by_booking_history() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let customer = app.customer("linh").await;

    let room = app.create_room(&admin, "Deluxe 301", 800_000).await;
    let room_id = room["id"].as_str().unwrap().to_string();

    let booking = app.create_booking(&customer, &room_id, &future_date(10), &future_date(12)).await;
    let booking_id = booking["id"].as_str().unwrap().to_string();

    let delete_res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/v1/rooms/{}", room_id))
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(delete_res.status(), StatusCode::CONFLICT);

    // Even a cancelled booking keeps its room reference, so the room stays
    let cancel_res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/bookings/{}/cancel", booking_id))
            .header(header::COOKIE, format!("access_token={}", customer.access_token))
            .header("X-CSRF-Token", &customer.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(cancel_res.status(), StatusCode::OK);

    let delete_res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/v1/rooms/{}", room_id))
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(delete_res.status(), StatusCode::CONFLICT);

    // A room nothing ever booked deletes cleanly
    let spare = app.create_room(&admin, "Standard 102", 500_000).await;
    let spare_id = spare["id"].as_str().unwrap();
    let delete_res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/v1/rooms/{}", spare_id))
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(delete_res.status(), StatusCode::OK);
}
