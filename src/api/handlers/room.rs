use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{CreateRoomRequest, UpdateRoomRequest};
use crate::api::dtos::responses::AvailabilityResponse;
use crate::api::extractors::auth::AdminUser;
use crate::domain::models::room::{NewRoomParams, Room};
use chrono::NaiveDate;
use sqlx::types::Json as SqlxJson;
use std::sync::Arc;
use tracing::info;

#[derive(serde::Deserialize)]
pub struct AvailabilityQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let rooms = state.room_repo.list().await?;
    Ok(Json(rooms))
}

pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let room = state.room_repo.find_by_id(&room_id).await?
        .ok_or(AppError::NotFound("Room not found".to_string()))?;
    Ok(Json(room))
}

pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    if query.check_out <= query.check_in {
        return Err(AppError::Validation("Check-out date must be after check-in date".into()));
    }

    state.room_repo.find_by_id(&room_id).await?
        .ok_or(AppError::NotFound("Room not found".to_string()))?;

    let overlapping = state.booking_repo
        .count_overlap(&room_id, query.check_in, query.check_out)
        .await?;

    Ok(Json(AvailabilityResponse {
        room_id,
        check_in: query.check_in,
        check_out: query.check_out,
        available: overlapping == 0,
    }))
}

pub async fn create_room(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.price <= 0 {
        return Err(AppError::Validation("Room price must be positive".into()));
    }
    if payload.capacity < 1 {
        return Err(AppError::Validation("Room capacity must be at least 1".into()));
    }

    let room = Room::new(NewRoomParams {
        name: payload.name,
        room_type: payload.room_type,
        bed_type: payload.bed_type,
        price: payload.price,
        capacity: payload.capacity,
        amenities: payload.amenities,
        images: payload.images,
        description: payload.description,
    });

    let created = state.room_repo.create(&room).await?;

    info!("Room created: {} ({})", created.id, created.name);

    Ok(Json(created))
}

pub async fn update_room(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Path(room_id): Path<String>,
    Json(payload): Json<UpdateRoomRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut room = state.room_repo.find_by_id(&room_id).await?
        .ok_or(AppError::NotFound("Room not found".to_string()))?;

    if let Some(name) = payload.name { room.name = name; }
    if let Some(room_type) = payload.room_type { room.room_type = room_type; }
    if let Some(bed_type) = payload.bed_type { room.bed_type = bed_type; }
    if let Some(price) = payload.price {
        if price <= 0 {
            return Err(AppError::Validation("Room price must be positive".into()));
        }
        room.price = price;
    }
    if let Some(capacity) = payload.capacity {
        if capacity < 1 {
            return Err(AppError::Validation("Room capacity must be at least 1".into()));
        }
        room.capacity = capacity;
    }
    if let Some(status) = payload.status { room.status = status; }
    if let Some(amenities) = payload.amenities { room.amenities = SqlxJson(amenities); }
    if let Some(images) = payload.images { room.images = SqlxJson(images); }
    if let Some(description) = payload.description { room.description = Some(description); }

    let updated = state.room_repo.update(&room).await?;

    info!("Room updated: {}", updated.id);

    Ok(Json(updated))
}

pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    // Bookings keep their room reference forever, so a room with any booking
    // history is retired via its status instead of deleted.
    let booked = state.booking_repo.count_for_room(&room_id).await?;
    if booked > 0 {
        return Err(AppError::Conflict("Room has bookings on record".into()));
    }

    state.room_repo.delete(&room_id).await?;

    info!("Room deleted: {}", room_id);

    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
