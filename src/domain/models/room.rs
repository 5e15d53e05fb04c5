use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Booked,
    Maintenance,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub room_type: String,
    pub bed_type: String,
    pub price: i64,
    pub capacity: i32,
    pub status: RoomStatus,
    pub amenities: Json<Vec<String>>,
    pub images: Json<Vec<String>>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewRoomParams {
    pub name: String,
    pub room_type: String,
    pub bed_type: String,
    pub price: i64,
    pub capacity: i32,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub description: Option<String>,
}

impl Room {
    pub fn new(params: NewRoomParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            room_type: params.room_type,
            bed_type: params.bed_type,
            price: params.price,
            capacity: params.capacity,
            status: RoomStatus::Available,
            amenities: Json(params.amenities),
            images: Json(params.images),
            description: params.description,
            created_at: Utc::now(),
        }
    }
}
