use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let users = state.user_repo.list().await?;
    Ok(Json(users))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if admin.id == user_id {
        return Err(AppError::Conflict("Cannot delete yourself".into()));
    }

    state.user_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    let bookings = state.booking_repo.list_by_user(&user_id).await?;
    if !bookings.is_empty() {
        return Err(AppError::Conflict("User still has bookings on record".into()));
    }

    state.user_repo.delete(&user_id).await?;

    info!("User deleted: {}", user_id);

    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
