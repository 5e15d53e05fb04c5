use std::sync::Arc;
use crate::domain::ports::{
    AuthRepository, BookingRepository, CancellationRequestRepository,
    PaymentGateway, RoomRepository, UserRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub room_repo: Arc<dyn RoomRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub cancellation_repo: Arc<dyn CancellationRequestRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub auth_service: Arc<AuthService>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
}
