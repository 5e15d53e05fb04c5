pub mod auth;
pub mod booking;
pub mod cancellation;
pub mod health;
pub mod payment;
pub mod room;
pub mod user;
