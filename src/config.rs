use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub public_base_url: String,
    pub jwt_secret_key: String, // Private key (PEM)
    pub jwt_public_key: String, // Public key (PEM)
    pub auth_issuer: String,
    pub momo_endpoint: String,
    pub momo_partner_code: String,
    pub momo_access_key: String,
    pub momo_secret_key: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            public_base_url: env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            jwt_secret_key: env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set (Ed25519 Private Key)"),
            jwt_public_key: env::var("JWT_PUBLIC_KEY").expect("JWT_PUBLIC_KEY must be set (Ed25519 Public Key)"),
            auth_issuer: env::var("AUTH_ISSUER").unwrap_or_else(|_| "https://api.hotel-booking.local".to_string()),
            momo_endpoint: env::var("MOMO_ENDPOINT").unwrap_or_else(|_| "https://test-payment.momo.vn".to_string()),
            momo_partner_code: env::var("MOMO_PARTNER_CODE").expect("MOMO_PARTNER_CODE must be set"),
            momo_access_key: env::var("MOMO_ACCESS_KEY").expect("MOMO_ACCESS_KEY must be set"),
            momo_secret_key: env::var("MOMO_SECRET_KEY").expect("MOMO_SECRET_KEY must be set"),
        }
    }
}
