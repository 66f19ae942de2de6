pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use claims::{AuthUser, Claims};

use chrono::{Duration, Utc};
use db::models::user;
use jsonwebtoken::{EncodingKey, Header, encode};
use util::config::AppConfig;

/// Signs a token for `user` and returns it with its RFC 3339 expiry.
pub fn generate_jwt(user: &user::Model) -> Result<(String, String), jsonwebtoken::errors::Error> {
    let (secret, minutes) = {
        let config = AppConfig::global();
        (config.jwt_secret.clone(), config.jwt_duration_minutes)
    };

    let expiry = Utc::now() + Duration::minutes(minutes as i64);
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role,
        exp: expiry.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok((token, expiry.to_rfc3339()))
}
