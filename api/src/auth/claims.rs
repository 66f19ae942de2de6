use db::models::user::Role;
use serde::{Deserialize, Serialize};
use services::Actor;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub role: Role,
    pub exp: usize,
}

/// Verified caller, inserted into request extensions by the auth guard.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn actor(&self) -> Actor {
        Actor::new(self.0.sub, self.0.role)
    }
}
