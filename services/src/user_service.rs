use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use db::UnitOfWork;
use db::models::{
    password_reset_token,
    user::{self, Model, Theme},
};
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use tracing::info;

use crate::error::ServiceError;
use crate::requests::RegisterUser;
use crate::views::UserView;

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const MAX_RESET_TOKEN_MINUTES: u64 = 7 * 24 * 60;

/// Accounts: registration, credentials, preferences and password resets.
pub struct UserService;

impl UserService {
    pub fn hash_password(password: &str) -> Result<String, ServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ServiceError::Internal(format!("Password hashing failed: {e}")))
    }

    pub fn verify_password(user: &Model, password: &str) -> bool {
        let parsed = match PasswordHash::new(&user.password_hash) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    pub async fn register(
        db: &DatabaseConnection,
        input: RegisterUser,
    ) -> Result<UserView, ServiceError> {
        if user::Model::find_by_email(db, &input.email).await?.is_some() {
            return Err(ServiceError::Conflict("A user with this email already exists".into()));
        }

        let hash = Self::hash_password(&input.password)?;
        let created = user::Model::create(
            db,
            &input.first_name,
            &input.last_name,
            &input.email,
            &hash,
            input.role,
        )
        .await
        .map_err(conflict_on_duplicate)?;

        info!(user_id = created.id, role = %created.role, "User registered");
        Ok(created.into())
    }

    /// Resolves an email/password pair. Unknown email and wrong password are
    /// reported identically.
    pub async fn verify_credentials(
        db: &DatabaseConnection,
        email: &str,
        password: &str,
    ) -> Result<Model, ServiceError> {
        let user = user::Model::find_by_email(db, email)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized(INVALID_CREDENTIALS.into()))?;

        if !Self::verify_password(&user, password) {
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.into()));
        }
        Ok(user)
    }

    pub async fn find_user(db: &DatabaseConnection, user_id: i64) -> Result<Model, ServiceError> {
        user::Model::find_by_id(db, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))
    }

    pub async fn profile(db: &DatabaseConnection, user_id: i64) -> Result<UserView, ServiceError> {
        Ok(Self::find_user(db, user_id).await?.into())
    }

    pub async fn update_theme(
        db: &DatabaseConnection,
        user_id: i64,
        theme: Theme,
    ) -> Result<UserView, ServiceError> {
        let user = Self::find_user(db, user_id).await?;
        if user.theme == theme {
            return Ok(user.into());
        }
        Ok(user.set_theme(db, theme).await?.into())
    }

    /// Issues a reset token for `email`. The caller delivers it.
    pub async fn request_password_reset(
        db: &DatabaseConnection,
        email: &str,
        expiry_minutes: u64,
    ) -> Result<(Model, password_reset_token::Model), ServiceError> {
        let user = user::Model::find_by_email(db, email)
            .await?
            .ok_or_else(|| ServiceError::not_found("No account found with that email"))?;

        let expiry = expiry_minutes.min(MAX_RESET_TOKEN_MINUTES) as i64;
        let token = password_reset_token::Model::create(db, user.id, expiry).await?;

        info!(user_id = user.id, "Password reset requested");
        Ok((user, token))
    }

    /// Sets a new password and burns the token in one transaction. Returns the
    /// updated account.
    pub async fn reset_password(
        db: &DatabaseConnection,
        token: &str,
        new_password: &str,
    ) -> Result<Model, ServiceError> {
        let hash = Self::hash_password(new_password)?;

        let uow = UnitOfWork::begin(db, "reset_password").await?;

        let token = password_reset_token::Model::find_valid_token(uow.conn(), token)
            .await?
            .ok_or_else(|| ServiceError::validation("Invalid or expired reset token"))?;
        let user = user::Model::find_by_id(uow.conn(), token.user_id)
            .await?
            .ok_or_else(|| ServiceError::validation("Invalid or expired reset token"))?;

        let user = user.set_password_hash(uow.conn(), hash).await?;
        token.mark_as_used(uow.conn()).await?;

        uow.commit().await?;

        info!(user_id = user.id, "Password reset completed");
        Ok(user)
    }
}

fn conflict_on_duplicate(err: DbErr) -> ServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ServiceError::Conflict("A user with this email already exists".into())
        }
        _ => ServiceError::Storage(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::models::user::Role;
    use db::test_utils::setup_test_db;

    fn registration(email: &str) -> RegisterUser {
        RegisterUser {
            first_name: "Ana".into(),
            last_name: "Lopez".into(),
            email: email.into(),
            password: "correct horse".into(),
            role: Role::Profesor,
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let db = setup_test_db().await;
        let user = UserService::register(&db, registration("ana@unison.mx")).await.unwrap();
        assert_eq!(user.role, Role::Profesor);
        assert_eq!(user.theme, Theme::Light);

        let found = UserService::verify_credentials(&db, "ANA@unison.mx", "correct horse")
            .await
            .unwrap();
        assert_eq!(found.id, user.id);
        assert_ne!(found.password_hash, "correct horse");
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let db = setup_test_db().await;
        UserService::register(&db, registration("ana@unison.mx")).await.unwrap();
        let err = UserService::register(&db, registration("ana@unison.mx")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn bad_credentials_look_the_same() {
        let db = setup_test_db().await;
        UserService::register(&db, registration("ana@unison.mx")).await.unwrap();

        let wrong_password = UserService::verify_credentials(&db, "ana@unison.mx", "nope")
            .await
            .unwrap_err();
        let unknown_email = UserService::verify_credentials(&db, "who@unison.mx", "nope")
            .await
            .unwrap_err();

        assert_eq!(wrong_password.to_string(), INVALID_CREDENTIALS);
        assert_eq!(unknown_email.to_string(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn theme_is_persisted() {
        let db = setup_test_db().await;
        let user = UserService::register(&db, registration("ana@unison.mx")).await.unwrap();
        let updated = UserService::update_theme(&db, user.id, Theme::Dark).await.unwrap();
        assert_eq!(updated.theme, Theme::Dark);
        assert_eq!(UserService::profile(&db, user.id).await.unwrap().theme, Theme::Dark);
    }

    #[tokio::test]
    async fn reset_token_is_single_use() {
        let db = setup_test_db().await;
        UserService::register(&db, registration("ana@unison.mx")).await.unwrap();

        let (_, token) = UserService::request_password_reset(&db, "ana@unison.mx", 60)
            .await
            .unwrap();
        UserService::reset_password(&db, &token.token, "brand new pass")
            .await
            .unwrap();

        assert!(UserService::verify_credentials(&db, "ana@unison.mx", "brand new pass")
            .await
            .is_ok());

        let reused = UserService::reset_password(&db, &token.token, "another pass")
            .await
            .unwrap_err();
        assert!(matches!(reused, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn reset_for_unknown_email_is_not_found() {
        let db = setup_test_db().await;
        let err = UserService::request_password_reset(&db, "ghost@unison.mx", 60)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
