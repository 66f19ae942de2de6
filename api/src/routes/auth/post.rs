use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use services::{
    ServiceError,
    requests::{
        ForgotPasswordRequest, LoginRequest, RegisterRequest, RegisterUser, ResetPasswordRequest,
    },
    user_service::UserService,
    views::UserView,
};
use util::{config::AppConfig, state::AppState};
use validator::Validate;

use crate::{
    auth::generate_jwt,
    response::{ApiError, ApiResult, created, ok},
    services::{email::EmailService, recaptcha::RecaptchaService},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserView,
    pub token: String,
    pub expires_at: String,
}

/// POST /auth/login
///
/// ### Request Body
/// ```json
/// { "email": "ana@unison.mx", "password": "secret123" }
/// ```
///
/// ### Responses
/// - `200 OK` with `{ user, token, expiresAt }`
/// - `400 Bad Request` on a malformed email or empty password
/// - `401 Unauthorized` with "Invalid credentials" for unknown email or wrong password
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    req.validate().map_err(ServiceError::from)?;

    let user = UserService::verify_credentials(app_state.db(), &req.email, &req.password).await?;
    let (token, expires_at) =
        generate_jwt(&user).map_err(|e| ApiError::internal(format!("Token encoding failed: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");
    ok(
        LoginResponse {
            user: user.into(),
            token,
            expires_at,
        },
        "Login successful",
    )
}

/// POST /auth/register
///
/// ### Request Body
/// ```json
/// {
///   "firstName": "Ana",
///   "lastName": "Lopez",
///   "email": "ana@unison.mx",
///   "password": "secret123",
///   "role": "profesor"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the new user
/// - `400 Bad Request` on missing fields, a short password, an unknown role or a
///   non-institutional email
/// - `409 Conflict` when the email is taken
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<UserView> {
    let input = RegisterUser::try_from(req)?;
    let user = UserService::register(app_state.db(), input).await?;
    created(user, "User registered successfully")
}

/// POST /auth/forgot-password
///
/// Issues a reset token and emails the link `<FRONTEND_URL>/reset-password?token=...`.
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request` on a malformed email
/// - `404 Not Found` when no account uses the email
/// - `500 Internal Server Error` when the email could not be sent
pub async fn forgot_password(
    State(app_state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> ApiResult<()> {
    req.validate().map_err(ServiceError::from)?;

    let expiry_minutes = AppConfig::global().reset_token_expiry_minutes;
    let (user, token) =
        UserService::request_password_reset(app_state.db(), &req.email, expiry_minutes).await?;

    if let Err(e) = EmailService::send_password_reset_email(
        &user.email,
        &user.first_name,
        &token.token,
        expiry_minutes,
    )
    .await
    {
        tracing::error!(user_id = user.id, error = %e, "Failed to send password reset email");
        return Err(ApiError::internal("Failed to send password reset email"));
    }

    ok((), "Password reset instructions have been sent to your email")
}

/// POST /auth/reset-password
///
/// ### Request Body
/// ```json
/// { "token": "abc123...", "password": "newpassword" }
/// ```
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request` when the token is invalid, expired or already used, or
///   the password is shorter than 8 characters
pub async fn reset_password(
    State(app_state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> ApiResult<()> {
    req.validate().map_err(ServiceError::from)?;

    let user = UserService::reset_password(app_state.db(), &req.token, &req.password).await?;

    if let Err(e) = EmailService::send_password_changed_email(&user.email).await {
        tracing::warn!(user_id = user.id, error = %e, "Failed to send password changed email");
    }

    ok((), "Password has been reset successfully")
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecaptchaRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct RecaptchaResponse {
    pub success: bool,
}

/// POST /auth/verify-recaptcha
///
/// ### Responses
/// - `200 OK` with `{ success }`; `success` is true when Google accepts the
///   token with a score of at least 0.5
/// - `400 Bad Request` when the token is empty
/// - `500 Internal Server Error` when `RECAPTCHA_SECRET_KEY` is not set or
///   Google cannot be reached
pub async fn verify_recaptcha(Json(req): Json<RecaptchaRequest>) -> ApiResult<RecaptchaResponse> {
    if req.token.trim().is_empty() {
        return Err(ServiceError::validation("reCAPTCHA token is required").into());
    }

    let secret = AppConfig::global().recaptcha_secret_key.clone();
    if secret.is_empty() {
        return Err(ApiError::internal("reCAPTCHA is not configured"));
    }

    let success = RecaptchaService::verify(&secret, &req.token)
        .await
        .map_err(|e| ApiError::internal(format!("reCAPTCHA verification failed: {e}")))?;

    let message = if success {
        "reCAPTCHA verified"
    } else {
        "reCAPTCHA verification rejected"
    };
    ok(RecaptchaResponse { success }, message)
}
