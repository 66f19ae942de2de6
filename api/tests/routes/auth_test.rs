#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::models::password_reset_token;
    use sea_orm::EntityTrait;
    use serde_json::{Value, json};
    use serial_test::serial;
    use util::config::AppConfig;

    use crate::helpers::{TestApp, make_test_app};

    fn registration(email: &str) -> Value {
        json!({
            "firstName": "Ana",
            "lastName": "Lopez",
            "email": email,
            "password": "secret123",
            "role": "profesor"
        })
    }

    async fn login(app: &TestApp, email: &str, password: &str) -> (StatusCode, Value) {
        app.post(
            "/api/auth/login",
            None,
            json!({ "email": email, "password": password }),
        )
        .await
    }

    #[tokio::test]
    #[serial]
    async fn register_returns_user_without_hash() {
        let app = make_test_app().await;

        let (status, json) = app
            .post("/api/auth/register", None, registration("ana@unison.mx"))
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["email"], "ana@unison.mx");
        assert_eq!(json["data"]["role"], "profesor");
        assert_eq!(json["data"]["theme"], "light");
        assert!(json["data"].get("passwordHash").is_none());
        assert!(json["data"].get("password_hash").is_none());
    }

    #[tokio::test]
    #[serial]
    async fn register_rejects_duplicates_and_foreign_domains() {
        let app = make_test_app().await;
        app.post("/api/auth/register", None, registration("ana@unison.mx"))
            .await;

        let (status, json) = app
            .post("/api/auth/register", None, registration("ANA@unison.mx"))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "A user with this email already exists");

        let (status, _) = app
            .post("/api/auth/register", None, registration("ana@gmail.com"))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[serial]
    async fn register_rejects_short_password_and_unknown_role() {
        let app = make_test_app().await;

        let mut body = registration("ana@unison.mx");
        body["password"] = json!("short");
        let (status, json) = app.post("/api/auth/register", None, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);

        let mut body = registration("ana@unison.mx");
        body["role"] = json!("janitor");
        let (status, json) = app.post("/api/auth/register", None, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Invalid role value 'janitor'");
    }

    #[tokio::test]
    #[serial]
    async fn login_issues_token_usable_on_me() {
        let app = make_test_app().await;
        app.post("/api/auth/register", None, registration("ana@unison.mx"))
            .await;

        let (status, json) = login(&app, "ana@unison.mx", "secret123").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"]["expiresAt"].is_string());
        let token = json["data"]["token"].as_str().unwrap().to_owned();

        let (status, me) = app.get("/api/auth/me", &token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["data"]["firstName"], "Ana");
    }

    #[tokio::test]
    #[serial]
    async fn login_failures_are_indistinguishable() {
        let app = make_test_app().await;
        app.post("/api/auth/register", None, registration("ana@unison.mx"))
            .await;

        let (wrong_status, wrong) = login(&app, "ana@unison.mx", "not-it-at-all").await;
        let (unknown_status, unknown) = login(&app, "ghost@unison.mx", "secret123").await;

        assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong["message"], "Invalid credentials");
        assert_eq!(wrong["message"], unknown["message"]);
    }

    #[tokio::test]
    #[serial]
    async fn me_requires_a_valid_token() {
        let app = make_test_app().await;

        let (status, _) = app.send("GET", "/api/auth/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, json) = app.get("/api/auth/me", "not-a-jwt").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Invalid or expired token");
    }

    #[tokio::test]
    #[serial]
    async fn theme_update_persists() {
        let app = make_test_app().await;
        let (_, token) = app.user("Ana", db::models::user::Role::Estudiante).await;

        let (status, json) = app
            .patch("/api/auth/theme", &token, json!({ "theme": "dark" }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["theme"], "dark");

        let (status, _) = app
            .patch("/api/auth/theme", &token, json!({ "theme": "sepia" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, me) = app.get("/api/auth/me", &token).await;
        assert_eq!(me["data"]["theme"], "dark");
    }

    #[tokio::test]
    #[serial]
    async fn password_reset_flow() {
        let app = make_test_app().await;
        app.post("/api/auth/register", None, registration("ana@unison.mx"))
            .await;

        let (status, _) = app
            .post(
                "/api/auth/forgot-password",
                None,
                json!({ "email": "ghost@unison.mx" }),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app
            .post(
                "/api/auth/forgot-password",
                None,
                json!({ "email": "ana@unison.mx" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let token = password_reset_token::Entity::find()
            .one(app.db())
            .await
            .unwrap()
            .expect("token was issued")
            .token;

        let (status, _) = app
            .post(
                "/api/auth/reset-password",
                None,
                json!({ "token": token, "password": "brand-new-pass" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = login(&app, "ana@unison.mx", "brand-new-pass").await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = app
            .post(
                "/api/auth/reset-password",
                None,
                json!({ "token": token, "password": "yet-another-pass" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Invalid or expired reset token");
    }

    #[tokio::test]
    #[serial]
    async fn recaptcha_requires_token_and_secret() {
        let app = make_test_app().await;

        let (status, _) = app
            .post("/api/auth/verify-recaptcha", None, json!({ "token": "" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        AppConfig::set_recaptcha_secret_key("");
        let (status, json) = app
            .post("/api/auth/verify-recaptcha", None, json!({ "token": "abc" }))
            .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "reCAPTCHA is not configured");
    }
}
