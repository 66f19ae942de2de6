use api::{auth::generate_jwt, routes::routes};
use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode},
};
use db::models::user::{self, Role};
use db::test_utils::{insert_user, setup_test_db};
use serde_json::Value;
use tower::ServiceExt;
use util::{config::AppConfig, state::AppState};

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// Fresh in-memory database, deterministic config, and the real `/api` router.
pub async fn make_test_app() -> TestApp {
    AppConfig::set_env("test");
    AppConfig::set_jwt_secret("integration-test-secret");
    AppConfig::set_jwt_duration_minutes(60u64);
    AppConfig::set_institution_email_domain("unison.mx");
    AppConfig::set_strict_status_transitions(false);
    AppConfig::set_smtp_host("");
    AppConfig::set_recaptcha_secret_key("");

    let state = AppState::new(setup_test_db().await);
    let router = Router::new().nest("/api", routes(state.clone()));
    TestApp { router, state }
}

impl TestApp {
    pub fn db(&self) -> &sea_orm::DatabaseConnection {
        self.state.db()
    }

    /// Inserts a user and returns it with a valid bearer token.
    pub async fn user(&self, first_name: &str, role: Role) -> (user::Model, String) {
        let user = insert_user(self.db(), first_name, role).await;
        let (token, _) = generate_jwt(&user).unwrap();
        (user, token)
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        read_json(response).await
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send("GET", uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send("PATCH", uri, Some(token), Some(body)).await
    }
}

async fn read_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}
