#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::models::{notifications, user::Role};
    use serde_json::json;
    use serial_test::serial;

    use crate::helpers::make_test_app;

    #[tokio::test]
    #[serial]
    async fn mark_read_only_touches_own_notifications() {
        let app = make_test_app().await;
        let (ana, ana_token) = app.user("Ana", Role::Profesor).await;
        let (_, beto_token) = app.user("Beto", Role::Tecnico).await;

        let note = notifications::Model::create(app.db(), ana.id, "Hello", "First")
            .await
            .unwrap();

        let (status, json) = app
            .post("/api/notifications/read", Some(&beto_token), json!({ "id": note.id }))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Notification not found");

        let (status, json) = app
            .post("/api/notifications/read", Some(&ana_token), json!({ "id": note.id }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["read"], true);
    }

    #[tokio::test]
    #[serial]
    async fn read_all_is_idempotent() {
        let app = make_test_app().await;
        let (ana, token) = app.user("Ana", Role::Profesor).await;

        for i in 0..3 {
            notifications::Model::create(app.db(), ana.id, "Hello", &format!("#{i}"))
                .await
                .unwrap();
        }

        let (status, json) = app
            .send("POST", "/api/notifications/read-all", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["updated"], 3);

        let (_, json) = app
            .send("POST", "/api/notifications/read-all", Some(&token), None)
            .await;
        assert_eq!(json["data"]["updated"], 0);

        let (_, inbox) = app.get("/api/notifications", &token).await;
        assert!(
            inbox["data"]
                .as_array()
                .unwrap()
                .iter()
                .all(|n| n["read"] == true)
        );
    }
}
