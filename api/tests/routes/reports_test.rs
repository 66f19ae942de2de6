#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;
    use serial_test::serial;

    use crate::helpers::make_test_app;

    #[tokio::test]
    #[serial]
    async fn report_lifecycle() {
        let app = make_test_app().await;
        let (_, ana) = app.user("Ana", Role::Estudiante).await;
        let (_, beto) = app.user("Beto", Role::Profesor).await;
        let (_, admin) = app.user("Carla", Role::Admin).await;

        let (status, created) = app
            .post(
                "/api/reports",
                Some(&ana),
                json!({ "title": "Slow", "description": "Dashboard takes ages", "type": "performance" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["data"]["status"], "pending");
        assert_eq!(created["data"]["type"], "performance");
        let id = created["data"]["id"].as_i64().unwrap();

        let (_, mine) = app.get("/api/reports/my", &ana).await;
        assert_eq!(mine["data"].as_array().unwrap().len(), 1);
        let (_, theirs) = app.get("/api/reports/my", &beto).await;
        assert!(theirs["data"].as_array().unwrap().is_empty());

        let uri = format!("/api/reports/{id}");
        let (status, _) = app
            .patch(&uri, &beto, json!({ "status": "approved" }))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, updated) = app
            .patch(&uri, &admin, json!({ "status": "in_review" }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["data"]["status"], "in_review");

        let (_, all) = app.get("/api/reports", &beto).await;
        assert_eq!(all["data"].as_array().unwrap().len(), 1);
        assert_eq!(all["data"][0]["user"]["firstName"], "Ana");
    }

    #[tokio::test]
    #[serial]
    async fn report_input_is_validated() {
        let app = make_test_app().await;
        let (_, ana) = app.user("Ana", Role::Estudiante).await;

        let (status, json) = app
            .post(
                "/api/reports",
                Some(&ana),
                json!({ "title": "Idea", "description": "More coffee", "type": "wish" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Invalid type value 'wish'");

        let (status, _) = app.get("/api/reports/31337", &ana).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
