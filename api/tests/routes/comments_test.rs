#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;
    use serial_test::serial;

    use crate::helpers::make_test_app;

    #[tokio::test]
    #[serial]
    async fn comment_notifies_creator_and_assignee() {
        let app = make_test_app().await;
        let (_, alicia) = app.user("Alicia", Role::Profesor).await;
        let (tech, beto) = app.user("Beto", Role::Tecnico).await;
        let (_, carla) = app.user("Carla", Role::Estudiante).await;

        let (_, ticket) = app
            .post(
                "/api/tickets",
                Some(&alicia),
                json!({ "title": "Printer down", "description": "Jammed", "category": "Hardware" }),
            )
            .await;
        let id = ticket["data"]["id"].as_i64().unwrap();
        app.patch(
            &format!("/api/tickets/{id}"),
            &beto,
            json!({ "assigneeId": tech.id }),
        )
        .await;

        let (status, comment) = app
            .post(
                &format!("/api/tickets/{id}/comments"),
                Some(&carla),
                json!({ "content": "Same problem in room 4" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(comment["data"]["content"], "Same problem in room 4");
        assert_eq!(comment["data"]["user"]["firstName"], "Carla");

        let (_, alicia_inbox) = app.get("/api/notifications", &alicia).await;
        let (_, beto_inbox) = app.get("/api/notifications", &beto).await;
        let (_, carla_inbox) = app.get("/api/notifications", &carla).await;
        assert_eq!(alicia_inbox["data"].as_array().unwrap().len(), 1);
        assert_eq!(beto_inbox["data"].as_array().unwrap().len(), 1);
        assert_eq!(carla_inbox["data"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    #[serial]
    async fn creator_commenting_on_own_ticket_notifies_nobody() {
        let app = make_test_app().await;
        let (_, alicia) = app.user("Alicia", Role::Profesor).await;

        let (_, ticket) = app
            .post(
                "/api/tickets",
                Some(&alicia),
                json!({ "title": "Printer down", "description": "Jammed", "category": "Hardware" }),
            )
            .await;
        let id = ticket["data"]["id"].as_i64().unwrap();

        app.post(
            &format!("/api/tickets/{id}/comments"),
            Some(&alicia),
            json!({ "content": "Still broken" }),
        )
        .await;

        let (_, inbox) = app.get("/api/notifications", &alicia).await;
        assert!(inbox["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn comments_are_listed_oldest_first() {
        let app = make_test_app().await;
        let (_, alicia) = app.user("Alicia", Role::Profesor).await;

        let (_, ticket) = app
            .post(
                "/api/tickets",
                Some(&alicia),
                json!({ "title": "Printer down", "description": "Jammed", "category": "Hardware" }),
            )
            .await;
        let uri = format!("/api/tickets/{}/comments", ticket["data"]["id"]);

        for content in ["first", "second"] {
            app.post(&uri, Some(&alicia), json!({ "content": content }))
                .await;
        }

        let (status, json) = app.get(&uri, &alicia).await;
        assert_eq!(status, StatusCode::OK);
        let contents: Vec<_> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["content"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[tokio::test]
    #[serial]
    async fn blank_comment_and_missing_ticket_are_rejected() {
        let app = make_test_app().await;
        let (_, alicia) = app.user("Alicia", Role::Profesor).await;

        let (status, _) = app
            .post(
                "/api/tickets/77/comments",
                Some(&alicia),
                json!({ "content": "hello" }),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app.get("/api/tickets/77/comments", &alicia).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, ticket) = app
            .post(
                "/api/tickets",
                Some(&alicia),
                json!({ "title": "Printer down", "description": "Jammed", "category": "Hardware" }),
            )
            .await;
        let (status, _) = app
            .post(
                &format!("/api/tickets/{}/comments", ticket["data"]["id"]),
                Some(&alicia),
                json!({ "content": "   " }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
