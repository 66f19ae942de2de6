#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::models::{
        notifications,
        tickets::{self, TicketPriority},
        user::Role,
    };
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
    use serde_json::{Value, json};
    use serial_test::serial;
    use util::config::AppConfig;

    use crate::helpers::{TestApp, make_test_app};

    async fn file_ticket(app: &TestApp, token: &str, title: &str, category: &str) -> Value {
        let (status, json) = app
            .post(
                "/api/tickets",
                Some(token),
                json!({
                    "title": title,
                    "description": "Nothing prints since this morning",
                    "category": category
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{json}");
        json["data"].clone()
    }

    async fn notification_count(app: &TestApp, user_id: i64) -> u64 {
        notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id))
            .count(app.db())
            .await
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn tickets_require_authentication() {
        let app = make_test_app().await;
        let (status, json) = app.send("GET", "/api/tickets", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    #[serial]
    async fn create_ticket_starts_new_and_unassigned() {
        let app = make_test_app().await;
        let (profesor, token) = app.user("Alicia", Role::Profesor).await;

        let ticket = file_ticket(&app, &token, "Printer down", "Hardware").await;

        assert_eq!(ticket["title"], "Printer down");
        assert_eq!(ticket["status"], "new");
        assert_eq!(ticket["priority"], "medium");
        assert_eq!(ticket["creatorId"], profesor.id);
        assert!(ticket["assigneeId"].is_null());
        assert_eq!(ticket["creator"]["firstName"], "Alicia");

        let id = ticket["id"].as_i64().unwrap();
        let (status, detail) = app.get(&format!("/api/tickets/{id}"), &token).await;
        assert_eq!(status, StatusCode::OK);
        let history = detail["data"]["history"].as_array().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["action"], "Ticket created");
    }

    #[tokio::test]
    #[serial]
    async fn create_ticket_validates_input() {
        let app = make_test_app().await;
        let (_, token) = app.user("Alicia", Role::Profesor).await;

        let (status, json) = app
            .post(
                "/api/tickets",
                Some(&token),
                json!({ "title": "  ", "description": "x", "category": "Hardware" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Title is required");

        let (status, json) = app
            .post(
                "/api/tickets",
                Some(&token),
                json!({ "title": "t", "description": "d", "category": "c", "priority": "whenever" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Invalid priority value 'whenever'");
    }

    #[tokio::test]
    #[serial]
    async fn technicians_cannot_file_tickets() {
        let app = make_test_app().await;
        let (_, token) = app.user("Beto", Role::Tecnico).await;

        let (status, _) = app
            .post(
                "/api/tickets",
                Some(&token),
                json!({ "title": "t", "description": "d", "category": "c" }),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    #[serial]
    async fn technician_self_assignment_records_history_without_notification() {
        let app = make_test_app().await;
        let (_, creator_token) = app.user("Alicia", Role::Profesor).await;
        let (tech, tech_token) = app.user("Beto", Role::Tecnico).await;

        let ticket = file_ticket(&app, &creator_token, "Printer down", "Hardware").await;
        let id = ticket["id"].as_i64().unwrap();

        let (status, json) = app
            .patch(
                &format!("/api/tickets/{id}"),
                &tech_token,
                json!({ "assigneeId": tech.id }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["assigneeId"], tech.id);
        assert_eq!(json["data"]["assignee"]["firstName"], "Beto");

        let (_, history) = app
            .get(&format!("/api/tickets/{id}/history"), &tech_token)
            .await;
        let entries = history["data"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["action"], "Ticket assigned to Beto Tester");
        assert_eq!(notification_count(&app, tech.id).await, 0);
    }

    #[tokio::test]
    #[serial]
    async fn admin_assignment_notifies_assignee_once() {
        let app = make_test_app().await;
        let (_, creator_token) = app.user("Alicia", Role::Profesor).await;
        let (tech, _) = app.user("Beto", Role::Tecnico).await;
        let (_, admin_token) = app.user("Carla", Role::Admin).await;

        let ticket = file_ticket(&app, &creator_token, "Printer down", "Hardware").await;
        let id = ticket["id"].as_i64().unwrap();
        let uri = format!("/api/tickets/{id}");

        app.patch(&uri, &admin_token, json!({ "assigneeId": tech.id }))
            .await;
        // same assignee again: no new notification or history
        app.patch(&uri, &admin_token, json!({ "assigneeId": tech.id }))
            .await;

        assert_eq!(notification_count(&app, tech.id).await, 1);
        let (_, history) = app.get(&format!("{uri}/history"), &admin_token).await;
        assert_eq!(history["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    #[serial]
    async fn status_change_writes_one_entry_and_same_status_writes_none() {
        let app = make_test_app().await;
        let (_, creator_token) = app.user("Alicia", Role::Profesor).await;
        let (_, tech_token) = app.user("Beto", Role::Tecnico).await;

        let ticket = file_ticket(&app, &creator_token, "Printer down", "Hardware").await;
        let uri = format!("/api/tickets/{}", ticket["id"]);

        let (status, json) = app
            .patch(&uri, &tech_token, json!({ "status": "in_progress" }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "in_progress");

        app.patch(&uri, &tech_token, json!({ "status": "in_progress" }))
            .await;

        let (_, history) = app.get(&format!("{uri}/history"), &tech_token).await;
        let entries = history["data"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["action"], "Status changed to 'in_progress'");
    }

    #[tokio::test]
    #[serial]
    async fn put_is_an_alias_for_patch() {
        let app = make_test_app().await;
        let (_, creator_token) = app.user("Alicia", Role::Profesor).await;
        let (_, tech_token) = app.user("Beto", Role::Tecnico).await;

        let ticket = file_ticket(&app, &creator_token, "Printer down", "Hardware").await;
        let uri = format!("/api/tickets/{}", ticket["id"]);

        let (status, json) = app
            .send("PUT", &uri, Some(&tech_token), Some(json!({ "priority": "high" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["priority"], "high");
    }

    #[tokio::test]
    #[serial]
    async fn non_staff_permissions_are_enforced() {
        let app = make_test_app().await;
        let (_, creator_token) = app.user("Alicia", Role::Profesor).await;
        let (_, other_token) = app.user("Diego", Role::Profesor).await;

        let ticket = file_ticket(&app, &creator_token, "Printer down", "Hardware").await;
        let uri = format!("/api/tickets/{}", ticket["id"]);

        let (status, _) = app
            .patch(&uri, &other_token, json!({ "status": "closed" }))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app
            .patch(&uri, &creator_token, json!({ "priority": "high" }))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app
            .patch(&uri, &creator_token, json!({ "status": "in_progress" }))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = app
            .patch(&uri, &creator_token, json!({ "status": "closed" }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "closed");
    }

    #[tokio::test]
    #[serial]
    async fn assignee_must_be_staff() {
        let app = make_test_app().await;
        let (student, _) = app.user("Eva", Role::Estudiante).await;
        let (_, creator_token) = app.user("Alicia", Role::Profesor).await;
        let (_, admin_token) = app.user("Carla", Role::Admin).await;

        let ticket = file_ticket(&app, &creator_token, "Printer down", "Hardware").await;
        let uri = format!("/api/tickets/{}", ticket["id"]);

        let (status, _) = app
            .patch(&uri, &admin_token, json!({ "assigneeId": student.id }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .patch(&uri, &admin_token, json!({ "assigneeId": 9999 }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[serial]
    async fn strict_mode_rejects_skipping_states() {
        let app = make_test_app().await;
        AppConfig::set_strict_status_transitions(true);
        let (_, creator_token) = app.user("Alicia", Role::Profesor).await;
        let (_, tech_token) = app.user("Beto", Role::Tecnico).await;

        let ticket = file_ticket(&app, &creator_token, "Printer down", "Hardware").await;
        let uri = format!("/api/tickets/{}", ticket["id"]);

        let (status, json) = app
            .patch(&uri, &tech_token, json!({ "status": "closed" }))
            .await;
        AppConfig::set_strict_status_transitions(false);

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Cannot change status from 'new' to 'closed'");
    }

    #[tokio::test]
    #[serial]
    async fn missing_ticket_is_not_found() {
        let app = make_test_app().await;
        let (_, token) = app.user("Alicia", Role::Profesor).await;

        let (status, json) = app.get("/api/tickets/4242", &token).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Ticket not found");

        let (status, _) = app
            .patch("/api/tickets/4242", &token, json!({ "status": "closed" }))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn list_paginates_and_filters() {
        let app = make_test_app().await;
        let (creator, token) = app.user("Alicia", Role::Profesor).await;

        for i in 0..25 {
            let category = if i % 5 == 0 { "Network" } else { "Hardware" };
            tickets::Model::create(
                app.db(),
                creator.id,
                &format!("Ticket {i}"),
                "Something broke",
                category,
                TicketPriority::Low,
            )
            .await
            .unwrap();
        }

        let (status, json) = app.get("/api/tickets?page=2&limit=10", &token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["tickets"].as_array().unwrap().len(), 10);
        assert_eq!(json["data"]["pagination"]["total"], 25);
        assert_eq!(json["data"]["pagination"]["page"], 2);
        assert_eq!(json["data"]["pagination"]["totalPages"], 3);

        let (_, json) = app.get("/api/tickets?category=Network", &token).await;
        assert_eq!(json["data"]["pagination"]["total"], 5);

        let (_, json) = app.get("/api/tickets?search=TICKET%202", &token).await;
        // "Ticket 2" and "Ticket 20".."Ticket 24"
        assert_eq!(json["data"]["pagination"]["total"], 6);

        let (status, _) = app.get("/api/tickets?status=lost", &token).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[serial]
    async fn my_tickets_includes_created_and_assigned() {
        let app = make_test_app().await;
        let (_, creator_token) = app.user("Alicia", Role::Profesor).await;
        let (tech, tech_token) = app.user("Beto", Role::Tecnico).await;
        let (_, other_token) = app.user("Diego", Role::Profesor).await;

        let ticket = file_ticket(&app, &creator_token, "Printer down", "Hardware").await;
        file_ticket(&app, &other_token, "Projector", "Hardware").await;
        app.patch(
            &format!("/api/tickets/{}", ticket["id"]),
            &tech_token,
            json!({ "assigneeId": tech.id }),
        )
        .await;

        let (_, mine) = app.get("/api/tickets/my", &creator_token).await;
        assert_eq!(mine["data"].as_array().unwrap().len(), 1);

        let (_, assigned) = app.get("/api/tickets/my", &tech_token).await;
        let assigned = assigned["data"].as_array().unwrap();
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0]["title"], "Printer down");
    }

    #[tokio::test]
    #[serial]
    async fn dashboard_figures() {
        let app = make_test_app().await;
        let (_, token) = app.user("Alicia", Role::Profesor).await;
        let (_, tech_token) = app.user("Beto", Role::Tecnico).await;

        file_ticket(&app, &token, "Printer down", "Hardware").await;
        file_ticket(&app, &token, "Projector", "Hardware").await;
        let wifi = file_ticket(&app, &token, "No wifi", "Network").await;
        app.patch(
            &format!("/api/tickets/{}", wifi["id"]),
            &tech_token,
            json!({ "status": "in_progress" }),
        )
        .await;

        let (status, stats) = app.get("/api/tickets/stats", &token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["data"]["total"], 3);
        assert_eq!(stats["data"]["open"], 2);
        assert_eq!(stats["data"]["inProgress"], 1);
        assert_eq!(stats["data"]["resolved"], 0);
        assert_eq!(stats["data"]["percentChange"], 100);

        let (_, categories) = app.get("/api/tickets/categories", &token).await;
        assert_eq!(
            categories["data"],
            json!([
                { "category": "Hardware", "total": 2 },
                { "category": "Network", "total": 1 }
            ])
        );

        let (_, trends) = app.get("/api/tickets/trends", &token).await;
        let months = trends["data"].as_array().unwrap();
        assert_eq!(months.len(), 6);
        assert_eq!(months[5]["total"], 3);
    }
}
