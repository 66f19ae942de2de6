#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serial_test::serial;

    use crate::helpers::make_test_app;

    #[tokio::test]
    #[serial]
    async fn health_and_healthz_report_connected_database() {
        let app = make_test_app().await;

        for uri in ["/api/health", "/api/healthz"] {
            let (status, json) = app.send("GET", uri, None, None).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(json["success"], true);
            assert_eq!(json["data"]["status"], "ok");
            assert_eq!(json["data"]["database"], "connected");
            assert_eq!(json["data"]["environment"], "test");
            assert!(json["data"]["timestamp"].is_string());
        }
    }
}
