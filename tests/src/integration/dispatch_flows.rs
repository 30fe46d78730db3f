//! # Dispatch Flows
//!
//! The shell and dispatcher against an in-process stub of the campaign data
//! service speaking the real wire format:
//!
//! - `POST /api/v1/data` with `{entity, action, data}`
//! - `{"status": "ok", "data": ...}` on success
//! - HTTP 400 with `{"error": "..."}` on a rejected envelope
//! - `GET /api/v1/status` → `{"status": "ok"}`

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::{get, post},
        Json, Router,
    };
    use serde::Deserialize;
    use serde_json::{json, Value};

    use app_shell::{AppConfig, AppShell, StaticDetector};
    use cm_01_query_dispatch::{
        DispatchError, DispatcherConfig, EntityKind, QueryAction, QueryCommand, QueryDispatcher,
        TransportError,
    };

    // =============================================================================
    // STUB SERVICE
    // =============================================================================

    type Store = Arc<Mutex<Vec<Value>>>;

    fn bad_request(message: &str) -> Response {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
    }

    fn matches(record: &Value, filter: &serde_json::Map<String, Value>, loose: bool) -> bool {
        filter.iter().all(|(key, wanted)| match (record.get(key), wanted) {
            (Some(Value::String(have)), Value::String(want)) if loose => have.contains(want.as_str()),
            (Some(have), want) => have == want,
            (None, _) => false,
        })
    }

    async fn data(State(store): State<Store>, Json(body): Json<Value>) -> Response {
        let Some(entity) = body["entity"].as_str().filter(|e| !e.is_empty()) else {
            return bad_request("No entity provided");
        };
        if !["User", "Mission", "Pilot", "MechData"].contains(&entity) {
            return bad_request("Invalid entity");
        }
        let mut filter = body["data"].as_object().cloned().unwrap_or_default();
        let loose = filter.remove("loose").and_then(|v| v.as_bool()).unwrap_or(false);

        let mut records = store.lock().unwrap();
        let result = match body["action"].as_str() {
            Some("get") => records
                .iter()
                .find(|r| matches(r, &filter, false))
                .cloned()
                .unwrap_or(Value::Null),
            Some("get_multiple") => Value::Array(
                records
                    .iter()
                    .filter(|r| matches(r, &filter, loose))
                    .cloned()
                    .collect(),
            ),
            Some("save") => {
                records.push(Value::Object(filter.clone()));
                Value::Object(filter)
            }
            Some("delete") => {
                let before = records.len();
                records.retain(|r| !matches(r, &filter, false));
                json!(before - records.len())
            }
            _ => return bad_request("Invalid action"),
        };
        Json(json!({ "status": "ok", "data": result })).into_response()
    }

    async fn status() -> Json<Value> {
        Json(json!({ "status": "ok" }))
    }

    async fn spawn_service(seed: Vec<Value>) -> String {
        let store: Store = Arc::new(Mutex::new(seed));
        let router = Router::new()
            .route("/api/v1/data", post(data))
            .route("/api/v1/status", get(status))
            .with_state(store);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/api/v1/")
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        user_id: u64,
        user_name: String,
    }

    fn seed_users() -> Vec<Value> {
        vec![
            json!({ "user_id": 1, "user_name": "jmbski" }),
            json!({ "user_id": 2, "user_name": "kerensky" }),
        ]
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_shell_startup_against_service() {
        let base = spawn_service(seed_users()).await;
        let mut config = AppConfig::default();
        config.api.base_url = base;

        let shell = AppShell::new(config, &StaticDetector::desktop()).unwrap();
        let report = shell.start().await;

        assert!(report.is_healthy());
        let body = report.users.unwrap();
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        shell.shutdown();
    }

    #[tokio::test]
    async fn test_save_then_fetch() {
        let base = spawn_service(Vec::new()).await;
        let dispatcher =
            QueryDispatcher::with_http(&DispatcherConfig::with_base_url(base)).unwrap();

        dispatcher
            .execute(
                QueryCommand::save(EntityKind::User)
                    .with("user_id", 7)
                    .with("user_name", "natasha"),
            )
            .await
            .unwrap();

        let users: Vec<User> = dispatcher
            .fetch(QueryCommand::get_multiple(EntityKind::User))
            .await
            .unwrap();
        assert_eq!(
            users,
            vec![User {
                user_id: 7,
                user_name: "natasha".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_loose_match() {
        let base = spawn_service(seed_users()).await;
        let dispatcher =
            QueryDispatcher::with_http(&DispatcherConfig::with_base_url(base)).unwrap();

        let users: Vec<User> = dispatcher
            .fetch(
                QueryCommand::get_multiple(EntityKind::User)
                    .with("user_name", "ren")
                    .loose(),
            )
            .await
            .unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user_name, "kerensky");
    }

    #[tokio::test]
    async fn test_get_missing_record_decodes_to_none() {
        let base = spawn_service(seed_users()).await;
        let dispatcher =
            QueryDispatcher::with_http(&DispatcherConfig::with_base_url(base)).unwrap();

        let user: Option<User> = dispatcher
            .fetch(QueryCommand::get(EntityKind::User).with("user_id", 99))
            .await
            .unwrap();
        assert_eq!(user, None);
    }

    #[tokio::test]
    async fn test_unsupported_action_surfaces_service_error() {
        let base = spawn_service(seed_users()).await;
        let dispatcher =
            QueryDispatcher::with_http(&DispatcherConfig::with_base_url(base)).unwrap();

        let err = dispatcher
            .execute(QueryCommand::new(EntityKind::User, QueryAction::Update))
            .await
            .unwrap_err();

        let DispatchError::Transport(inner) = err else {
            panic!("expected transport error, got {err:?}");
        };
        assert!(matches!(inner, TransportError::Status { code: 400, .. }));
        assert_eq!(inner.server_message(), Some("Invalid action"));
    }

    #[tokio::test]
    async fn test_concurrent_dispatches_each_settle() {
        let base = spawn_service(seed_users()).await;
        let dispatcher = Arc::new(
            QueryDispatcher::with_http(&DispatcherConfig::with_base_url(base)).unwrap(),
        );

        let handles: Vec<_> = EntityKind::all()
            .into_iter()
            .map(|entity| {
                let dispatcher = Arc::clone(&dispatcher);
                tokio::spawn(async move {
                    dispatcher.execute(QueryCommand::get_multiple(entity)).await
                })
            })
            .collect();

        for result in futures::future::join_all(handles).await {
            assert!(result.unwrap().is_ok());
        }
        assert_eq!(dispatcher.stats().dispatched, 4);
        assert_eq!(dispatcher.stats().succeeded, 4);
    }
}
