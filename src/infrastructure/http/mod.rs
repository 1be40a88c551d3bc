//! HTTP REST API routes

mod character_routes;
mod preset_routes;
mod transfer_routes;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tracing::error;

use crate::application::ports::outbound::PresetRepositoryError;
use crate::application::services::{ImportError, SyncError};
use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        // Preset routes
        .route(
            "/api/presets",
            get(preset_routes::list_presets).post(preset_routes::save_preset),
        )
        .route(
            "/api/presets/last-used",
            get(preset_routes::get_last_used).put(preset_routes::set_last_used),
        )
        .route("/api/presets/match", post(preset_routes::match_preset))
        .route(
            "/api/presets/{name}",
            get(preset_routes::get_preset).delete(preset_routes::delete_preset),
        )
        .route("/api/presets/{name}/apply", post(preset_routes::apply_preset))
        // Import / export routes
        .route("/api/presets/export", get(transfer_routes::export_all))
        .route("/api/presets/{name}/export", get(transfer_routes::export_preset))
        .route(
            "/api/presets/import/preview",
            post(transfer_routes::preview_import),
        )
        .route("/api/presets/import", post(transfer_routes::import_presets))
        // Character routes
        .route(
            "/api/character/commit",
            post(character_routes::commit_character),
        )
        .route(
            "/api/character/prompt",
            post(character_routes::character_prompt),
        )
        .route(
            "/api/character/reincarnation-roll",
            get(character_routes::reincarnation_roll),
        )
        .route("/api/catalog/rarities", get(character_routes::catalog_tables))
        .route("/api/catalog/cost", get(character_routes::rarity_cost))
}

async fn health_check() -> &'static str {
    "OK"
}

fn repository_error(e: PresetRepositoryError) -> (StatusCode, String) {
    error!(error = %e, "Preset storage failure");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

fn import_error(e: ImportError) -> (StatusCode, String) {
    match e {
        ImportError::Validation(message) => (StatusCode::BAD_REQUEST, message),
        ImportError::Repository(e) => repository_error(e),
    }
}

fn sync_error(e: SyncError) -> (StatusCode, String) {
    error!(error = %e, "Synchronization failure");
    (StatusCode::BAD_GATEWAY, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::VariableStorePort;
    use crate::application::services::WriteMode;
    use crate::infrastructure::notifier::TracingNotifier;
    use crate::infrastructure::variables::InMemoryVariableStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct Harness {
        app: Router,
        message: Arc<InMemoryVariableStore>,
    }

    fn harness() -> Harness {
        let message = Arc::new(InMemoryVariableStore::ready(json!({
            "角色": {"技能列表": {"旧技能": {}}}
        })));
        let character = Arc::new(InMemoryVariableStore::ready(json!({})));
        let state = AppState::with_stores(
            message.clone(),
            character,
            WriteMode::Script,
            Arc::new(TracingNotifier),
        );
        Harness {
            app: create_routes().with_state(Arc::new(state)),
            message,
        }
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn json_body(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    fn draft(name: &str) -> Value {
        json!({
            "character": {"name": name, "destinyPoints": 1},
            "skills": [{"name": "疾风步", "rarity": "rare", "type": "主动"}]
        })
    }

    #[tokio::test]
    async fn test_health() {
        let h = harness();
        let (status, body) = send(&h.app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
    }

    #[tokio::test]
    async fn test_preset_lifecycle() {
        let h = harness();
        let save = json!({"name": "A", "draft": draft("艾琳")});

        let (status, _) = send(&h.app, Method::POST, "/api/presets", Some(save.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = send(&h.app, Method::POST, "/api/presets", Some(save)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(&h.app, Method::GET, "/api/presets", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body).as_array().unwrap().len(), 1);

        let (_, body) = send(&h.app, Method::GET, "/api/presets/last-used", None).await;
        assert_eq!(json_body(&body)["name"], "A");

        let (status, body) = send(&h.app, Method::POST, "/api/presets/A/apply", None).await;
        assert_eq!(status, StatusCode::OK);
        let applied = json_body(&body);
        assert_eq!(applied["character"]["name"], "艾琳");

        let (_, body) = send(&h.app, Method::POST, "/api/presets/match", Some(applied)).await;
        assert_eq!(json_body(&body)["name"], "A");

        let (status, _) = send(&h.app, Method::DELETE, "/api/presets/A", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&h.app, Method::DELETE, "/api/presets/A", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&h.app, Method::GET, "/api/presets/A", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_export_and_import() {
        let h = harness();
        send(&h.app, Method::POST, "/api/presets", Some(json!({"name": "A", "draft": draft("a")}))).await;

        let response = h
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/presets/A/export")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert_eq!(disposition, "attachment; filename*=UTF-8''A.preset.json");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let document = json_body(&bytes);

        let (status, body) =
            send(&h.app, Method::POST, "/api/presets/import/preview", Some(document.clone())).await;
        assert_eq!(status, StatusCode::OK);
        let preview = json_body(&body);
        assert_eq!(preview["conflicts"][0]["resolution"], "overwrite");
        assert!(preview["noConflicts"].as_array().unwrap().is_empty());

        let request = json!({"document": document, "resolutions": {"A": "rename"}});
        let (status, body) = send(&h.app, Method::POST, "/api/presets/import", Some(request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json_body(&body),
            json!({"imported": 0, "skipped": 0, "overwritten": 0, "renamed": 1})
        );
        let (status, _) = send(&h.app, Method::GET, "/api/presets/A%20(1)", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_import_is_bad_request() {
        let h = harness();
        let (status, _) = send(
            &h.app,
            Method::POST,
            "/api/presets/import/preview",
            Some(json!({"presets": []})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let response = h
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/presets/import/preview")
                    .body(Body::from("not json at all"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_all_without_presets() {
        let h = harness();
        let (status, _) = send(&h.app, Method::GET, "/api/presets/export", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_commit_synchronizes_store() {
        let h = harness();
        let (status, body) =
            send(&h.app, Method::POST, "/api/character/commit", Some(draft("艾琳"))).await;
        assert_eq!(status, StatusCode::OK);
        let outcome = json_body(&body);
        assert_eq!(outcome["mode"], "script");
        assert_eq!(outcome["summary"]["version"], "v2");
        assert!(outcome["prompt"].as_str().unwrap().contains("姓名: 艾琳"));

        let data = h.message.snapshot().await.unwrap();
        let skills = data["角色"]["技能列表"].as_object().unwrap();
        assert_eq!(skills.keys().collect::<Vec<_>>(), vec!["疾风步"]);
    }

    #[tokio::test]
    async fn test_commit_failure_is_bad_gateway() {
        let h = harness();
        h.message.set_interpreter_enabled(false);
        let (status, _) =
            send(&h.app, Method::POST, "/api/character/commit", Some(draft("艾琳"))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_catalog_and_roll() {
        let h = harness();
        let (_, body) = send(&h.app, Method::GET, "/api/catalog/rarities", None).await;
        let tables = json_body(&body);
        assert_eq!(tables["rarities"].as_array().unwrap().len(), 7);
        assert_eq!(tables["rarities"][6]["label"], "唯一");
        assert_eq!(tables["allyTierCosts"][0], 100);
        assert_eq!(tables["levels"].as_array().unwrap().len(), 10);
        assert_eq!(tables["levels"][4]["tier"], "第二层级");
        assert_eq!(tables["levels"][0]["assignablePoints"], 5);

        let (status, body) = send(
            &h.app,
            Method::GET,
            "/api/character/reincarnation-roll?name=%5Bdev%5D",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body)["reincarnationPoints"], 888888);
    }

    #[tokio::test]
    async fn test_rarity_cost() {
        let h = harness();
        let (status, body) = send(&h.app, Method::GET, "/api/catalog/cost?rarity=rare", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json_body(&body),
            json!({"rarity": "rare", "cost": 68, "range": "35-100"})
        );

        let (_, body) = send(
            &h.app,
            Method::GET,
            "/api/catalog/cost?rarity=epic&position=0&cost=79",
            None,
        )
        .await;
        let cost = json_body(&body);
        assert_eq!(cost["cost"], 80);
        assert_eq!(cost["withinRange"], false);
    }
}
