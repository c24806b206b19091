//! Router assembly: person routes plus the HTTP layers every request passes through.

pub mod person;

pub use person::person_routes;

use crate::config::AppConfig;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub fn app(state: AppState, config: &AppConfig) -> Router {
    // The tower-http limit replaces axum's built-in 2 MiB extractor cap.
    let mut router = person_routes(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .layer(TraceLayer::new_for_http());
    if config.cors_permissive {
        router = router.layer(CorsLayer::permissive());
    }
    router
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::memory::MemoryGateway;
    use crate::gateway::PersonGateway;
    use crate::model::Person;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use std::sync::Arc;
    use tower::ServiceExt;

    const ADA: &str =
        r#"{"firstname":"Ada","lastname":"Lovelace","email":"ada@x.com","password":"p","tutor":true}"#;

    fn test_app() -> (Router, Arc<MemoryGateway>) {
        let gateway = Arc::new(MemoryGateway::default());
        let config = AppConfig::from_lookup(|_| None).unwrap();
        let router = app(AppState::new(gateway.clone()), &config);
        (router, gateway)
    }

    async fn get_all(router: &Router) -> (StatusCode, serde_json::Value) {
        let resp = router
            .clone()
            .oneshot(Request::get("/person/allpeople").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        (status, json_body(resp).await)
    }

    async fn post_save(router: &Router, body: &str) -> Response {
        router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/person/save")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::CONTENT_LENGTH, body.len())
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn json_body(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn empty_table_lists_empty_array() {
        let (router, _) = test_app();
        let (status, body) = get_all(&router).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn save_new_person_then_list() {
        let (router, _) = test_app();
        let resp = post_save(&router, ADA).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());

        let (status, body) = get_all(&router).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!([{
                "id": 1,
                "firstname": "Ada",
                "lastname": "Lovelace",
                "email": "ada@x.com",
                "password": "p",
                "tutor": true
            }])
        );
    }

    #[tokio::test]
    async fn save_with_existing_id_replaces_fields() {
        let (router, gateway) = test_app();
        post_save(&router, ADA).await;
        post_save(&router, r#"{"firstname":"Grace","lastname":"Hopper","email":"grace@x.com","password":"q","tutor":false}"#).await;

        let resp = post_save(
            &router,
            r#"{"id":1,"firstname":"Augusta","lastname":"King","email":"ada@x.com","password":"p2","tutor":false}"#,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let people = gateway.list_all().await.unwrap();
        assert_eq!(people.len(), 2);
        let updated = people.iter().find(|p| p.id == Some(1)).unwrap();
        assert_eq!(updated.firstname.as_deref(), Some("Augusta"));
        assert_eq!(updated.lastname.as_deref(), Some("King"));
        assert_eq!(updated.password.as_deref(), Some("p2"));
        assert!(!updated.tutor);
        let other = people.iter().find(|p| p.id == Some(2)).unwrap();
        assert_eq!(other.firstname.as_deref(), Some("Grace"));
    }

    #[tokio::test]
    async fn mistyped_body_is_rejected_without_saving() {
        let (router, gateway) = test_app();
        let resp = post_save(&router, r#"{"firstname":"Ada","tutor":"yes"}"#).await;
        assert!(resp.status().is_client_error());
        let resp = post_save(&router, "not json").await;
        assert!(resp.status().is_client_error());
        assert!(gateway.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_content_type_is_rejected() {
        let (router, _) = test_app();
        let resp = router
            .oneshot(
                Request::post("/person/save")
                    .body(Body::from(ADA))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn storage_outage_is_service_unavailable() {
        let (router, gateway) = test_app();
        gateway.go_offline();

        let (status, body) = get_all(&router).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "database_unavailable");

        let resp = post_save(&router, ADA).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let gateway = Arc::new(MemoryGateway::default());
        let config = AppConfig::from_lookup(|k| (k == "BODY_LIMIT_BYTES").then(|| "16".to_string())).unwrap();
        let router = app(AppState::new(gateway.clone()), &config);
        let resp = post_save(&router, ADA).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(gateway.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn configured_limit_above_extractor_default_is_honoured() {
        let gateway = Arc::new(MemoryGateway::default());
        let limit = 8 * 1024 * 1024;
        let config =
            AppConfig::from_lookup(|k| (k == "BODY_LIMIT_BYTES").then(|| limit.to_string())).unwrap();
        let router = app(AppState::new(gateway.clone()), &config);

        let big = Person {
            firstname: Some("a".repeat(3 * 1024 * 1024)),
            ..Default::default()
        };
        let body = serde_json::to_string(&big).unwrap();
        let resp = post_save(&router, &body).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let people = gateway.list_all().await.unwrap();
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].firstname.as_ref().map(String::len), Some(3 * 1024 * 1024));
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        let (router, _) = test_app();
        let resp = router
            .oneshot(Request::get("/person/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn saved_people_compare_by_id() {
        let (router, gateway) = test_app();
        post_save(&router, ADA).await;
        post_save(&router, ADA).await;
        let people: Vec<Person> = gateway.list_all().await.unwrap();
        assert_eq!(people.len(), 2);
        assert_ne!(people[0], people[1]);
    }
}
