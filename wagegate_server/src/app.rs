//! Axum application builder: routes, CORS, and request tracing.

use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the Axum application with all routes.
///
/// `allowed_origin` restricts CORS to one origin; `None` allows any.
pub fn create_app(state: AppState, allowed_origin: Option<&str>) -> Result<Router> {
    let cors = cors_layer(allowed_origin)?;

    Ok(Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/fetch-occupations", get(handlers::list_occupations))
        .route(
            "/fetch-occupations/rebuild",
            post(handlers::rebuild_catalog),
        )
        .route("/occupations", get(handlers::wage_series))
        .route("/occupations/records", get(handlers::wage_records))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

fn cors_layer(allowed_origin: Option<&str>) -> Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));
    Ok(match allowed_origin {
        None => cors.allow_origin(Any),
        Some(origin) => cors.allow_origin(
            HeaderValue::from_str(origin)
                .with_context(|| format!("invalid CORS origin '{}'", origin))?,
        ),
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;
    use wagegate_lib::GatewayConfig;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const WAGES: &str = r#"{"data": [
        {"Year": "2022", "State": "Texas", "Average Wage": 120500.4, "Average Wage Appx MOE": 900.0, "ID Detailed Occupation": "152011"},
        {"Year": "2022", "State": "Puerto Rico", "Average Wage": 40000.0, "Average Wage Appx MOE": 100.0, "ID Detailed Occupation": "152011"},
        {"Year": "2022", "State": "Alaska", "Average Wage": 99000.6, "Average Wage Appx MOE": null, "ID Detailed Occupation": "152011"},
        {"Year": "2021", "State": "Texas", "Average Wage": 115000.0, "Average Wage Appx MOE": 800.0, "ID Detailed Occupation": "152011"}
    ]}"#;

    fn config_for(server: &MockServer) -> GatewayConfig {
        GatewayConfig {
            search_url: format!("{}/api/searchLegacy", server.uri()),
            data_url: format!("{}/api/data", server.uri()),
            request_timeout: Duration::from_millis(300),
            ..GatewayConfig::default()
        }
    }

    fn app_for(server: &MockServer) -> Router {
        let state = AppState::from_config(&config_for(server)).unwrap();
        create_app(state, None).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body(body: Body) -> Value {
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn mount_wages(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/data"))
            .and(query_param("Detailed Occupation", "152011"))
            .respond_with(ResponseTemplate::new(200).set_body_string(WAGES))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn root_reports_running() {
        let server = MockServer::start().await;
        let response = app_for(&server).oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"Server is running");
    }

    #[tokio::test]
    async fn wage_series_sorted_ascending() {
        let server = MockServer::start().await;
        mount_wages(&server).await;

        let response = app_for(&server)
            .oneshot(get_request("/occupations?id=152011&sort=wageAsc"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(
            body,
            serde_json::json!({"wages": [99001, 120500], "states": ["Alaska", "Texas"]})
        );
    }

    #[tokio::test]
    async fn wage_series_all_years() {
        let server = MockServer::start().await;
        mount_wages(&server).await;

        let response = app_for(&server)
            .oneshot(get_request("/occupations?id=152011&allYears=true&state=Texas"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(
            body,
            serde_json::json!({"years": ["2021", "2022"], "wages": [115000, 120500]})
        );
    }

    #[tokio::test]
    async fn wage_series_missing_id_is_bad_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(WAGES))
            .expect(0)
            .mount(&server)
            .await;

        let response = app_for(&server)
            .oneshot(get_request("/occupations?sort=alpha"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn wage_series_unknown_occupation_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/data"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data": []}"#))
            .mount(&server)
            .await;

        let response = app_for(&server)
            .oneshot(get_request("/occupations?id=000000"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn wage_series_timeout_is_gateway_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/data"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(WAGES)
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let response = app_for(&server)
            .oneshot(get_request("/occupations?id=152011"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        let body = json_body(response.into_body()).await;
        assert!(body.get("wages").is_none());
        assert_eq!(
            body["message"],
            "Error fetching specific occupation wage data from the API"
        );
    }

    #[tokio::test]
    async fn wage_series_upstream_status_is_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/data"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal trace"))
            .mount(&server)
            .await;

        let response = app_for(&server)
            .oneshot(get_request("/occupations?id=152011"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["upstream_status"], 500);
        assert!(!body.to_string().contains("internal trace"));
    }

    #[tokio::test]
    async fn wage_records_two_decimals() {
        let server = MockServer::start().await;
        mount_wages(&server).await;

        let response = app_for(&server)
            .oneshot(get_request("/occupations/records?id=152011&sort=alpha"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(
            body,
            serde_json::json!([
                {"state": "Alaska", "wage": "99000.60", "wageMOE": "0.00"},
                {"state": "Texas", "wage": "120500.40", "wageMOE": "900.00"}
            ])
        );
    }

    #[tokio::test]
    async fn occupations_built_on_demand_and_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/searchLegacy"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"results": [
                    {"id": "291141", "name": "Registered nurses"},
                    {"id": "11-1011X", "name": "Excluded"},
                    {"id": "11-1011", "name": "Chief Executives"}
                ]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let app = app_for(&server);
        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(get_request("/fetch-occupations"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body = json_body(response.into_body()).await;
            assert_eq!(
                body,
                serde_json::json!({
                    "total_occupations": 2,
                    "occupations": [
                        {"id": "11-1011", "label": "Chief Executives"},
                        {"id": "291141", "label": "Registered nurses"}
                    ]
                })
            );
        }

        let response = app.oneshot(get_request("/health")).await.unwrap();
        let body = json_body(response.into_body()).await;
        assert_eq!(body["status"], "ready");
        assert_eq!(body["catalog_version"], 1);
    }

    #[tokio::test]
    async fn occupations_served_empty_while_startup_build_runs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/searchLegacy"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"results": [{"id": "1", "name": "Actors"}]}"#)
                    .set_delay(Duration::from_millis(500)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut config = config_for(&server);
        config.request_timeout = Duration::from_secs(5);
        let state = AppState::from_config(&config).unwrap();
        let app = create_app(state.clone(), None).unwrap();
        let startup = tokio::spawn(async move { state.initial_build().await });
        tokio::time::sleep(Duration::from_millis(50)).await;

        let start = std::time::Instant::now();
        let response = app
            .clone()
            .oneshot(get_request("/fetch-occupations"))
            .await
            .unwrap();
        assert!(start.elapsed() < Duration::from_millis(250));
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(
            body,
            serde_json::json!({"total_occupations": 0, "occupations": []})
        );

        startup.await.unwrap();
        let response = app.oneshot(get_request("/fetch-occupations")).await.unwrap();
        let body = json_body(response.into_body()).await;
        assert_eq!(body["total_occupations"], 1);
    }

    #[tokio::test]
    async fn occupations_upstream_failure_is_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/searchLegacy"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let app = app_for(&server);
        let response = app
            .clone()
            .oneshot(get_request("/fetch-occupations"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "Error fetching data from the API");

        let response = app.oneshot(get_request("/health")).await.unwrap();
        let body = json_body(response.into_body()).await;
        assert_eq!(body["status"], "starting");
        assert_eq!(body["total_occupations"], 0);
    }

    #[tokio::test]
    async fn rebuild_bumps_version() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/searchLegacy"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"results": [{"id": "1", "name": "Actors"}]}"#),
            )
            .mount(&server)
            .await;

        let app = app_for(&server);
        for expected in 1..=2 {
            let request = Request::builder()
                .method("POST")
                .uri("/fetch-occupations/rebuild")
                .body(Body::empty())
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body = json_body(response.into_body()).await;
            assert_eq!(body["version"], expected);
            assert_eq!(body["total_occupations"], 1);
        }
    }

    #[test]
    fn invalid_origin_is_rejected() {
        assert!(cors_layer(Some("bad\norigin")).is_err());
        assert!(cors_layer(Some("http://localhost:5173")).is_ok());
        assert!(cors_layer(None).is_ok());
    }
}
