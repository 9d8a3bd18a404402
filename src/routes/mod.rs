// src/routes/mod.rs

use axum::{
    http::{header, HeaderName, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

pub mod dashboard;
pub mod health;

/// Headers the dashboard front-end is allowed to send.
fn allowed_headers() -> [HeaderName; 9] {
    [
        HeaderName::from_static("x-csrf-token"),
        HeaderName::from_static("x-requested-with"),
        header::ACCEPT,
        HeaderName::from_static("accept-version"),
        header::CONTENT_LENGTH,
        HeaderName::from_static("content-md5"),
        header::CONTENT_TYPE,
        header::DATE,
        HeaderName::from_static("x-api-version"),
    ]
}

pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(allowed_headers())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // health
        .route("/health", get(health::health))
        // dashboard
        .route(
            "/api/dashboard-data",
            get(dashboard::get_dashboard_data).options(dashboard::preflight),
        )
        .route(
            "/api/dashboard-summary",
            get(dashboard::get_dashboard_summary).options(dashboard::preflight),
        )
        // state & middleware
        .with_state(state)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::aggregate::buckets::SleepFairUpper;
    use crate::models::Respondent;
    use crate::source::memory::{StaticSource, UnavailableSource};

    fn respondent(platform: &str, happiness: f64, screen_time: f64) -> Respondent {
        Respondent {
            platform: Some(platform.into()),
            happiness: Some(happiness),
            screen_time: Some(screen_time),
            stress: Some(5.0),
            sleep: Some(6.0),
            age: Some(28),
            gender: Some("Female".into()),
            exercise: Some(3.0),
        }
    }

    fn app_with(rows: Vec<Respondent>) -> Router {
        router(AppState {
            source: Arc::new(StaticSource::new(rows)),
            sleep_fair_upper: SleepFairUpper::Seven,
        })
    }

    fn failing_app() -> Router {
        router(AppState {
            source: Arc::new(UnavailableSource { message: "connection refused".into() }),
            sleep_fair_upper: SleepFairUpper::Seven,
        })
    }

    async fn send(app: Router, req: Request<Body>) -> Response {
        app.oneshot(req).await.unwrap()
    }

    async fn json_body(resp: Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn dashboard_data_returns_six_views() {
        let app = app_with(vec![
            respondent("A", 8.0, 3.0),
            respondent("A", 6.0, 5.0),
            respondent("B", 9.0, 2.0),
        ]);
        let resp = send(app, get("/api/dashboard-data")).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = json_body(resp).await;
        assert_eq!(body.as_object().unwrap().len(), 6);
        assert_eq!(body["platformData"][0]["name"], "B");
        assert_eq!(body["platformData"][0]["happiness"], 9.0);
        assert_eq!(body["platformData"][1]["name"], "A");
        assert_eq!(body["platformData"][1]["happiness"], 7.0);
        assert_eq!(body["platformData"][1]["users"], 2);
        assert_eq!(body["platformData"][1]["screenTime"], 4.0);
        assert_eq!(body["screenTimeImpact"][0]["category"], "Low (< 4 hrs)");
        assert_eq!(body["ageGroupData"][0]["group"], "25-34");
        assert_eq!(body["genderData"][0]["gender"], "Female");
        assert_eq!(body["exerciseImpact"][0]["category"], "Medium (2-4/week)");
    }

    #[tokio::test]
    async fn repeated_requests_are_byte_identical() {
        let rows = vec![respondent("A", 7.3, 4.2), respondent("B", 6.1, 7.7)];
        let first = send(app_with(rows.clone()), get("/api/dashboard-data")).await;
        let second = send(app_with(rows), get("/api/dashboard-data")).await;
        let a = to_bytes(first.into_body(), usize::MAX).await.unwrap();
        let b = to_bytes(second.into_body(), usize::MAX).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn source_failure_yields_single_error_body() {
        let resp = send(failing_app(), get("/api/dashboard-data")).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(resp).await;
        assert_eq!(body, serde_json::json!({ "error": "connection refused" }));
    }

    #[tokio::test]
    async fn summary_endpoint_fails_the_same_way() {
        let resp = send(failing_app(), get("/api/dashboard-summary")).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json_body(resp).await.get("error").is_some());
    }

    #[tokio::test]
    async fn summary_endpoint_reports_headlines() {
        let app = app_with(vec![respondent("A", 8.0, 3.0), respondent("B", 4.0, 8.0)]);
        let body = json_body(send(app, get("/api/dashboard-summary")).await).await;
        assert_eq!(body["respondents"], 2);
        assert_eq!(body["averageHappiness"], 6.0);
        assert_eq!(body["bestPlatform"]["name"], "A");
        assert_eq!(body["worstPlatform"]["name"], "B");
        assert_eq!(body["screenTimeGapPct"], 100.0);
        assert!(body["generatedAt"].is_string());
    }

    #[tokio::test]
    async fn bare_options_is_empty_ok() {
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/dashboard-data")
            .body(Body::empty())
            .unwrap();
        let resp = send(app_with(vec![]), req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn cors_preflight_is_permissive() {
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/dashboard-data")
            .header(header::ORIGIN, "https://dashboard.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-requested-with")
            .body(Body::empty())
            .unwrap();
        let resp = send(app_with(vec![]), req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let headers = resp.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
        assert!(methods.contains("GET") && methods.contains("OPTIONS"));
        let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS].to_str().unwrap();
        assert!(allowed.contains("x-requested-with"));
    }

    #[tokio::test]
    async fn get_responses_carry_cors_origin() {
        let req = Request::builder()
            .uri("/api/dashboard-data")
            .header(header::ORIGIN, "https://dashboard.example")
            .body(Body::empty())
            .unwrap();
        let resp = send(app_with(vec![]), req).await;
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn health_is_ok() {
        let body = json_body(send(app_with(vec![]), get("/health")).await).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn empty_table_gives_empty_views() {
        let body = json_body(send(app_with(vec![]), get("/api/dashboard-data")).await).await;
        assert_eq!(body["platformData"], serde_json::json!([]));
        assert_eq!(body["exerciseImpact"], serde_json::json!([]));
    }
}
