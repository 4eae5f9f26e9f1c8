//! Drives the HTTP router end to end with a seeded generator.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use home_energy_dashboard::{
    api,
    config::Config,
    controller::AppState,
    simulation::{MeterConfig, SimulatorConfig},
};

fn seeded_state() -> AppState {
    let cfg = Config {
        simulation: SimulatorConfig {
            random_seed: Some(1234),
            ..Default::default()
        },
        meter: MeterConfig {
            random_seed: Some(1234),
            ..Default::default()
        },
        ..Default::default()
    };
    AppState::new(cfg)
}

async fn send(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn dashboard_returns_full_refresh() {
    let state = seeded_state();
    state.poll_meter();
    let app = api::router(state);

    let (status, body) = get_json(app, "/api/v1/dashboard?hour=12").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let data = &body["data"];
    assert_eq!(data["current_hour"], 12);
    assert_eq!(data["profile"].as_array().unwrap().len(), 24);
    assert_eq!(data["device_summary"]["total"], 11);
    assert_eq!(data["devices"].as_object().unwrap().len(), 5);
    assert!(data["devices"].get("Living Room").is_some());
    assert!(data["metrics"]["solar_generation_w"].as_f64().unwrap() > 0.0);
    assert!(data["meter"]["reading"].is_object());
    assert_eq!(body["metadata"]["seed"], 1234);
}

#[tokio::test]
async fn seeded_dashboard_is_reproducible() {
    let app = api::router(seeded_state());

    let (_, a) = get_json(app.clone(), "/api/v1/profile").await;
    let (_, b) = get_json(app, "/api/v1/profile").await;
    assert_eq!(a["data"]["points"], b["data"]["points"]);
}

#[tokio::test]
async fn metrics_rejects_out_of_range_hour() {
    let app = api::router(seeded_state());

    for uri in ["/api/v1/metrics?hour=24", "/api/v1/metrics?hour=-1"] {
        let (status, body) = get_json(app.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "BadRequest");
    }

    for uri in ["/api/v1/metrics?hour=0", "/api/v1/metrics?hour=23"] {
        let (status, body) = get_json(app.clone(), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        let efficiency = body["data"]["net_efficiency_pct"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&efficiency));
    }
}

#[tokio::test]
async fn malformed_hour_is_json_bad_request() {
    let app = api::router(seeded_state());

    for uri in ["/api/v1/metrics?hour=abc", "/api/v1/dashboard?hour=noon"] {
        let (status, body) = get_json(app.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "BadRequest");
        assert!(body["message"].is_string());
    }
}

#[tokio::test]
async fn device_lookup_by_id() {
    let app = api::router(seeded_state());

    let (status, body) = get_json(app.clone(), "/api/v1/devices/kt-fridge-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["room"], "Kitchen");
    assert_eq!(body["data"]["attributes"]["kind"], "refrigerator");

    let (status, body) = get_json(app, "/api/v1/devices/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFound");
}

#[tokio::test]
async fn device_list_counts_catalog() {
    let app = api::router(seeded_state());

    let (status, body) = get_json(app, "/api/v1/devices").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["total_count"], 11);
    assert_eq!(body["data"]["summary"]["total"], 11);
}

#[tokio::test]
async fn meter_reports_history_and_cost() {
    let state = seeded_state();
    for _ in 0..3 {
        state.poll_meter();
    }
    let app = api::router(state);

    let (status, body) = get_json(app, "/api/v1/meter").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["history"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["tariff_per_kwh"], 7.5);
    assert!(body["data"]["cost"].as_f64().unwrap() > 450.0 * 7.5);
    assert!(body["data"]["diagnostics"]["voltage_status"].is_string());
}

#[tokio::test]
async fn health_probes() {
    let state = seeded_state();
    let app = api::router(state.clone());

    let (status, _) = send(app.clone(), "/health/live").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_json(app.clone(), "/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "ServiceUnavailable");

    state.poll_meter();

    let (status, _) = send(app.clone(), "/health/ready").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_json(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
