#![allow(dead_code)]

use axum::{Json, Router, body::Body, http::Request, response::Response, routing::get};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Serves a stub booking API on an ephemeral port and returns its base url.
/// The stub plays the external collaborator: it owns the appointment and
/// staff data the planning views consume.
pub async fn spawn_upstream(appointments: Value, staff: Value) -> String {
    let app = Router::new()
        .route("/api/health", get(|| async { Json(json!({"status": "ok"})) }))
        .route(
            "/api/appointments",
            get(move || {
                let appointments = appointments.clone();
                async move { Json(appointments) }
            })
            .post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "id": "apt-created",
                    "clientName": "Walk-in",
                    "serviceName": "to be confirmed",
                    "appointmentDate": body["appointmentDate"],
                    "startTime": body["startTime"],
                    "endTime": body["startTime"],
                    "staffId": body["staffId"],
                    "status": "pending",
                }))
            }),
        )
        .route(
            "/api/staff",
            get(move || {
                let staff = staff.clone();
                async move { Json(staff) }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    base_url
}

pub fn test_config(base_url: &str) -> planora::config::Config {
    planora::config::Config {
        server: planora::config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        upstream: planora::config::UpstreamConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 2,
            retry_attempts: 2,
            staff_ttl_seconds: 300,
        },
        planning: planora::config::PlanningConfig::default(),
        observability: planora::config::ObservabilityConfig::default(),
    }
}

pub fn create_app(base_url: &str) -> Router {
    planora::create_app(test_config(base_url)).unwrap()
}

pub async fn get_page(app: &Router, uri: &str) -> (u16, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    read_response(response).await
}

pub async fn post_form(app: &Router, uri: &str, form: &[(&str, &str)]) -> (u16, String) {
    let body = serde_urlencoded::to_string(form).unwrap();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    read_response(response).await
}

async fn read_response(response: Response) -> (u16, String) {
    let status = response.status().as_u16();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Fixture appointments placed on the currently displayed week, so the tests
/// hold regardless of when they run.
pub fn this_week_appointments() -> Value {
    let monday = current_week_monday();

    json!([
        {
            "id": "apt-1",
            "clientName": "Nora Blanc",
            "serviceName": "balayage",
            "appointmentDate": monday.to_string(),
            "startTime": "14:00",
            "endTime": "15:30",
            "staffId": "s1",
            "status": "confirmed",
            "price": 65.0,
        },
        {
            "id": "apt-2",
            "clientName": "Paul Arnaud",
            "serviceName": "coupe homme",
            "appointmentDate": monday.to_string(),
            "startTime": "14:30",
            "endTime": "15:00",
            "staffId": "s2",
            "status": "pending",
        },
    ])
}

pub fn team_staff() -> Value {
    json!([
        {
            "id": "s1",
            "firstName": "Ines",
            "lastName": "Morel",
            "color": "#a855f7",
            "specialties": ["coloration", "balayage"],
        },
        {
            "id": "s2",
            "firstName": "Lucas",
            "lastName": "Robin",
            "color": "#f59e0b",
        },
    ])
}

pub fn current_week_monday() -> time::Date {
    planora_scheduling::start_of_week(
        planora_scheduling::today_in("Europe/Paris"),
        time::Weekday::Monday,
    )
}
