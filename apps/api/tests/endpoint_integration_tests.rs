use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::Router;
use http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use frontdesk_api::create_router;
use shared_config::AppConfig;
use shared_store::ClinicStore;

fn app() -> Router {
    let store = Arc::new(ClinicStore::new(&AppConfig::default()));
    create_router(store)
}

async fn send(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn walkthrough_register_route_start_finalize() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/doctors",
        Some(json!({ "display_name": "Dr. Tan" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let doctor_id = body["doctor"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/doctors/{}/online", doctor_id),
        Some(json!({ "room": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        "/patients",
        Some(json!({ "ic_number": "X1", "name": "Alice", "age": 30 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let patient_id = body["patient"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        "/visits",
        Some(json!({ "patient_id": patient_id, "symptoms": "cough" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["visit"]["status"], "waiting");
    assert_eq!(body["visit"]["room"], 3);
    assert_eq!(body["parked"], false);
    let visit_id = body["visit"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/consultations/{}/start", visit_id),
        Some(json!({ "doctor_id": doctor_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["visit"]["status"], "in_consultation");

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/consultations/{}/finalize", visit_id),
        Some(json!({ "doctor_id": doctor_id, "note": "S: cough O:- A:- P: rest" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["visit"]["status"], "completed");

    // Room 3 is open again on the board.
    let (status, body) = send(&app, Method::GET, "/room-board", None).await;
    assert_eq!(status, StatusCode::OK);
    let rooms = body["rooms"].as_array().unwrap();
    assert_eq!(rooms[2]["room"], 3);
    assert_eq!(rooms[2]["status"], "open");

    // And the note shows up in the patient's history.
    let (status, body) = send(&app, Method::GET, "/visits/history/X1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["visits"][0]["note"], "S: cough O:- A:- P: rest");
}

#[tokio::test]
async fn registration_without_capacity_parks_the_visit() {
    let app = app();

    let (_, body) = send(
        &app,
        Method::POST,
        "/patients",
        Some(json!({ "ic_number": "X2", "name": "Bob", "age": 40 })),
    )
    .await;
    let patient_id = body["patient"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        "/visits",
        Some(json!({ "patient_id": patient_id, "symptoms": "fever" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["visit"]["status"], "queued");
    assert!(body["visit"]["room"].is_null());
    assert_eq!(body["parked"], true);
}

#[tokio::test]
async fn error_statuses_follow_the_taxonomy() {
    let app = app();

    let (_, body) = send(
        &app,
        Method::POST,
        "/patients",
        Some(json!({ "ic_number": "X3", "name": "Cara", "age": 25 })),
    )
    .await;
    let patient_id = body["patient"]["id"].as_str().unwrap().to_string();

    // Duplicate identifier -> 409.
    let (status, _) = send(
        &app,
        Method::POST,
        "/patients",
        Some(json!({ "ic_number": "x3", "name": "Copy", "age": 26 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Unknown visit -> 404.
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/visits/{}/cancel", uuid::Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Out-of-range room -> 400.
    let (_, body) = send(
        &app,
        Method::POST,
        "/doctors",
        Some(json!({ "display_name": "Dr. Tan" })),
    )
    .await;
    let doctor_id = body["doctor"]["id"].as_str().unwrap().to_string();
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/doctors/{}/online", doctor_id),
        Some(json!({ "room": 99 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Room conflict -> 409.
    send(
        &app,
        Method::POST,
        &format!("/doctors/{}/online", doctor_id),
        Some(json!({ "room": 3 })),
    )
    .await;
    let (_, body) = send(
        &app,
        Method::POST,
        "/doctors",
        Some(json!({ "display_name": "Dr. Lim" })),
    )
    .await;
    let other_id = body["doctor"]["id"].as_str().unwrap().to_string();
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/doctors/{}/online", other_id),
        Some(json!({ "room": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Start by a doctor who holds no claim on the room -> 403.
    let (_, body) = send(
        &app,
        Method::POST,
        "/visits",
        Some(json!({ "patient_id": patient_id, "symptoms": "cough" })),
    )
    .await;
    let visit_id = body["visit"]["id"].as_str().unwrap().to_string();
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/consultations/{}/start", visit_id),
        Some(json!({ "doctor_id": other_id })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Cancelling a completed visit -> 422.
    send(
        &app,
        Method::POST,
        &format!("/consultations/{}/start", visit_id),
        Some(json!({ "doctor_id": doctor_id })),
    )
    .await;
    send(
        &app,
        Method::POST,
        &format!("/consultations/{}/finalize", visit_id),
        Some(json!({ "doctor_id": doctor_id })),
    )
    .await;
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/visits/{}/cancel", visit_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
