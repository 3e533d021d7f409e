use std::sync::Arc;

use axum::{routing::get, Router};

use consultation_cell::create_consultation_router;
use patient_cell::create_patient_router;
use presence_cell::create_presence_router;
use shared_store::ClinicStore;
use visit_queue_cell::{create_room_board_router, create_visit_queue_router};

pub fn create_router(store: Arc<ClinicStore>) -> Router {
    Router::new()
        .route("/", get(|| async { "Front Desk API is running!" }))
        .nest("/doctors", create_presence_router(store.clone()))
        .nest("/patients", create_patient_router(store.clone()))
        .nest("/visits", create_visit_queue_router(store.clone()))
        .nest("/room-board", create_room_board_router(store.clone()))
        .nest("/consultations", create_consultation_router(store))
}
