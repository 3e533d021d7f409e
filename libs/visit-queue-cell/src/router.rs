use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_store::ClinicStore;

use crate::handlers;

pub fn create_visit_queue_router(store: Arc<ClinicStore>) -> Router {
    Router::new()
        .route("/", post(handlers::register_visit).get(handlers::list_visits))
        .route("/{visit_id}", get(handlers::get_visit))
        .route("/{visit_id}/cancel", post(handlers::cancel_visit))
        .route("/{visit_id}/promote", post(handlers::promote_queued))
        .route("/history/{ic_number}", get(handlers::visit_history))
        .with_state(store)
}

pub fn create_room_board_router(store: Arc<ClinicStore>) -> Router {
    Router::new()
        .route("/", get(handlers::room_board))
        .with_state(store)
}
