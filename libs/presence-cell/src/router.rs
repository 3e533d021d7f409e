use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_store::ClinicStore;

use crate::handlers;

pub fn create_presence_router(store: Arc<ClinicStore>) -> Router {
    Router::new()
        .route("/", post(handlers::register_doctor).get(handlers::list_doctors))
        .route("/active", get(handlers::list_active))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .route("/{doctor_id}/online", post(handlers::set_online))
        .route("/{doctor_id}/away", post(handlers::set_away))
        .with_state(store)
}
