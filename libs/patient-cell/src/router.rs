use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use shared_store::ClinicStore;

use crate::handlers;

pub fn create_patient_router(store: Arc<ClinicStore>) -> Router {
    Router::new()
        .route("/", post(handlers::register_patient).get(handlers::list_patients))
        .route("/{patient_id}", get(handlers::get_patient))
        .route("/{patient_id}", put(handlers::edit_patient))
        .route("/{patient_id}", delete(handlers::delete_patient))
        .route("/ic/{ic_number}", get(handlers::lookup_by_ic))
        .with_state(store)
}
