use std::sync::Arc;

use axum::{
    routing::{post, put},
    Router,
};

use shared_store::ClinicStore;

use crate::handlers;

pub fn create_consultation_router(store: Arc<ClinicStore>) -> Router {
    Router::new()
        .route("/demo", post(handlers::start_demo_session))
        .route("/{visit_id}/start", post(handlers::start_consultation))
        .route("/{visit_id}/draft", put(handlers::save_draft))
        .route(
            "/{visit_id}/transcript",
            post(handlers::append_transcript).get(handlers::get_transcript),
        )
        .route("/{visit_id}/finalize", post(handlers::finalize_consultation))
        .with_state(store)
}
