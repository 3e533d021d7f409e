use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_store::ClinicStore;

use crate::models::{
    DemoSessionRequest, FinalizeConsultationRequest, SaveDraftRequest, StartConsultationRequest,
    TranscriptChunkRequest,
};
use crate::services::demo::DemoSessionService;
use crate::services::workflow::ConsultationService;

pub async fn start_consultation(
    State(store): State<Arc<ClinicStore>>,
    Path(visit_id): Path<Uuid>,
    Json(request): Json<StartConsultationRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ConsultationService::new(&store);
    let visit = service
        .start_consultation(visit_id, request.doctor_id)
        .await?;

    Ok(Json(json!({ "visit": visit })))
}

pub async fn save_draft(
    State(store): State<Arc<ClinicStore>>,
    Path(visit_id): Path<Uuid>,
    Json(request): Json<SaveDraftRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ConsultationService::new(&store);
    let visit = service
        .save_draft(visit_id, request.doctor_id, request.note)
        .await?;

    Ok(Json(json!({ "visit": visit })))
}

pub async fn append_transcript(
    State(store): State<Arc<ClinicStore>>,
    Path(visit_id): Path<Uuid>,
    Json(request): Json<TranscriptChunkRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ConsultationService::new(&store);
    let chunks = service.append_transcript(visit_id, request.chunk).await?;

    Ok(Json(json!({
        "visit_id": visit_id,
        "chunks": chunks
    })))
}

pub async fn get_transcript(
    State(store): State<Arc<ClinicStore>>,
    Path(visit_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = ConsultationService::new(&store);
    let chunks = service.transcript(visit_id).await?;

    Ok(Json(json!({
        "visit_id": visit_id,
        "chunks": chunks
    })))
}

pub async fn finalize_consultation(
    State(store): State<Arc<ClinicStore>>,
    Path(visit_id): Path<Uuid>,
    Json(request): Json<FinalizeConsultationRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ConsultationService::new(&store);
    let visit = service
        .finalize_consultation(visit_id, request.doctor_id, request.note)
        .await?;

    Ok(Json(json!({ "visit": visit })))
}

pub async fn start_demo_session(
    State(store): State<Arc<ClinicStore>>,
    Json(request): Json<DemoSessionRequest>,
) -> Result<Json<Value>, AppError> {
    let service = DemoSessionService::new(&store);
    let session = service.start_demo_session(request.doctor_id).await?;

    Ok(Json(json!({
        "patient": session.patient,
        "visit": session.visit
    })))
}
