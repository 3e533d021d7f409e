use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_store::ClinicStore;

use crate::models::{RegisterVisitRequest, VisitListQuery};
use crate::services::board::RoomBoardService;
use crate::services::queue::VisitQueueService;

pub async fn register_visit(
    State(store): State<Arc<ClinicStore>>,
    Json(request): Json<RegisterVisitRequest>,
) -> Result<Json<Value>, AppError> {
    let service = VisitQueueService::new(&store);
    let registered = service.register_visit(request).await?;

    Ok(Json(json!({
        "visit": registered.visit,
        "parked": registered.parked
    })))
}

pub async fn list_visits(
    State(store): State<Arc<ClinicStore>>,
    Query(query): Query<VisitListQuery>,
) -> Result<Json<Value>, AppError> {
    let service = VisitQueueService::new(&store);
    let visits = service.list_visits(query.status).await;

    Ok(Json(json!({
        "visits": visits,
        "total": visits.len()
    })))
}

pub async fn get_visit(
    State(store): State<Arc<ClinicStore>>,
    Path(visit_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = VisitQueueService::new(&store);
    let visit = service.get_visit(visit_id).await?;

    Ok(Json(json!({ "visit": visit })))
}

pub async fn cancel_visit(
    State(store): State<Arc<ClinicStore>>,
    Path(visit_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = VisitQueueService::new(&store);
    let visit = service.cancel_visit(visit_id).await?;

    Ok(Json(json!({ "visit": visit })))
}

pub async fn promote_queued(
    State(store): State<Arc<ClinicStore>>,
    Path(visit_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = VisitQueueService::new(&store);
    let visit = service.promote_queued(visit_id).await?;

    Ok(Json(json!({ "visit": visit })))
}

pub async fn visit_history(
    State(store): State<Arc<ClinicStore>>,
    Path(ic_number): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = VisitQueueService::new(&store);
    let visits = service.visit_history(&ic_number).await?;

    Ok(Json(json!({
        "ic_number": ic_number,
        "visits": visits,
        "total": visits.len()
    })))
}

pub async fn room_board(
    State(store): State<Arc<ClinicStore>>,
) -> Result<Json<Value>, AppError> {
    let service = RoomBoardService::new(&store);
    let rooms = service.snapshot().await;

    Ok(Json(json!({ "rooms": rooms })))
}
