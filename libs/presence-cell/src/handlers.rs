use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_store::ClinicStore;

use crate::models::{RegisterDoctorRequest, SetOnlineRequest};
use crate::services::presence::PresenceService;

pub async fn register_doctor(
    State(store): State<Arc<ClinicStore>>,
    Json(request): Json<RegisterDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PresenceService::new(&store);
    let doctor = service.register_doctor(request).await?;

    Ok(Json(json!({ "doctor": doctor })))
}

pub async fn list_doctors(
    State(store): State<Arc<ClinicStore>>,
) -> Result<Json<Value>, AppError> {
    let service = PresenceService::new(&store);
    let doctors = service.list_doctors().await;

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

pub async fn get_doctor(
    State(store): State<Arc<ClinicStore>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = PresenceService::new(&store);
    let doctor = service.get_doctor(doctor_id).await?;

    Ok(Json(json!({ "doctor": doctor })))
}

pub async fn set_online(
    State(store): State<Arc<ClinicStore>>,
    Path(doctor_id): Path<Uuid>,
    Json(request): Json<SetOnlineRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PresenceService::new(&store);
    let doctor = service.set_online(doctor_id, request.room).await?;

    Ok(Json(json!({ "doctor": doctor })))
}

pub async fn set_away(
    State(store): State<Arc<ClinicStore>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = PresenceService::new(&store);
    let doctor = service.set_away(doctor_id).await?;

    Ok(Json(json!({ "doctor": doctor })))
}

pub async fn list_active(
    State(store): State<Arc<ClinicStore>>,
) -> Result<Json<Value>, AppError> {
    let service = PresenceService::new(&store);
    let active = service.list_active().await;

    Ok(Json(json!({
        "active": active,
        "total": active.len()
    })))
}
