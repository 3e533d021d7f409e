use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_store::ClinicStore;

use crate::models::{RegisterPatientRequest, UpdatePatientRequest};
use crate::services::patient::PatientService;

pub async fn register_patient(
    State(store): State<Arc<ClinicStore>>,
    Json(request): Json<RegisterPatientRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&store);
    let patient = service.register_patient(request).await?;

    Ok(Json(json!({ "patient": patient })))
}

pub async fn list_patients(
    State(store): State<Arc<ClinicStore>>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&store);
    let patients = service.list_patients().await;

    Ok(Json(json!({
        "patients": patients,
        "total": patients.len()
    })))
}

pub async fn get_patient(
    State(store): State<Arc<ClinicStore>>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&store);
    let patient = service.get_patient(patient_id).await?;

    Ok(Json(json!({ "patient": patient })))
}

pub async fn edit_patient(
    State(store): State<Arc<ClinicStore>>,
    Path(patient_id): Path<Uuid>,
    Json(request): Json<UpdatePatientRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&store);
    let patient = service.edit_patient(patient_id, request).await?;

    Ok(Json(json!({ "patient": patient })))
}

pub async fn delete_patient(
    State(store): State<Arc<ClinicStore>>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&store);
    service.delete_patient(patient_id).await?;

    Ok(Json(json!({ "deleted": patient_id })))
}

pub async fn lookup_by_ic(
    State(store): State<Arc<ClinicStore>>,
    Path(ic_number): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&store);
    let patient = service.lookup_by_ic(&ic_number).await?;

    Ok(Json(json!({ "patient": patient })))
}
