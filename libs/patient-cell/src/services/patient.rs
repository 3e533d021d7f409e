use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use shared_models::Patient;
use shared_store::{ClinicState, ClinicStore};

use crate::error::PatientError;
use crate::models::{RegisterPatientRequest, UpdatePatientRequest};

pub struct PatientService {
    store: Arc<ClinicStore>,
}

impl PatientService {
    pub fn new(store: &Arc<ClinicStore>) -> Self {
        Self {
            store: Arc::clone(store),
        }
    }

    pub async fn register_patient(
        &self,
        request: RegisterPatientRequest,
    ) -> Result<Patient, PatientError> {
        let ic_number = normalize_ic(&request.ic_number)?;
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(PatientError::ValidationError(
                "Patient name must not be empty".to_string(),
            ));
        }
        if request.age < 0 {
            return Err(PatientError::ValidationError(
                "Patient age must not be negative".to_string(),
            ));
        }

        let mut state = self.store.write().await;
        if ic_exists(&state, &ic_number, None) {
            return Err(PatientError::DuplicateIdentifier(ic_number));
        }

        let patient = Patient::new(ic_number, name, request.age);
        state.patients.insert(patient.id, patient.clone());

        info!("Registered patient {} ({})", patient.name, patient.ic_number);
        Ok(patient)
    }

    pub async fn edit_patient(
        &self,
        patient_id: Uuid,
        request: UpdatePatientRequest,
    ) -> Result<Patient, PatientError> {
        let new_ic = request.ic_number.as_deref().map(normalize_ic).transpose()?;

        let mut state = self.store.write().await;
        if !state.patients.contains_key(&patient_id) {
            return Err(PatientError::PatientNotFound(patient_id));
        }

        if let Some(ref ic) = new_ic {
            if ic_exists(&state, ic, Some(patient_id)) {
                return Err(PatientError::DuplicateIdentifier(ic.clone()));
            }
        }

        if let Some(age) = request.age {
            if age < 0 {
                return Err(PatientError::ValidationError(
                    "Patient age must not be negative".to_string(),
                ));
            }
        }
        if let Some(ref name) = request.name {
            if name.trim().is_empty() {
                return Err(PatientError::ValidationError(
                    "Patient name must not be empty".to_string(),
                ));
            }
        }

        let patient = state
            .patients
            .get_mut(&patient_id)
            .expect("existence checked above");
        if let Some(ic) = new_ic {
            patient.ic_number = ic;
        }
        if let Some(name) = request.name {
            patient.name = name.trim().to_string();
        }
        if let Some(age) = request.age {
            patient.age = age;
        }
        patient.updated_at = Utc::now();

        debug!("Updated patient {}", patient_id);
        Ok(patient.clone())
    }

    /// Remove a patient and every one of their visits as one unit. Room
    /// index entries and transcript buffers for those visits go with them.
    pub async fn delete_patient(&self, patient_id: Uuid) -> Result<(), PatientError> {
        let mut state = self.store.write().await;
        if !state.patients.contains_key(&patient_id) {
            return Err(PatientError::PatientNotFound(patient_id));
        }

        let visit_ids: Vec<Uuid> = state
            .visits
            .values()
            .filter(|visit| visit.patient_id == patient_id)
            .map(|visit| visit.id)
            .collect();

        for visit_id in visit_ids {
            if let Some(visit) = state.visits.remove(&visit_id) {
                if let Some(room) = visit.room {
                    if visit.status.is_active() {
                        state.index_release(room, visit_id);
                    }
                }
            }
            state.drop_transcript(visit_id);
        }

        state.patients.remove(&patient_id);
        info!("Deleted patient {} and their visits", patient_id);
        Ok(())
    }

    pub async fn get_patient(&self, patient_id: Uuid) -> Result<Patient, PatientError> {
        let state = self.store.read().await;
        state
            .patients
            .get(&patient_id)
            .cloned()
            .ok_or(PatientError::PatientNotFound(patient_id))
    }

    /// Front-desk lookup by the external identifier. Demo patients are
    /// invisible here.
    pub async fn lookup_by_ic(&self, ic_number: &str) -> Result<Patient, PatientError> {
        let ic_number = normalize_ic(ic_number)?;
        let state = self.store.read().await;
        state
            .patients
            .values()
            .find(|patient| !patient.is_demo && patient.ic_number.eq_ignore_ascii_case(&ic_number))
            .cloned()
            .ok_or(PatientError::IcNotFound(ic_number))
    }

    pub async fn list_patients(&self) -> Vec<Patient> {
        let state = self.store.read().await;
        let mut patients: Vec<Patient> = state
            .patients
            .values()
            .filter(|patient| !patient.is_demo)
            .cloned()
            .collect();
        patients.sort_by(|a, b| a.name.cmp(&b.name));
        patients
    }

    /// Active visit count for a patient, used by the delete confirmation UI.
    pub async fn active_visit_count(&self, patient_id: Uuid) -> usize {
        let state = self.store.read().await;
        state
            .visits
            .values()
            .filter(|visit| visit.patient_id == patient_id && visit.status.is_active())
            .count()
    }
}

fn normalize_ic(raw: &str) -> Result<String, PatientError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PatientError::ValidationError(
            "IC number must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn ic_exists(state: &ClinicState, ic_number: &str, exclude: Option<Uuid>) -> bool {
    state.patients.values().any(|patient| {
        Some(patient.id) != exclude && patient.ic_number.eq_ignore_ascii_case(ic_number)
    })
}
