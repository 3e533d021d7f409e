use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use shared_models::{Patient, Visit, VisitStatus};
use shared_store::ClinicStore;

use crate::error::ConsultationError;
use crate::models::DemoSession;

/// Self-test sessions for doctors trying out the scribe flow. The pair
/// is tagged `is_demo` and skips room routing, so the live queue, the
/// board and patient lookups never see it.
pub struct DemoSessionService {
    store: Arc<ClinicStore>,
}

impl DemoSessionService {
    pub fn new(store: &Arc<ClinicStore>) -> Self {
        Self {
            store: Arc::clone(store),
        }
    }

    pub async fn start_demo_session(
        &self,
        doctor_id: Uuid,
    ) -> Result<DemoSession, ConsultationError> {
        let mut state = self.store.write().await;
        if !state.doctors.contains_key(&doctor_id) {
            return Err(ConsultationError::DoctorNotFound(doctor_id));
        }

        let mut patient = Patient::new(
            format!("DEMO-{}", &Uuid::new_v4().simple().to_string()[..8]),
            "Demo Patient".to_string(),
            0,
        );
        patient.is_demo = true;

        let mut visit = Visit::new(patient.id, "Demo session".to_string());
        visit.is_demo = true;
        visit.status = VisitStatus::InConsultation;
        visit.doctor_id = Some(doctor_id);

        state.patients.insert(patient.id, patient.clone());
        state.visits.insert(visit.id, visit.clone());

        info!("Demo session {} started by doctor {}", visit.id, doctor_id);
        Ok(DemoSession { patient, visit })
    }
}
