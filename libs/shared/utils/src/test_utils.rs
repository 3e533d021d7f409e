//! Seeded clinic fixtures shared by the cell test suites.

use std::sync::Arc;

use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::{Doctor, Patient, Presence, Visit, VisitStatus};
use shared_store::ClinicStore;

pub struct TestClinic {
    pub config: AppConfig,
    pub store: Arc<ClinicStore>,
}

impl Default for TestClinic {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClinic {
    pub fn new() -> Self {
        Self::with_rooms(10)
    }

    pub fn with_rooms(room_count: u32) -> Self {
        let config = AppConfig {
            room_count,
            ..AppConfig::default()
        };
        let store = Arc::new(ClinicStore::new(&config));
        Self { config, store }
    }

    pub async fn seed_doctor(&self, name: &str) -> Doctor {
        let doctor = Doctor::new(name.to_string());
        let mut state = self.store.write().await;
        state.doctors.insert(doctor.id, doctor.clone());
        doctor
    }

    pub async fn seed_online_doctor(&self, name: &str, room: u32) -> Doctor {
        let mut doctor = Doctor::new(name.to_string());
        doctor.presence = Presence::Online;
        doctor.room = Some(room);
        let mut state = self.store.write().await;
        state.doctors.insert(doctor.id, doctor.clone());
        doctor
    }

    pub async fn seed_patient(&self, ic_number: &str, name: &str, age: i32) -> Patient {
        let patient = Patient::new(ic_number.to_string(), name.to_string(), age);
        let mut state = self.store.write().await;
        state.patients.insert(patient.id, patient.clone());
        patient
    }

    pub async fn seed_queued_visit(&self, patient_id: Uuid, symptoms: &str) -> Visit {
        let visit = Visit::new(patient_id, symptoms.to_string());
        let mut state = self.store.write().await;
        state.visits.insert(visit.id, visit.clone());
        visit
    }

    pub async fn seed_waiting_visit(&self, patient_id: Uuid, room: u32, symptoms: &str) -> Visit {
        let mut visit = Visit::new(patient_id, symptoms.to_string());
        visit.status = VisitStatus::Waiting;
        visit.room = Some(room);
        let mut state = self.store.write().await;
        state.visits.insert(visit.id, visit.clone());
        state.index_waiting(room, visit.id);
        visit
    }

    pub async fn seed_consultation(&self, patient_id: Uuid, doctor: &Doctor, symptoms: &str) -> Visit {
        let room = doctor.room.expect("seeded doctor must hold a room");
        let mut visit = Visit::new(patient_id, symptoms.to_string());
        visit.status = VisitStatus::InConsultation;
        visit.room = Some(room);
        visit.doctor_id = Some(doctor.id);
        let mut state = self.store.write().await;
        state.visits.insert(visit.id, visit.clone());
        state.index_start_consultation(room, visit.id);
        visit
    }

    pub async fn visit(&self, visit_id: Uuid) -> Option<Visit> {
        self.store.read().await.visits.get(&visit_id).cloned()
    }

    pub async fn doctor(&self, doctor_id: Uuid) -> Option<Doctor> {
        self.store.read().await.doctors.get(&doctor_id).cloned()
    }

    pub async fn patient(&self, patient_id: Uuid) -> Option<Patient> {
        self.store.read().await.patients.get(&patient_id).cloned()
    }

    pub async fn assert_index_consistent(&self) {
        assert!(
            self.store.read().await.room_index_consistent(),
            "room index drifted from visit set"
        );
    }
}
