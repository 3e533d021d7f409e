use std::sync::Arc;

use shared_models::Visit;
use shared_store::{ClinicState, ClinicStore};

use crate::models::{DoctorSummary, RoomBoardEntry, RoomStatus, VisitSummary};

/// Derived per-room view for the front-desk display. Computed from
/// presence and the room index under a single read guard; never a source
/// of truth and never written back.
pub struct RoomBoardService {
    store: Arc<ClinicStore>,
}

impl RoomBoardService {
    pub fn new(store: &Arc<ClinicStore>) -> Self {
        Self {
            store: Arc::clone(store),
        }
    }

    pub async fn snapshot(&self) -> Vec<RoomBoardEntry> {
        let state = self.store.read().await;
        (1..=state.room_count())
            .map(|room| room_entry(&state, room))
            .collect()
    }
}

fn room_entry(state: &ClinicState, room: u32) -> RoomBoardEntry {
    let doctor = state.online_claimant(room).map(|doctor| DoctorSummary {
        doctor_id: doctor.id,
        display_name: doctor.display_name.clone(),
    });

    if doctor.is_none() {
        return RoomBoardEntry {
            room,
            status: RoomStatus::Unavailable,
            doctor: None,
            in_consultation: None,
            next_in_queue: None,
            waiting_count: 0,
        };
    }

    let in_consultation = state
        .visit_in_consultation(room)
        .map(|visit| visit_summary(state, visit));
    let next_in_queue = state
        .next_waiting(room)
        .map(|visit| visit_summary(state, visit));
    let waiting_count = state.waiting_count(room);

    let status = if in_consultation.is_some() {
        RoomStatus::InConsultation
    } else if waiting_count > 0 {
        RoomStatus::Waiting
    } else {
        RoomStatus::Open
    };

    RoomBoardEntry {
        room,
        status,
        doctor,
        in_consultation,
        next_in_queue,
        waiting_count,
    }
}

fn visit_summary(state: &ClinicState, visit: &Visit) -> VisitSummary {
    let patient_name = state
        .patients
        .get(&visit.patient_id)
        .map(|patient| patient.name.clone())
        .unwrap_or_else(|| "Unknown".to_string());
    VisitSummary {
        visit_id: visit.id,
        patient_id: visit.patient_id,
        patient_name,
        symptoms: visit.symptoms.clone(),
        registered_at: visit.created_at,
    }
}
