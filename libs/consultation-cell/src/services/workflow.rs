use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use shared_models::{Visit, VisitStatus};
use shared_store::{ClinicState, ClinicStore};

use crate::error::ConsultationError;

/// The state machine that advances a visit through its consultation.
/// Identity is always an explicit parameter; nothing here reads ambient
/// session state.
pub struct ConsultationService {
    store: Arc<ClinicStore>,
}

impl ConsultationService {
    pub fn new(store: &Arc<ClinicStore>) -> Self {
        Self {
            store: Arc::clone(store),
        }
    }

    /// Waiting -> InConsultation. The caller must be the online doctor
    /// holding the visit's room; on success the visit is bound to them.
    pub async fn start_consultation(
        &self,
        visit_id: Uuid,
        doctor_id: Uuid,
    ) -> Result<Visit, ConsultationError> {
        let mut state = self.store.write().await;

        let visit = state
            .visits
            .get(&visit_id)
            .ok_or(ConsultationError::VisitNotFound(visit_id))?;

        if visit.status != VisitStatus::Waiting {
            return Err(ConsultationError::InvalidTransition {
                from: visit.status,
                to: VisitStatus::InConsultation,
            });
        }

        let room = verify_room_claim(&state, visit, doctor_id)?;
        if state.visit_in_consultation(room).is_some() {
            return Err(ConsultationError::RoomBusy { room });
        }

        state.index_start_consultation(room, visit_id);
        let visit = state.visits.get_mut(&visit_id).expect("checked above");
        visit.status = VisitStatus::InConsultation;
        visit.doctor_id = Some(doctor_id);
        visit.touch();

        info!(
            "Consultation started for visit {} in room {} by {}",
            visit_id, room, doctor_id
        );
        Ok(visit.clone())
    }

    /// Overwrite the working note. Valid while the visit is Waiting or
    /// InConsultation; safe to retry, the write is idempotent.
    pub async fn save_draft(
        &self,
        visit_id: Uuid,
        doctor_id: Uuid,
        note: String,
    ) -> Result<Visit, ConsultationError> {
        let mut state = self.store.write().await;
        let visit = state
            .visits
            .get(&visit_id)
            .ok_or(ConsultationError::VisitNotFound(visit_id))?;

        verify_engagement(&state, visit, doctor_id)?;

        let visit = state.visits.get_mut(&visit_id).expect("checked above");
        visit.note = Some(note);
        visit.touch();
        debug!("Draft saved for visit {}", visit_id);
        Ok(visit.clone())
    }

    /// Append one transcription chunk for a visit. Collaborator surface:
    /// no doctor identity involved, the chunk is an opaque string.
    pub async fn append_transcript(
        &self,
        visit_id: Uuid,
        chunk: String,
    ) -> Result<usize, ConsultationError> {
        if chunk.trim().is_empty() {
            return Err(ConsultationError::ValidationError(
                "Transcript chunk must not be empty".to_string(),
            ));
        }

        let mut state = self.store.write().await;
        let visit = state
            .visits
            .get(&visit_id)
            .ok_or(ConsultationError::VisitNotFound(visit_id))?;

        if !matches!(
            visit.status,
            VisitStatus::Waiting | VisitStatus::InConsultation
        ) {
            return Err(ConsultationError::NoteLocked {
                status: visit.status,
            });
        }

        state.append_transcript_chunk(visit_id, chunk);
        let total = state
            .transcript_chunks(visit_id)
            .map(|chunks| chunks.len())
            .unwrap_or(0);
        debug!("Transcript chunk {} appended for visit {}", total, visit_id);
        Ok(total)
    }

    pub async fn transcript(&self, visit_id: Uuid) -> Result<Vec<String>, ConsultationError> {
        let state = self.store.read().await;
        if !state.visits.contains_key(&visit_id) {
            return Err(ConsultationError::VisitNotFound(visit_id));
        }
        Ok(state
            .transcript_chunks(visit_id)
            .map(|chunks| chunks.to_vec())
            .unwrap_or_default())
    }

    /// InConsultation -> Completed. The note resolves in order: explicit
    /// argument, accumulated transcript, existing draft. The transcript
    /// buffer is cleared either way.
    pub async fn finalize_consultation(
        &self,
        visit_id: Uuid,
        doctor_id: Uuid,
        note: Option<String>,
    ) -> Result<Visit, ConsultationError> {
        let mut state = self.store.write().await;
        let visit = state
            .visits
            .get(&visit_id)
            .ok_or(ConsultationError::VisitNotFound(visit_id))?;

        if visit.status != VisitStatus::InConsultation {
            return Err(ConsultationError::InvalidTransition {
                from: visit.status,
                to: VisitStatus::Completed,
            });
        }
        if visit.doctor_id != Some(doctor_id) {
            return Err(ConsultationError::Unauthorized {
                doctor_id,
                visit_id,
            });
        }

        let room = visit.room;
        let flushed = state
            .take_transcript(visit_id)
            .map(|chunks| chunks.join(" "))
            .filter(|text| !text.is_empty());
        if let Some(room) = room {
            state.index_release(room, visit_id);
        }

        let visit = state.visits.get_mut(&visit_id).expect("checked above");
        let note = note.filter(|text| !text.trim().is_empty());
        if let Some(resolved) = note.or(flushed) {
            visit.note = Some(resolved);
        }
        visit.status = VisitStatus::Completed;
        visit.touch();

        info!("Consultation finalized for visit {}", visit_id);
        Ok(visit.clone())
    }
}

/// A doctor is engaged with a visit if they hold its room (Waiting) or
/// are the bound doctor (InConsultation).
fn verify_engagement(
    state: &ClinicState,
    visit: &Visit,
    doctor_id: Uuid,
) -> Result<(), ConsultationError> {
    match visit.status {
        VisitStatus::Waiting => {
            verify_room_claim(state, visit, doctor_id)?;
            Ok(())
        }
        VisitStatus::InConsultation => {
            if visit.doctor_id == Some(doctor_id) {
                Ok(())
            } else {
                Err(ConsultationError::Unauthorized {
                    doctor_id,
                    visit_id: visit.id,
                })
            }
        }
        other => Err(ConsultationError::NoteLocked { status: other }),
    }
}

/// The ownership rule: the acting doctor must be Online and claim the
/// visit's room per the presence registry.
fn verify_room_claim(
    state: &ClinicState,
    visit: &Visit,
    doctor_id: Uuid,
) -> Result<u32, ConsultationError> {
    let doctor = state
        .doctors
        .get(&doctor_id)
        .ok_or(ConsultationError::DoctorNotFound(doctor_id))?;

    let room = visit.room.ok_or(ConsultationError::Unauthorized {
        doctor_id,
        visit_id: visit.id,
    })?;

    if doctor.is_online() && doctor.room == Some(room) {
        Ok(room)
    } else {
        Err(ConsultationError::Unauthorized {
            doctor_id,
            visit_id: visit.id,
        })
    }
}
