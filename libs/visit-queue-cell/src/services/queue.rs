use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use shared_models::{Visit, VisitStatus};
use shared_store::ClinicStore;

use crate::error::VisitQueueError;
use crate::models::{RegisterVisitRequest, RegisteredVisit};
use crate::services::balancer;

pub struct VisitQueueService {
    store: Arc<ClinicStore>,
}

impl VisitQueueService {
    pub fn new(store: &Arc<ClinicStore>) -> Self {
        Self {
            store: Arc::clone(store),
        }
    }

    /// Register a patient into the queue. Room selection and visit
    /// insertion run under one write guard, so concurrent registrations
    /// serialize and each sees the previous one's depth increment.
    pub async fn register_visit(
        &self,
        request: RegisterVisitRequest,
    ) -> Result<RegisteredVisit, VisitQueueError> {
        let symptoms = request.symptoms.trim().to_string();
        if symptoms.is_empty() {
            return Err(VisitQueueError::ValidationError(
                "Symptoms are required at registration".to_string(),
            ));
        }

        let mut state = self.store.write().await;
        let known = state
            .patients
            .get(&request.patient_id)
            .map(|patient| !patient.is_demo)
            .unwrap_or(false);
        if !known {
            return Err(VisitQueueError::PatientNotFound(request.patient_id));
        }

        let mut visit = Visit::new(request.patient_id, symptoms);
        let room = balancer::assign_room(&state);
        let parked = match room {
            Some(room) => {
                visit.status = VisitStatus::Waiting;
                visit.room = Some(room);
                state.index_waiting(room, visit.id);
                info!("Visit {} routed to room {}", visit.id, room);
                false
            }
            None => {
                debug!("No claimed rooms, visit {} parked in queue", visit.id);
                true
            }
        };
        state.visits.insert(visit.id, visit.clone());

        Ok(RegisteredVisit { visit, parked })
    }

    /// Cancel a visit. Valid only from Waiting or InConsultation; the
    /// resulting state is terminal.
    pub async fn cancel_visit(&self, visit_id: Uuid) -> Result<Visit, VisitQueueError> {
        let mut state = self.store.write().await;
        let current = state
            .visits
            .get(&visit_id)
            .ok_or(VisitQueueError::VisitNotFound(visit_id))?;

        if !current.status.can_transition_to(VisitStatus::Cancelled) {
            return Err(VisitQueueError::InvalidTransition {
                from: current.status,
                to: VisitStatus::Cancelled,
            });
        }

        let room = current.room;
        if let Some(room) = room {
            state.index_release(room, visit_id);
        }
        state.drop_transcript(visit_id);

        let visit = state.visits.get_mut(&visit_id).expect("checked above");
        visit.status = VisitStatus::Cancelled;
        visit.touch();
        info!("Visit {} cancelled", visit_id);
        Ok(visit.clone())
    }

    /// Administrative re-balance of one parked visit. Never triggered
    /// automatically, not even when a doctor comes online.
    pub async fn promote_queued(&self, visit_id: Uuid) -> Result<Visit, VisitQueueError> {
        let mut state = self.store.write().await;
        let current = state
            .visits
            .get(&visit_id)
            .ok_or(VisitQueueError::VisitNotFound(visit_id))?;

        if current.status != VisitStatus::Queued {
            return Err(VisitQueueError::InvalidTransition {
                from: current.status,
                to: VisitStatus::Waiting,
            });
        }

        let room = balancer::assign_room(&state).ok_or(VisitQueueError::NoCapacity)?;
        state.index_waiting(room, visit_id);
        let visit = state.visits.get_mut(&visit_id).expect("checked above");
        visit.status = VisitStatus::Waiting;
        visit.room = Some(room);
        visit.touch();
        info!("Queued visit {} promoted to room {}", visit_id, room);
        Ok(visit.clone())
    }

    pub async fn get_visit(&self, visit_id: Uuid) -> Result<Visit, VisitQueueError> {
        let state = self.store.read().await;
        state
            .visits
            .get(&visit_id)
            .cloned()
            .ok_or(VisitQueueError::VisitNotFound(visit_id))
    }

    /// Front-desk listing, oldest first. Demo visits never show.
    pub async fn list_visits(&self, status: Option<VisitStatus>) -> Vec<Visit> {
        let state = self.store.read().await;
        let mut visits: Vec<Visit> = state
            .visits
            .values()
            .filter(|visit| !visit.is_demo)
            .filter(|visit| status.map(|s| visit.status == s).unwrap_or(true))
            .cloned()
            .collect();
        visits.sort_by_key(|visit| visit.created_at);
        visits
    }

    /// All visits for the patient behind an IC number, newest first.
    pub async fn visit_history(&self, ic_number: &str) -> Result<Vec<Visit>, VisitQueueError> {
        let ic_number = ic_number.trim();
        let state = self.store.read().await;
        let patient = state
            .patients
            .values()
            .find(|patient| !patient.is_demo && patient.ic_number.eq_ignore_ascii_case(ic_number))
            .ok_or_else(|| VisitQueueError::IcNotFound(ic_number.to_string()))?;

        let mut visits: Vec<Visit> = state
            .visits
            .values()
            .filter(|visit| visit.patient_id == patient.id && !visit.is_demo)
            .cloned()
            .collect();
        visits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(visits)
    }
}
