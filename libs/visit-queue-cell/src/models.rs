use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::VisitStatus;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterVisitRequest {
    pub patient_id: Uuid,
    pub symptoms: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisitListQuery {
    pub status: Option<VisitStatus>,
}

/// Outcome of a registration: the visit, and whether it had to be parked
/// because no doctor held a room.
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredVisit {
    pub visit: shared_models::Visit,
    pub parked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Unavailable,
    Open,
    Waiting,
    InConsultation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub doctor_id: Uuid,
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitSummary {
    pub visit_id: Uuid,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub symptoms: String,
    pub registered_at: DateTime<Utc>,
}

/// One room on the board. Display only; the visit set stays the source
/// of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomBoardEntry {
    pub room: u32,
    pub status: RoomStatus,
    pub doctor: Option<DoctorSummary>,
    pub in_consultation: Option<VisitSummary>,
    pub next_in_queue: Option<VisitSummary>,
    pub waiting_count: usize,
}
