use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A doctor's presence as seen by the front desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Online,
    Away,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub display_name: String,
    pub presence: Presence,
    /// Consultation room claimed while online, 1..=room_count.
    pub room: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Doctor {
    pub fn new(display_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            display_name,
            presence: Presence::Away,
            room: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_online(&self) -> bool {
        self.presence == Presence::Online
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    /// External national-ID style identifier, unique across all patients.
    pub ic_number: String,
    pub name: String,
    pub age: i32,
    /// Demo patients back self-test sessions and are hidden from
    /// lookups, history and the room board.
    pub is_demo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    pub fn new(ic_number: String, name: String, age: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            ic_number,
            name,
            age,
            is_demo: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    /// No room available at registration time; awaiting manual promotion.
    Queued,
    /// Routed to a room, doctor not yet engaged.
    Waiting,
    InConsultation,
    Completed,
    Cancelled,
}

impl VisitStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, VisitStatus::Completed | VisitStatus::Cancelled)
    }

    /// Still occupying (or queued for) front-desk attention.
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    pub fn can_transition_to(&self, target: VisitStatus) -> bool {
        use VisitStatus::*;
        match (self, target) {
            (Queued, Waiting) => true,
            (Waiting, InConsultation) => true,
            (Waiting, Cancelled) => true,
            (InConsultation, Completed) => true,
            (InConsultation, Cancelled) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            VisitStatus::Queued => "queued",
            VisitStatus::Waiting => "waiting",
            VisitStatus::InConsultation => "in_consultation",
            VisitStatus::Completed => "completed",
            VisitStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    pub id: Uuid,
    pub patient_id: Uuid,
    /// Bound when a doctor starts the consultation.
    pub doctor_id: Option<Uuid>,
    pub room: Option<u32>,
    pub symptoms: String,
    pub note: Option<String>,
    pub status: VisitStatus,
    pub is_demo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Visit {
    pub fn new(patient_id: Uuid, symptoms: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            patient_id,
            doctor_id: None,
            room: None,
            symptoms,
            note: None,
            status: VisitStatus::Queued,
            is_demo: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
