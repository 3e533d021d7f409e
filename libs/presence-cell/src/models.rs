use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterDoctorRequest {
    pub display_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetOnlineRequest {
    /// Omitted means online-but-unassigned: reachable, not scheduling.
    pub room: Option<u32>,
}

/// One row of the active roster: an online doctor holding a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveDoctor {
    pub doctor_id: Uuid,
    pub display_name: String,
    pub room: u32,
}
