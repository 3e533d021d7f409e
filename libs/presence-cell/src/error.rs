use thiserror::Error;
use uuid::Uuid;

use shared_models::AppError;

#[derive(Error, Debug)]
pub enum PresenceError {
    #[error("Doctor not found: {0}")]
    DoctorNotFound(Uuid),

    #[error("Room {room} is already claimed by another online doctor")]
    RoomConflict { room: u32, held_by: Uuid },

    #[error("Room {room} is out of range (rooms 1..={max})")]
    InvalidRoom { room: u32, max: u32 },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<PresenceError> for AppError {
    fn from(err: PresenceError) -> Self {
        match err {
            PresenceError::DoctorNotFound(_) => AppError::NotFound(err.to_string()),
            PresenceError::RoomConflict { .. } => AppError::Conflict(err.to_string()),
            PresenceError::InvalidRoom { .. } => AppError::BadRequest(err.to_string()),
            PresenceError::ValidationError(_) => AppError::ValidationError(err.to_string()),
        }
    }
}
