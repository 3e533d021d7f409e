use thiserror::Error;
use uuid::Uuid;

use shared_models::{AppError, VisitStatus};

#[derive(Error, Debug)]
pub enum ConsultationError {
    #[error("Visit not found: {0}")]
    VisitNotFound(Uuid),

    #[error("Doctor not found: {0}")]
    DoctorNotFound(Uuid),

    #[error("Doctor {doctor_id} does not own visit {visit_id}")]
    Unauthorized { doctor_id: Uuid, visit_id: Uuid },

    #[error("Room {room} already has a consultation in progress")]
    RoomBusy { room: u32 },

    #[error("Invalid visit transition from {from} to {to}")]
    InvalidTransition { from: VisitStatus, to: VisitStatus },

    #[error("Visit is {status}; notes can only change while waiting or in consultation")]
    NoteLocked { status: VisitStatus },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<ConsultationError> for AppError {
    fn from(err: ConsultationError) -> Self {
        match err {
            ConsultationError::VisitNotFound(_) => AppError::NotFound(err.to_string()),
            ConsultationError::DoctorNotFound(_) => AppError::NotFound(err.to_string()),
            ConsultationError::Unauthorized { .. } => AppError::Forbidden(err.to_string()),
            ConsultationError::RoomBusy { .. } => AppError::Conflict(err.to_string()),
            ConsultationError::InvalidTransition { .. } => {
                AppError::InvalidTransition(err.to_string())
            }
            ConsultationError::NoteLocked { .. } => AppError::InvalidTransition(err.to_string()),
            ConsultationError::ValidationError(_) => AppError::ValidationError(err.to_string()),
        }
    }
}
