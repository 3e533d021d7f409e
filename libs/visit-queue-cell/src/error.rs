use thiserror::Error;
use uuid::Uuid;

use shared_models::{AppError, VisitStatus};

#[derive(Error, Debug)]
pub enum VisitQueueError {
    #[error("Patient not found: {0}")]
    PatientNotFound(Uuid),

    #[error("Visit not found: {0}")]
    VisitNotFound(Uuid),

    #[error("No patient with IC number {0}")]
    IcNotFound(String),

    #[error("Invalid visit transition from {from} to {to}")]
    InvalidTransition { from: VisitStatus, to: VisitStatus },

    #[error("No online doctor holds a room; nothing to route to")]
    NoCapacity,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<VisitQueueError> for AppError {
    fn from(err: VisitQueueError) -> Self {
        match err {
            VisitQueueError::PatientNotFound(_) => AppError::NotFound(err.to_string()),
            VisitQueueError::VisitNotFound(_) => AppError::NotFound(err.to_string()),
            VisitQueueError::IcNotFound(_) => AppError::NotFound(err.to_string()),
            VisitQueueError::InvalidTransition { .. } => {
                AppError::InvalidTransition(err.to_string())
            }
            VisitQueueError::NoCapacity => AppError::Conflict(err.to_string()),
            VisitQueueError::ValidationError(_) => AppError::ValidationError(err.to_string()),
        }
    }
}
