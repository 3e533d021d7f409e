use thiserror::Error;
use uuid::Uuid;

use shared_models::AppError;

#[derive(Error, Debug)]
pub enum PatientError {
    #[error("A patient with IC number {0} already exists")]
    DuplicateIdentifier(String),

    #[error("Patient not found: {0}")]
    PatientNotFound(Uuid),

    #[error("No patient with IC number {0}")]
    IcNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<PatientError> for AppError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::DuplicateIdentifier(_) => AppError::Conflict(err.to_string()),
            PatientError::PatientNotFound(_) => AppError::NotFound(err.to_string()),
            PatientError::IcNotFound(_) => AppError::NotFound(err.to_string()),
            PatientError::ValidationError(_) => AppError::ValidationError(err.to_string()),
        }
    }
}
