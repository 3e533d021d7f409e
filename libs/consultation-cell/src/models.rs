use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::{Patient, Visit};

#[derive(Debug, Clone, Deserialize)]
pub struct StartConsultationRequest {
    pub doctor_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveDraftRequest {
    pub doctor_id: Uuid,
    pub note: String,
}

/// One chunk of text from the transcription collaborator. The core does
/// not interpret how it was produced.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptChunkRequest {
    pub chunk: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinalizeConsultationRequest {
    pub doctor_id: Uuid,
    /// Explicit note wins over the accumulated transcript.
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DemoSessionRequest {
    pub doctor_id: Uuid,
}

/// A self-test consultation: tagged patient and visit pair, invisible to
/// the front desk.
#[derive(Debug, Clone, Serialize)]
pub struct DemoSession {
    pub patient: Patient,
    pub visit: Visit,
}
