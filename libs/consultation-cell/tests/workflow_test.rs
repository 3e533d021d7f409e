use assert_matches::assert_matches;
use uuid::Uuid;

use consultation_cell::{ConsultationError, ConsultationService};
use shared_models::VisitStatus;
use shared_utils::test_utils::TestClinic;

fn service(clinic: &TestClinic) -> ConsultationService {
    ConsultationService::new(&clinic.store)
}

#[tokio::test]
async fn full_consultation_lifecycle() {
    let clinic = TestClinic::new();
    let service = service(&clinic);
    let doctor = clinic.seed_online_doctor("Dr. Tan", 3).await;
    let patient = clinic.seed_patient("S1", "Alice", 30).await;
    let visit = clinic.seed_waiting_visit(patient.id, 3, "cough").await;

    let visit = service
        .start_consultation(visit.id, doctor.id)
        .await
        .expect("start should succeed");
    assert_eq!(visit.status, VisitStatus::InConsultation);
    assert_eq!(visit.doctor_id, Some(doctor.id));

    let visit = service
        .finalize_consultation(
            visit.id,
            doctor.id,
            Some("S: cough O:- A:- P: rest".to_string()),
        )
        .await
        .expect("finalize should succeed");
    assert_eq!(visit.status, VisitStatus::Completed);
    assert_eq!(visit.note.as_deref(), Some("S: cough O:- A:- P: rest"));

    // Room 3 is free again.
    let state = clinic.store.read().await;
    assert!(state.visit_in_consultation(3).is_none());
    assert!(state.room_index_consistent());
}

#[tokio::test]
async fn start_by_a_doctor_without_the_room_claim_is_unauthorized() {
    let clinic = TestClinic::new();
    let service = service(&clinic);
    clinic.seed_online_doctor("Dr. Tan", 3).await;
    let other = clinic.seed_online_doctor("Dr. Lim", 5).await;
    let patient = clinic.seed_patient("S1", "Alice", 30).await;
    let visit = clinic.seed_waiting_visit(patient.id, 3, "cough").await;

    let result = service.start_consultation(visit.id, other.id).await;
    assert_matches!(result, Err(ConsultationError::Unauthorized { .. }));

    // The failed start must leave the visit untouched.
    let visit = clinic.visit(visit.id).await.unwrap();
    assert_eq!(visit.status, VisitStatus::Waiting);
    assert_eq!(visit.doctor_id, None);
}

#[tokio::test]
async fn away_doctor_cannot_start_even_in_their_old_room() {
    let clinic = TestClinic::new();
    let service = service(&clinic);
    let doctor = clinic.seed_online_doctor("Dr. Tan", 3).await;
    let patient = clinic.seed_patient("S1", "Alice", 30).await;
    let visit = clinic.seed_waiting_visit(patient.id, 3, "cough").await;

    {
        let mut state = clinic.store.write().await;
        let d = state.doctors.get_mut(&doctor.id).unwrap();
        d.presence = shared_models::Presence::Away;
        d.room = None;
    }

    assert_matches!(
        service.start_consultation(visit.id, doctor.id).await,
        Err(ConsultationError::Unauthorized { .. })
    );
}

#[tokio::test]
async fn start_requires_a_waiting_visit() {
    let clinic = TestClinic::new();
    let service = service(&clinic);
    let doctor = clinic.seed_online_doctor("Dr. Tan", 3).await;
    let patient = clinic.seed_patient("S1", "Alice", 30).await;
    let queued = clinic.seed_queued_visit(patient.id, "cough").await;

    assert_matches!(
        service.start_consultation(queued.id, doctor.id).await,
        Err(ConsultationError::InvalidTransition {
            from: VisitStatus::Queued,
            to: VisitStatus::InConsultation,
        })
    );

    assert_matches!(
        service.start_consultation(Uuid::new_v4(), doctor.id).await,
        Err(ConsultationError::VisitNotFound(_))
    );
}

#[tokio::test]
async fn second_start_in_the_same_room_reports_room_busy() {
    let clinic = TestClinic::new();
    let service = service(&clinic);
    let doctor = clinic.seed_online_doctor("Dr. Tan", 3).await;
    let alice = clinic.seed_patient("S1", "Alice", 30).await;
    let bob = clinic.seed_patient("S2", "Bob", 40).await;
    clinic.seed_consultation(alice.id, &doctor, "checkup").await;
    let waiting = clinic.seed_waiting_visit(bob.id, 3, "cough").await;

    assert_matches!(
        service.start_consultation(waiting.id, doctor.id).await,
        Err(ConsultationError::RoomBusy { room: 3 })
    );
}

#[tokio::test]
async fn draft_is_an_idempotent_overwrite() {
    let clinic = TestClinic::new();
    let service = service(&clinic);
    let doctor = clinic.seed_online_doctor("Dr. Tan", 3).await;
    let patient = clinic.seed_patient("S1", "Alice", 30).await;
    let visit = clinic.seed_waiting_visit(patient.id, 3, "cough").await;

    // Draft from Waiting, by the room holder.
    let visit = service
        .save_draft(visit.id, doctor.id, "first pass".to_string())
        .await
        .expect("draft from waiting");
    assert_eq!(visit.note.as_deref(), Some("first pass"));
    assert_eq!(visit.status, VisitStatus::Waiting);

    // Retrying the same save changes nothing but the timestamp.
    let visit = service
        .save_draft(visit.id, doctor.id, "first pass".to_string())
        .await
        .expect("retry");
    assert_eq!(visit.note.as_deref(), Some("first pass"));

    let visit = service
        .save_draft(visit.id, doctor.id, "second pass".to_string())
        .await
        .expect("overwrite");
    assert_eq!(visit.note.as_deref(), Some("second pass"));
}

#[tokio::test]
async fn draft_on_a_started_visit_is_owner_only() {
    let clinic = TestClinic::new();
    let service = service(&clinic);
    let doctor = clinic.seed_online_doctor("Dr. Tan", 3).await;
    let other = clinic.seed_online_doctor("Dr. Lim", 5).await;
    let patient = clinic.seed_patient("S1", "Alice", 30).await;
    let visit = clinic.seed_consultation(patient.id, &doctor, "checkup").await;

    assert_matches!(
        service
            .save_draft(visit.id, other.id, "intruding".to_string())
            .await,
        Err(ConsultationError::Unauthorized { .. })
    );

    let visit = service
        .save_draft(visit.id, doctor.id, "mine".to_string())
        .await
        .expect("owner draft");
    assert_eq!(visit.note.as_deref(), Some("mine"));
}

#[tokio::test]
async fn drafts_are_locked_after_terminal_states() {
    let clinic = TestClinic::new();
    let service = service(&clinic);
    let doctor = clinic.seed_online_doctor("Dr. Tan", 3).await;
    let patient = clinic.seed_patient("S1", "Alice", 30).await;
    let visit = clinic.seed_consultation(patient.id, &doctor, "checkup").await;

    service
        .finalize_consultation(visit.id, doctor.id, Some("done".to_string()))
        .await
        .expect("finalize");

    assert_matches!(
        service
            .save_draft(visit.id, doctor.id, "too late".to_string())
            .await,
        Err(ConsultationError::NoteLocked {
            status: VisitStatus::Completed
        })
    );
}

#[tokio::test]
async fn transcript_accumulates_and_flushes_into_the_note() {
    let clinic = TestClinic::new();
    let service = service(&clinic);
    let doctor = clinic.seed_online_doctor("Dr. Tan", 3).await;
    let patient = clinic.seed_patient("S1", "Alice", 30).await;
    let visit = clinic.seed_consultation(patient.id, &doctor, "checkup").await;

    service
        .append_transcript(visit.id, "Patient reports".to_string())
        .await
        .expect("first chunk");
    let total = service
        .append_transcript(visit.id, "three days of cough.".to_string())
        .await
        .expect("second chunk");
    assert_eq!(total, 2);
    assert_eq!(service.transcript(visit.id).await.unwrap().len(), 2);

    let visit = service
        .finalize_consultation(visit.id, doctor.id, None)
        .await
        .expect("finalize without explicit note");
    assert_eq!(
        visit.note.as_deref(),
        Some("Patient reports three days of cough.")
    );

    // Buffer is gone after the flush.
    assert!(service.transcript(visit.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn explicit_note_wins_over_the_transcript() {
    let clinic = TestClinic::new();
    let service = service(&clinic);
    let doctor = clinic.seed_online_doctor("Dr. Tan", 3).await;
    let patient = clinic.seed_patient("S1", "Alice", 30).await;
    let visit = clinic.seed_consultation(patient.id, &doctor, "checkup").await;

    service
        .append_transcript(visit.id, "raw transcript".to_string())
        .await
        .unwrap();

    let visit = service
        .finalize_consultation(visit.id, doctor.id, Some("curated note".to_string()))
        .await
        .unwrap();
    assert_eq!(visit.note.as_deref(), Some("curated note"));
    assert!(service.transcript(visit.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn finalize_requires_in_consultation_and_the_bound_doctor() {
    let clinic = TestClinic::new();
    let service = service(&clinic);
    let doctor = clinic.seed_online_doctor("Dr. Tan", 3).await;
    let other = clinic.seed_online_doctor("Dr. Lim", 5).await;
    let patient = clinic.seed_patient("S1", "Alice", 30).await;
    let waiting = clinic.seed_waiting_visit(patient.id, 3, "cough").await;

    assert_matches!(
        service
            .finalize_consultation(waiting.id, doctor.id, None)
            .await,
        Err(ConsultationError::InvalidTransition {
            from: VisitStatus::Waiting,
            to: VisitStatus::Completed,
        })
    );

    let started = service
        .start_consultation(waiting.id, doctor.id)
        .await
        .unwrap();
    assert_matches!(
        service
            .finalize_consultation(started.id, other.id, None)
            .await,
        Err(ConsultationError::Unauthorized { .. })
    );

    let done = service
        .finalize_consultation(started.id, doctor.id, None)
        .await
        .expect("owner finalize");
    assert_eq!(done.status, VisitStatus::Completed);

    // Completed is terminal.
    assert_matches!(
        service.finalize_consultation(done.id, doctor.id, None).await,
        Err(ConsultationError::InvalidTransition {
            from: VisitStatus::Completed,
            ..
        })
    );
}

#[tokio::test]
async fn transcript_chunks_are_rejected_for_closed_visits() {
    let clinic = TestClinic::new();
    let service = service(&clinic);
    let doctor = clinic.seed_online_doctor("Dr. Tan", 3).await;
    let patient = clinic.seed_patient("S1", "Alice", 30).await;
    let visit = clinic.seed_consultation(patient.id, &doctor, "checkup").await;

    service
        .finalize_consultation(visit.id, doctor.id, Some("done".to_string()))
        .await
        .unwrap();

    assert_matches!(
        service
            .append_transcript(visit.id, "late chunk".to_string())
            .await,
        Err(ConsultationError::NoteLocked { .. })
    );
    assert_matches!(
        service.append_transcript(visit.id, "  ".to_string()).await,
        Err(ConsultationError::ValidationError(_))
    );
}
