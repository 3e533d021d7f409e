use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use shared_models::{Doctor, Presence};
use shared_store::ClinicStore;

use crate::error::PresenceError;
use crate::models::{ActiveDoctor, RegisterDoctorRequest};

pub struct PresenceService {
    store: Arc<ClinicStore>,
}

impl PresenceService {
    pub fn new(store: &Arc<ClinicStore>) -> Self {
        Self {
            store: Arc::clone(store),
        }
    }

    /// Add a doctor to the roster. New doctors start Away.
    pub async fn register_doctor(
        &self,
        request: RegisterDoctorRequest,
    ) -> Result<Doctor, PresenceError> {
        let display_name = request.display_name.trim();
        if display_name.is_empty() {
            return Err(PresenceError::ValidationError(
                "Doctor display name must not be empty".to_string(),
            ));
        }

        let doctor = Doctor::new(display_name.to_string());
        let mut state = self.store.write().await;
        state.doctors.insert(doctor.id, doctor.clone());

        info!("Registered doctor {} ({})", doctor.display_name, doctor.id);
        Ok(doctor)
    }

    /// Mark a doctor Online, optionally claiming a room. The conflict
    /// check and the claim happen under one write guard so two doctors
    /// cannot both take the same room.
    pub async fn set_online(
        &self,
        doctor_id: Uuid,
        room: Option<u32>,
    ) -> Result<Doctor, PresenceError> {
        let mut state = self.store.write().await;

        if let Some(room) = room {
            if !state.is_valid_room(room) {
                return Err(PresenceError::InvalidRoom {
                    room,
                    max: state.room_count(),
                });
            }
            if let Some(holder) = state.online_claimant(room) {
                if holder.id != doctor_id {
                    debug!(
                        "Room {} claim by {} rejected, held by {}",
                        room, doctor_id, holder.id
                    );
                    return Err(PresenceError::RoomConflict {
                        room,
                        held_by: holder.id,
                    });
                }
            }
        }

        let doctor = state
            .doctors
            .get_mut(&doctor_id)
            .ok_or(PresenceError::DoctorNotFound(doctor_id))?;

        doctor.presence = Presence::Online;
        doctor.room = room;
        doctor.updated_at = Utc::now();

        info!(
            "Doctor {} online, room {:?}",
            doctor.display_name, doctor.room
        );
        Ok(doctor.clone())
    }

    /// Mark a doctor Away and release any claimed room. Idempotent.
    pub async fn set_away(&self, doctor_id: Uuid) -> Result<Doctor, PresenceError> {
        let mut state = self.store.write().await;
        let doctor = state
            .doctors
            .get_mut(&doctor_id)
            .ok_or(PresenceError::DoctorNotFound(doctor_id))?;

        if doctor.presence != Presence::Away || doctor.room.is_some() {
            doctor.presence = Presence::Away;
            doctor.room = None;
            doctor.updated_at = Utc::now();
            info!("Doctor {} away", doctor.display_name);
        }

        Ok(doctor.clone())
    }

    /// Online doctors holding a room, ordered by room number.
    pub async fn list_active(&self) -> Vec<ActiveDoctor> {
        let state = self.store.read().await;
        let mut active: Vec<ActiveDoctor> = state
            .doctors
            .values()
            .filter(|doctor| doctor.is_online())
            .filter_map(|doctor| {
                doctor.room.map(|room| ActiveDoctor {
                    doctor_id: doctor.id,
                    display_name: doctor.display_name.clone(),
                    room,
                })
            })
            .collect();
        active.sort_by_key(|entry| entry.room);
        active
    }

    pub async fn list_doctors(&self) -> Vec<Doctor> {
        let state = self.store.read().await;
        let mut doctors: Vec<Doctor> = state.doctors.values().cloned().collect();
        doctors.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        doctors
    }

    pub async fn get_doctor(&self, doctor_id: Uuid) -> Result<Doctor, PresenceError> {
        let state = self.store.read().await;
        state
            .doctors
            .get(&doctor_id)
            .cloned()
            .ok_or(PresenceError::DoctorNotFound(doctor_id))
    }
}
