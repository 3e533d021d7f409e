use std::collections::{BTreeMap, BTreeSet, HashMap};

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::{Doctor, Patient, Visit, VisitStatus};

/// Per-room occupancy, maintained alongside the visit set so allocation
/// decisions never rescan every visit.
#[derive(Debug, Clone, Default)]
pub struct RoomOccupancy {
    /// Waiting visits routed to this room, oldest first.
    pub waiting: Vec<Uuid>,
    pub in_consultation: Option<Uuid>,
}

impl RoomOccupancy {
    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty() && self.in_consultation.is_none()
    }
}

/// All front-desk state. Guarded as a unit: every operation that reads
/// allocation state and writes a decision based on it runs under one
/// write guard, which serializes registrations, claims and transitions.
#[derive(Debug)]
pub struct ClinicState {
    room_count: u32,
    pub doctors: HashMap<Uuid, Doctor>,
    pub patients: HashMap<Uuid, Patient>,
    pub visits: HashMap<Uuid, Visit>,
    room_index: BTreeMap<u32, RoomOccupancy>,
    /// Per-visit transcription chunks, instance-local. Appended by the
    /// consultation workflow, cleared on finalize, cancel and cascade
    /// delete under the same guard as the visit mutation.
    transcripts: HashMap<Uuid, Vec<String>>,
}

impl ClinicState {
    pub fn new(room_count: u32) -> Self {
        Self {
            room_count,
            doctors: HashMap::new(),
            patients: HashMap::new(),
            visits: HashMap::new(),
            room_index: BTreeMap::new(),
            transcripts: HashMap::new(),
        }
    }

    pub fn room_count(&self) -> u32 {
        self.room_count
    }

    pub fn is_valid_room(&self, room: u32) -> bool {
        (1..=self.room_count).contains(&room)
    }

    /// Rooms held by online doctors, ascending.
    pub fn claimed_rooms(&self) -> BTreeSet<u32> {
        self.doctors
            .values()
            .filter(|doctor| doctor.is_online())
            .filter_map(|doctor| doctor.room)
            .collect()
    }

    /// The online doctor currently claiming `room`, if any.
    pub fn online_claimant(&self, room: u32) -> Option<&Doctor> {
        self.doctors
            .values()
            .find(|doctor| doctor.is_online() && doctor.room == Some(room))
    }

    pub fn occupancy(&self, room: u32) -> Option<&RoomOccupancy> {
        self.room_index.get(&room)
    }

    pub fn waiting_count(&self, room: u32) -> usize {
        self.room_index
            .get(&room)
            .map(|entry| entry.waiting.len())
            .unwrap_or(0)
    }

    /// Record a visit as Waiting in `room`. Caller has already set the
    /// visit's room and status.
    pub fn index_waiting(&mut self, room: u32, visit_id: Uuid) {
        self.room_index.entry(room).or_default().waiting.push(visit_id);
    }

    /// Move a visit from the waiting line into the consultation slot.
    pub fn index_start_consultation(&mut self, room: u32, visit_id: Uuid) {
        let entry = self.room_index.entry(room).or_default();
        entry.waiting.retain(|id| *id != visit_id);
        entry.in_consultation = Some(visit_id);
    }

    /// Drop a visit from the index entirely (completion, cancellation,
    /// cascade delete).
    pub fn index_release(&mut self, room: u32, visit_id: Uuid) {
        if let Some(entry) = self.room_index.get_mut(&room) {
            entry.waiting.retain(|id| *id != visit_id);
            if entry.in_consultation == Some(visit_id) {
                entry.in_consultation = None;
            }
            if entry.is_empty() {
                self.room_index.remove(&room);
            }
        }
    }

    /// First Waiting visit routed to `room`, oldest first.
    pub fn next_waiting(&self, room: u32) -> Option<&Visit> {
        self.room_index
            .get(&room)?
            .waiting
            .first()
            .and_then(|id| self.visits.get(id))
    }

    pub fn visit_in_consultation(&self, room: u32) -> Option<&Visit> {
        self.room_index
            .get(&room)?
            .in_consultation
            .and_then(|id| self.visits.get(&id))
    }

    pub fn append_transcript_chunk(&mut self, visit_id: Uuid, chunk: String) {
        self.transcripts.entry(visit_id).or_default().push(chunk);
    }

    /// Remove and return a visit's accumulated chunks.
    pub fn take_transcript(&mut self, visit_id: Uuid) -> Option<Vec<String>> {
        self.transcripts.remove(&visit_id)
    }

    pub fn drop_transcript(&mut self, visit_id: Uuid) {
        self.transcripts.remove(&visit_id);
    }

    pub fn transcript_chunks(&self, visit_id: Uuid) -> Option<&[String]> {
        self.transcripts.get(&visit_id).map(|chunks| chunks.as_slice())
    }

    /// Cross-checks the room index against the visit set. Used by tests
    /// to prove the two representations never drift.
    pub fn room_index_consistent(&self) -> bool {
        for (room, entry) in &self.room_index {
            for id in &entry.waiting {
                match self.visits.get(id) {
                    Some(v) if v.status == VisitStatus::Waiting && v.room == Some(*room) => {}
                    _ => return false,
                }
            }
            if let Some(id) = entry.in_consultation {
                match self.visits.get(&id) {
                    Some(v) if v.status == VisitStatus::InConsultation && v.room == Some(*room) => {}
                    _ => return false,
                }
            }
        }
        for visit in self.visits.values() {
            // Demo visits bypass room routing entirely.
            if visit.is_demo {
                continue;
            }
            match (visit.status, visit.room) {
                (VisitStatus::Waiting, Some(room)) => {
                    let indexed = self
                        .room_index
                        .get(&room)
                        .map(|e| e.waiting.contains(&visit.id))
                        .unwrap_or(false);
                    if !indexed {
                        return false;
                    }
                }
                (VisitStatus::InConsultation, Some(room)) => {
                    let indexed = self
                        .room_index
                        .get(&room)
                        .map(|e| e.in_consultation == Some(visit.id))
                        .unwrap_or(false);
                    if !indexed {
                        return false;
                    }
                }
                (VisitStatus::Waiting | VisitStatus::InConsultation, None) => return false,
                _ => {}
            }
        }
        true
    }
}

/// Shared handle over the clinic state. Cells take the write guard for
/// read-decide-write operations and the read guard for queries; the lock
/// is never held across an await point.
#[derive(Debug)]
pub struct ClinicStore {
    state: RwLock<ClinicState>,
}

impl ClinicStore {
    pub fn new(config: &AppConfig) -> Self {
        debug!("Initializing clinic store with {} rooms", config.room_count);
        Self {
            state: RwLock::new(ClinicState::new(config.room_count)),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, ClinicState> {
        self.state.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, ClinicState> {
        self.state.write().await
    }
}
