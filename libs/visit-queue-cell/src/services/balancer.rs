//! Room selection policy for newly registered visits.

use shared_store::ClinicState;

/// Pick the room for a new visit: the claimed room with the fewest
/// Waiting visits, ties going to the smallest room number. Rooms with a
/// consultation in progress stay eligible, so a doctor finishing one
/// patient finds the next already routed to them. Returns `None` when no
/// online doctor holds a room, in which case the caller parks the visit.
///
/// Callers must invoke this under the same write guard as the visit
/// insertion; selecting and inserting in separate critical sections lets
/// two registrations land on one minimal-depth room.
pub fn assign_room(state: &ClinicState) -> Option<u32> {
    state
        .claimed_rooms()
        .into_iter()
        .min_by_key(|&room| (state.waiting_count(room), room))
}
