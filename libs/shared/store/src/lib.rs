pub mod store;

pub use store::{ClinicState, ClinicStore, RoomOccupancy};
