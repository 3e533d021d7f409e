pub mod presence;

pub use presence::PresenceService;
