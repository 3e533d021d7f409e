use std::env;
use tracing::warn;

pub const DEFAULT_ROOM_COUNT: u32 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Number of consultation rooms the clinic operates (rooms 1..=room_count).
    pub room_count: u32,
    pub bind_address: String,
    pub bind_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let room_count = env::var("CLINIC_ROOM_COUNT")
            .ok()
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|count| *count > 0)
            .unwrap_or_else(|| {
                warn!(
                    "CLINIC_ROOM_COUNT not set or invalid, using default of {}",
                    DEFAULT_ROOM_COUNT
                );
                DEFAULT_ROOM_COUNT
            });

        let bind_address = env::var("CLINIC_BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string());

        let bind_port = env::var("CLINIC_BIND_PORT")
            .ok()
            .and_then(|raw| raw.parse::<u16>().ok())
            .unwrap_or(3000);

        Self {
            room_count,
            bind_address,
            bind_port,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            room_count: DEFAULT_ROOM_COUNT,
            bind_address: "0.0.0.0".to_string(),
            bind_port: 3000,
        }
    }
}
