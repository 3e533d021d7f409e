pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::*;
pub use models::*;
pub use router::create_consultation_router;
pub use services::demo::DemoSessionService;
pub use services::workflow::ConsultationService;
