pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::*;
pub use models::*;
pub use router::{create_room_board_router, create_visit_queue_router};
pub use services::board::RoomBoardService;
pub use services::queue::VisitQueueService;
