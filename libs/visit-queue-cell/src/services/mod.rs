pub mod balancer;
pub mod board;
pub mod queue;

pub use board::RoomBoardService;
pub use queue::VisitQueueService;
