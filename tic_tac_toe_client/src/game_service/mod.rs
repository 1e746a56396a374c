pub mod model;
pub mod service;

pub use model::{AiMove, Board, Cell, GameMode, GameState, Mark, MoveRequest, TrainStats};
pub use service::{GameBackend, GameService};
