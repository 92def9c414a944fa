pub mod args;
pub mod board;
pub mod error;
pub mod grid;
pub mod history;
pub mod render;

pub use board::{Board, Cell, GameMode, GameModeRecord, load_board};
pub use error::HistoryError;
pub use history::{
    BoardStats, EventKind, HistoryEvent, HistoryGroup, reconstruct_history, reconstruct_history_at,
};
