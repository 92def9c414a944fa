mod events;
mod reconstruct;
mod stats;
mod types;

pub use events::candidate_events;
pub use reconstruct::{reconstruct_history, reconstruct_history_at};
pub use stats::BoardStats;
pub use types::{CompletionProps, EventKind, HistoryEvent, HistoryGroup};
