//! Error types for grid evaluation and history reconstruction.

/// Errors raised by the pattern engine and the history reconstruction.
///
/// Both variants mean the snapshot itself is corrupt; retrying with the
/// same input fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    /// The board's cell count maps to no supported grid dimension.
    #[error("unsupported grid size: {cell_count} cells (expected 9, 16 or 25)")]
    UnsupportedGridSize { cell_count: usize },

    /// A cell slice does not match the dimension it was evaluated with.
    #[error("cell count mismatch: expected {expected} cells, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },
}

pub type Result<T, E = HistoryError> = std::result::Result<T, E>;
