//! Aggregate summary of a board's current state.

use serde::Serialize;

use crate::board::{Board, GameMode};
use crate::error::Result;
use crate::grid::{completed_pattern_count, evaluate_pattern_membership};

/// Current progress figures for one board.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    pub total_cells: usize,
    pub checked_cells: usize,
    pub in_pattern_cells: usize,
    pub completed_patterns: usize,
    pub percent_complete: f64,
    pub traditional_won: bool,
    pub todo_won: bool,
}

impl BoardStats {
    /// Compute statistics from a board snapshot.
    pub fn from_board(board: &Board) -> Result<Self> {
        let Some(dimension) = board.dimension()? else {
            return Ok(Self::default());
        };

        let mut cells = board.cells.clone();
        evaluate_pattern_membership(&mut cells, dimension)?;

        let total_cells = cells.len();
        let checked_cells = board.checked_count();

        Ok(Self {
            total_cells,
            checked_cells,
            in_pattern_cells: cells.iter().filter(|c| c.in_pattern).count(),
            completed_patterns: completed_pattern_count(&cells, dimension)?,
            percent_complete: (checked_cells as f64 / total_cells as f64) * 100.0,
            traditional_won: board.has_won(GameMode::Traditional)?,
            todo_won: board.has_won(GameMode::Todo)?,
        })
    }
}
