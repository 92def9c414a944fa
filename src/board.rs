//! Board snapshot data model.

use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::{self, dimension_for};

/// The win condition a board is currently played under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Traditional,
    Todo,
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GameMode::Traditional => "traditional",
            GameMode::Todo => "to-do",
        };
        write!(f, "{}", s)
    }
}

impl GameMode {
    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "traditional" => Some(GameMode::Traditional),
            "todo" | "to-do" => Some(GameMode::Todo),
            _ => None,
        }
    }
}

/// One grid square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub row: usize,
    pub col: usize,
    #[serde(default)]
    pub checked_at: Option<DateTime<Utc>>,
    /// Set by pattern evaluation; never part of a snapshot.
    #[serde(skip)]
    pub in_pattern: bool,
}

impl Cell {
    pub fn new(id: impl Into<String>, label: impl Into<String>, row: usize, col: usize) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            row,
            col,
            checked_at: None,
            in_pattern: false,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.checked_at.is_some()
    }

    /// Text the cell is known by in history: its label, or its id when unlabelled.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }
}

/// Completion state for one game mode. Both modes are carried on every board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameModeRecord {
    pub completed_at: Option<DateTime<Utc>>,
    pub completion_reward: Option<String>,
    pub completion_deadline: Option<DateTime<Utc>>,
    pub completed_by_mode_switch: bool,
}

/// A full board snapshot as handed over by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub cells: Vec<Cell>,
    pub active_mode: GameMode,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub mode_switched_to_todo_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub traditional: GameModeRecord,
    #[serde(default)]
    pub todo: GameModeRecord,
}

impl Board {
    /// Create an empty board with `dimension * dimension` unchecked cells.
    pub fn new(dimension: usize, created_at: DateTime<Utc>) -> Result<Self> {
        let cell_count = dimension * dimension;
        // Validates the size before any cell is built.
        dimension_for(cell_count)?;

        let cells = (0..cell_count)
            .map(|i| {
                let (row, col) = (i / dimension, i % dimension);
                Cell::new(format!("cell-{i}"), format!("Task {}", i + 1), row, col)
            })
            .collect();

        Ok(Self {
            cells,
            active_mode: GameMode::Traditional,
            created_at,
            mode_switched_to_todo_at: None,
            traditional: GameModeRecord::default(),
            todo: GameModeRecord::default(),
        })
    }

    /// Grid dimension, or `None` for a board without cells.
    pub fn dimension(&self) -> Result<Option<usize>> {
        if self.cells.is_empty() {
            return Ok(None);
        }
        dimension_for(self.cells.len()).map(Some)
    }

    pub fn record(&self, mode: GameMode) -> &GameModeRecord {
        match mode {
            GameMode::Traditional => &self.traditional,
            GameMode::Todo => &self.todo,
        }
    }

    pub fn checked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_checked()).count()
    }

    /// Whether the win condition of `mode` is met by the current checks.
    pub fn has_won(&self, mode: GameMode) -> Result<bool> {
        let Some(dimension) = self.dimension()? else {
            return Ok(false);
        };

        match mode {
            GameMode::Todo => Ok(self.checked_count() == self.cells.len()),
            GameMode::Traditional => {
                let mut cells = self.cells.clone();
                grid::evaluate_pattern_membership(&mut cells, dimension)?;
                Ok(cells.iter().any(|c| c.in_pattern))
            }
        }
    }
}

/// Read a board snapshot from a JSON file.
pub fn load_board(path: impl AsRef<Path>) -> anyhow::Result<Board> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read board snapshot {}", path.display()))?;

    let board: Board = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse board snapshot {}", path.display()))?;

    tracing::debug!(
        "Loaded board with {} cells ({} checked)",
        board.cells.len(),
        board.checked_count()
    );
    Ok(board)
}
