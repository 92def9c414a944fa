//! Candidate event extraction from a board snapshot.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::board::{Board, Cell, GameMode};

use super::types::{CompletionProps, EventKind, HistoryEvent};

const MODES: [GameMode; 2] = [GameMode::Traditional, GameMode::Todo];

/// Flat, unordered list of every event the snapshot implies.
///
/// Milestones (first strike, halfway) are not included here; they depend on
/// the chronological pass over buckets.
pub fn candidate_events(board: &Board, now: DateTime<Utc>) -> Vec<HistoryEvent> {
    let mut events = vec![HistoryEvent::new(
        EventKind::Creation,
        "Board created",
        Some(board.created_at),
    )];

    events.extend(check_events(board));

    for mode in MODES {
        if let Some(event) = completion_event(board, mode) {
            events.push(event);
        }
    }

    let both_have_deadlines = MODES
        .iter()
        .all(|&m| board.record(m).completion_deadline.is_some());

    for mode in MODES {
        if let Some(event) = deadline_expiry_event(board, mode, now, both_have_deadlines) {
            events.push(event);
        }
    }

    if let Some(switched_at) = board.mode_switched_to_todo_at {
        events.push(HistoryEvent::new(
            EventKind::GameModeChange,
            "Switched to to-do game mode",
            Some(switched_at),
        ));
    }

    events
}

fn check_events(board: &Board) -> Vec<HistoryEvent> {
    let mut label_counts: HashMap<&str, usize> = HashMap::new();
    for cell in &board.cells {
        *label_counts.entry(cell.display_label()).or_insert(0) += 1;
    }

    board
        .cells
        .iter()
        .filter_map(|cell| {
            let checked_at = cell.checked_at?;
            if checked_at < board.created_at {
                tracing::warn!(
                    "Cell {} checked at {} before board creation at {}",
                    cell.id,
                    checked_at,
                    board.created_at
                );
            }

            let ambiguous = label_counts.get(cell.display_label()).copied().unwrap_or(0) > 1;
            Some(HistoryEvent::new(
                EventKind::CellCheck,
                check_label(cell, ambiguous),
                Some(checked_at),
            ))
        })
        .collect()
}

fn check_label(cell: &Cell, ambiguous: bool) -> String {
    if ambiguous {
        format!(
            "Checked \"{}\" (row {}, column {})",
            cell.display_label(),
            cell.row + 1,
            cell.col + 1
        )
    } else {
        format!("Checked \"{}\"", cell.display_label())
    }
}

fn completion_event(board: &Board, mode: GameMode) -> Option<HistoryEvent> {
    let record = board.record(mode);
    let completed_at = record.completed_at?;

    let deadline = record.completion_deadline;
    let before_deadline = deadline.map(|d| d > completed_at);

    let label = match mode {
        GameMode::Traditional => "Got bingo!",
        GameMode::Todo => "Completed every task!",
    };

    Some(
        HistoryEvent::new(EventKind::GameModeCompletion, label, Some(completed_at)).with_props(
            CompletionProps {
                mode,
                reward: record.completion_reward.clone(),
                deadline,
                before_deadline,
            },
        ),
    )
}

/// An expiry is reported once the deadline has passed, unless the mode was
/// completed strictly before it.
fn deadline_expiry_event(
    board: &Board,
    mode: GameMode,
    now: DateTime<Utc>,
    qualify: bool,
) -> Option<HistoryEvent> {
    let record = board.record(mode);
    let deadline = record.completion_deadline?;

    if deadline >= now {
        return None;
    }
    if let Some(completed_at) = record.completed_at {
        if deadline > completed_at {
            return None;
        }
    }

    let label = if qualify {
        match mode {
            GameMode::Traditional => "Traditional deadline passed",
            GameMode::Todo => "To-do deadline passed",
        }
    } else {
        "Deadline passed"
    };

    Some(HistoryEvent::new(
        EventKind::DeadlineExpiry,
        label,
        Some(deadline),
    ))
}
