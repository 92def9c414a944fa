//! Rebuilds an ordered, grouped history from a single board snapshot.
//!
//! There is no event log to replay. Every group is inferred from cell check
//! times and the two game-mode records, then milestones are injected in one
//! chronological pass.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::board::{Board, GameMode};
use crate::error::Result;
use crate::grid::evaluate_pattern_membership;

use super::events::candidate_events;
use super::types::{EventKind, HistoryEvent, HistoryGroup};

/// Events that share one instant, with the progress recorded at that instant.
#[derive(Debug, Clone)]
struct Bucket {
    timestamp: DateTime<Utc>,
    events: Vec<HistoryEvent>,
    pattern_count: usize,
    checked_count: usize,
}

impl Bucket {
    fn has_check(&self) -> bool {
        self.events.iter().any(|e| e.kind == EventKind::CellCheck)
    }

    fn leading_kind(&self) -> Option<EventKind> {
        self.events.first().map(|e| e.kind)
    }

    /// Insert `event` ahead of every event with a lower priority.
    fn insert_by_priority(&mut self, event: HistoryEvent) {
        let priority = event.kind.priority();
        let at = self
            .events
            .iter()
            .position(|e| e.kind.priority() < priority)
            .unwrap_or(self.events.len());
        self.events.insert(at, event);
    }

    fn into_group(self) -> HistoryGroup {
        HistoryGroup::new(
            Some(self.timestamp),
            self.events,
            self.pattern_count,
            self.checked_count,
        )
    }
}

/// Reconstruct the history of `board`, judging deadlines against the current time.
pub fn reconstruct_history(board: &Board) -> Result<Vec<HistoryGroup>> {
    reconstruct_history_at(board, Utc::now())
}

/// Reconstruct the history of `board` as seen at `now`. Groups are newest first.
pub fn reconstruct_history_at(board: &Board, now: DateTime<Utc>) -> Result<Vec<HistoryGroup>> {
    let dimension = board.dimension()?;
    let total = board.cells.len();

    let events: Vec<HistoryEvent> = candidate_events(board, now)
        .into_iter()
        .filter(|e| e.timestamp.is_some())
        .collect();
    debug!("History: {} candidate events", events.len());

    let buckets = bucket_events(events)
        .into_iter()
        .map(|bucket| with_progress(bucket, board, dimension))
        .collect::<Result<Vec<_>>>()?;
    debug!("History: {} buckets", buckets.len());

    let mut buckets = inject_milestones(buckets, dimension.unwrap_or(0), total);
    buckets.reverse();

    let mut groups = collapse_check_runs(buckets, total);

    if needs_reopen_marker(board, &groups) {
        groups.insert(
            0,
            HistoryGroup::new(
                None,
                vec![HistoryEvent::new(
                    EventKind::GameModeChange,
                    "Switched back to traditional game mode",
                    None,
                )],
                0,
                0,
            ),
        );
    }

    debug!("History: {} groups", groups.len());
    Ok(groups)
}

/// Group events by identical instant, oldest bucket first, highest priority
/// first within a bucket. Equal priorities keep insertion order.
fn bucket_events(events: Vec<HistoryEvent>) -> Vec<Bucket> {
    let mut by_instant: BTreeMap<DateTime<Utc>, Vec<HistoryEvent>> = BTreeMap::new();
    for event in events {
        if let Some(ts) = event.timestamp {
            by_instant.entry(ts).or_default().push(event);
        }
    }

    by_instant
        .into_iter()
        .map(|(timestamp, mut events)| {
            events.sort_by_key(|e| Reverse(e.kind.priority()));
            Bucket {
                timestamp,
                events,
                pattern_count: 0,
                checked_count: 0,
            }
        })
        .collect()
}

/// Record pattern and check counts as of the bucket's instant.
///
/// Works on a clone of the cells with later checks cleared, so the board is
/// never touched and no earlier evaluation leaks into this one. Buckets
/// without a check carry zero counts.
fn with_progress(mut bucket: Bucket, board: &Board, dimension: Option<usize>) -> Result<Bucket> {
    let Some(dimension) = dimension else {
        return Ok(bucket);
    };
    if !bucket.has_check() {
        return Ok(bucket);
    }

    let mut cells = board.cells.clone();
    for cell in &mut cells {
        cell.in_pattern = false;
        if cell.checked_at.is_some_and(|at| at > bucket.timestamp) {
            cell.checked_at = None;
        }
    }
    evaluate_pattern_membership(&mut cells, dimension)?;

    bucket.pattern_count = cells.iter().filter(|c| c.in_pattern).count();
    bucket.checked_count = cells.iter().filter(|c| c.is_checked()).count();
    Ok(bucket)
}

/// Walk buckets oldest first and grant the first-strike and halfway
/// milestones, each at most once.
fn inject_milestones(buckets: Vec<Bucket>, dimension: usize, total: usize) -> Vec<Bucket> {
    let (buckets, _, _) = buckets.into_iter().fold(
        (Vec::new(), false, false),
        |(mut done, mut first_strike, mut halfway), mut bucket| {
            if bucket.has_check() {
                if !first_strike && bucket.pattern_count > 0 {
                    let label = if bucket.pattern_count > dimension {
                        "First bingos!"
                    } else {
                        "First bingo!"
                    };
                    debug!("History: first strike at {}", bucket.timestamp);
                    bucket.insert_by_priority(HistoryEvent::new(
                        EventKind::FirstStrike,
                        label,
                        Some(bucket.timestamp),
                    ));
                    first_strike = true;
                } else if !halfway && bucket.checked_count * 2 >= total {
                    let label = if bucket.checked_count * 2 == total {
                        "Halfway done"
                    } else {
                        "Over halfway done"
                    };
                    debug!("History: halfway at {}", bucket.timestamp);
                    bucket.insert_by_priority(HistoryEvent::new(
                        EventKind::Halfway,
                        label,
                        Some(bucket.timestamp),
                    ));
                    halfway = true;
                }
            }
            done.push(bucket);
            (done, first_strike, halfway)
        },
    );
    buckets
}

/// Merge each maximal run of adjacent check-led buckets, a lone one
/// included, into a single progress group. Expects buckets newest first.
fn collapse_check_runs(buckets: Vec<Bucket>, total: usize) -> Vec<HistoryGroup> {
    let mut groups = Vec::new();
    let mut run: Vec<Bucket> = Vec::new();

    for bucket in buckets {
        if bucket.leading_kind() == Some(EventKind::CellCheck) {
            run.push(bucket);
            continue;
        }
        flush_run(&mut run, &mut groups, total);
        groups.push(bucket.into_group());
    }
    flush_run(&mut run, &mut groups, total);

    groups
}

fn flush_run(run: &mut Vec<Bucket>, groups: &mut Vec<HistoryGroup>, total: usize) {
    let members = std::mem::take(run);
    let Some(oldest) = members.last() else {
        return;
    };
    let (timestamp, pattern_count, checked_count) =
        (oldest.timestamp, oldest.pattern_count, oldest.checked_count);
    debug!(
        "History: collapsed {} check buckets into progress at {}",
        members.len(),
        timestamp
    );

    let header = HistoryEvent::new(
        EventKind::Progress,
        format!("{}/{} tasks checked", checked_count, total),
        Some(timestamp),
    );
    let events = std::iter::once(header)
        .chain(members.into_iter().flat_map(|b| b.events))
        .collect();

    groups.push(HistoryGroup::new(
        Some(timestamp),
        events,
        pattern_count,
        checked_count,
    ));
}

/// Checks after a traditional win mean the player switched back into the
/// finished traditional game; the switch itself has no timestamp.
fn needs_reopen_marker(board: &Board, groups: &[HistoryGroup]) -> bool {
    let Some(newest) = groups.first() else {
        return false;
    };

    newest.contains(EventKind::CellCheck)
        && board.active_mode == GameMode::Traditional
        && board.traditional.completed_at.is_some()
        && newest.kind != EventKind::GameModeCompletion
}
