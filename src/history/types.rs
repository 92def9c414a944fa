//! Data structures for reconstructed board history.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::board::GameMode;

/// What happened at a point in a board's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    Creation,
    CellCheck,
    Progress,
    Halfway,
    FirstStrike,
    DeadlineExpiry,
    GameModeChange,
    GameModeCompletion,
}

impl EventKind {
    /// Ordering weight within a bucket of simultaneous events; higher leads.
    pub fn priority(self) -> u8 {
        match self {
            EventKind::GameModeCompletion => 5,
            EventKind::GameModeChange => 4,
            EventKind::DeadlineExpiry => 3,
            EventKind::Halfway | EventKind::FirstStrike => 2,
            EventKind::CellCheck | EventKind::Progress => 1,
            EventKind::Creation => 0,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            EventKind::Creation => "✨",
            EventKind::CellCheck => "✅",
            EventKind::Progress => "📈",
            EventKind::Halfway => "🌓",
            EventKind::FirstStrike => "🎯",
            EventKind::DeadlineExpiry => "⏰",
            EventKind::GameModeChange => "🔀",
            EventKind::GameModeCompletion => "🏆",
        }
    }
}

/// Extra data carried by completion events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionProps {
    pub mode: GameMode,
    pub reward: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    /// `None` when there was no deadline to meet.
    pub before_deadline: Option<bool>,
}

/// A single inferred event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    pub label: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<CompletionProps>,
}

impl HistoryEvent {
    pub fn new(kind: EventKind, label: impl Into<String>, timestamp: Option<DateTime<Utc>>) -> Self {
        Self {
            label: label.into(),
            timestamp,
            kind,
            props: None,
        }
    }

    pub fn with_props(mut self, props: CompletionProps) -> Self {
        self.props = Some(props);
        self
    }
}

/// Events sharing one instant, or a merged run of checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryGroup {
    pub kind: EventKind,
    pub icon: &'static str,
    pub timestamp: Option<DateTime<Utc>>,
    pub events: Vec<HistoryEvent>,
    pub pattern_count: usize,
    pub checked_count: usize,
}

impl HistoryGroup {
    /// Build a group whose kind and icon follow its leading event.
    pub fn new(
        timestamp: Option<DateTime<Utc>>,
        events: Vec<HistoryEvent>,
        pattern_count: usize,
        checked_count: usize,
    ) -> Self {
        let kind = events
            .first()
            .map(|e| e.kind)
            .unwrap_or(EventKind::Progress);

        Self {
            kind,
            icon: kind.icon(),
            timestamp,
            events,
            pattern_count,
            checked_count,
        }
    }

    /// Label of the leading event.
    pub fn label(&self) -> &str {
        self.events.first().map(|e| e.label.as_str()).unwrap_or("")
    }

    pub fn contains(&self, kind: EventKind) -> bool {
        self.events.iter().any(|e| e.kind == kind)
    }
}
