// goal.rs — Goal: a trackable objective with variant-specific progress rules.
//
// Three variants share one contract:
//   Simple    — completes on the first recorded event
//   Eternal   — never completes; every event earns points
//   Checklist — completes after `target_count` events, paying a bonus once
//
// Once a Simple or Checklist goal is complete, further events earn nothing.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Field separator used by the persisted record format.
pub const RECORD_DELIMITER: char = ',';

pub const SIMPLE_TAG: &str = "SimpleGoal";
pub const ETERNAL_TAG: &str = "EternalGoal";
pub const CHECKLIST_TAG: &str = "ChecklistGoal";

/// Opaque identifier assigned to a goal when it is created.
///
/// Identifiers are stable for the lifetime of a store but are not part of
/// the record format, so a reloaded store hands out fresh ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(Uuid);

impl GoalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GoalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Variant-specific progress state.
///
/// `#[serde(tag = "type")]` renders this as `{"type": "checklist", ...}`
/// in JSON listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GoalKind {
    /// One-shot goal.
    Simple { complete: bool },

    /// Repeatable goal that never completes.
    Eternal,

    /// Goal that completes after `target_count` events.
    Checklist {
        target_count: u32,
        current_count: u32,
        bonus: i64,
    },
}

impl GoalKind {
    /// The record tag written as the first field of a persisted line.
    pub fn tag(&self) -> &'static str {
        match self {
            GoalKind::Simple { .. } => SIMPLE_TAG,
            GoalKind::Eternal => ETERNAL_TAG,
            GoalKind::Checklist { .. } => CHECKLIST_TAG,
        }
    }
}

/// A single goal owned by a [`GoalStore`](crate::GoalStore).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,

    /// Display name. Never empty and never contains the record delimiter.
    pub name: String,

    /// Points earned per recorded event.
    pub points: i64,

    pub kind: GoalKind,
}

impl Goal {
    pub(crate) fn new(name: impl Into<String>, points: i64, kind: GoalKind) -> Self {
        Self {
            id: GoalId::new(),
            name: name.into(),
            points,
            kind,
        }
    }

    /// Whether the goal has reached its terminal state.
    ///
    /// Eternal goals always report `false`.
    pub fn is_complete(&self) -> bool {
        match self.kind {
            GoalKind::Simple { complete } => complete,
            GoalKind::Eternal => false,
            GoalKind::Checklist {
                target_count,
                current_count,
                ..
            } => current_count >= target_count,
        }
    }

    /// Record one event against this goal and return the points it earned.
    ///
    /// A Checklist's completing event saturates at the `i64` bounds.
    pub fn record_progress(&mut self) -> i64 {
        match &mut self.kind {
            GoalKind::Simple { complete } => {
                if *complete {
                    return 0;
                }
                *complete = true;
                self.points
            }
            GoalKind::Eternal => self.points,
            GoalKind::Checklist {
                target_count,
                current_count,
                bonus,
            } => {
                if *current_count >= *target_count {
                    return 0;
                }
                *current_count += 1;
                if *current_count == *target_count {
                    self.points.saturating_add(*bonus)
                } else {
                    self.points
                }
            }
        }
    }

    /// Short status marker: `[X]`, `[ ]`, `(Ongoing)` or `[current/target]`.
    pub fn progress_label(&self) -> String {
        match &self.kind {
            GoalKind::Eternal => "(Ongoing)".to_string(),
            _ if self.is_complete() => "[X]".to_string(),
            GoalKind::Simple { .. } => "[ ]".to_string(),
            GoalKind::Checklist {
                target_count,
                current_count,
                ..
            } => format!("[{}/{}]", current_count, target_count),
        }
    }

    /// Encode this goal as one persisted line (without the trailing newline).
    pub fn to_record(&self) -> String {
        let d = RECORD_DELIMITER;
        let tag = self.kind.tag();
        match &self.kind {
            GoalKind::Simple { complete } => {
                format!("{tag}{d}{}{d}{}{d}{}", self.name, self.points, complete)
            }
            GoalKind::Eternal => format!("{tag}{d}{}{d}{}", self.name, self.points),
            GoalKind::Checklist {
                target_count,
                current_count,
                bonus,
            } => format!(
                "{tag}{d}{}{d}{}{d}{}{d}{}{d}{}",
                self.name, self.points, target_count, current_count, bonus
            ),
        }
    }
}

/// Renders the display row: `<label> <name> (<points> pts)`.
impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} pts)",
            self.progress_label(),
            self.name,
            self.points
        )
    }
}
