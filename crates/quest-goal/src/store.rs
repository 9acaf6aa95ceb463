// store.rs — GoalStore: the ordered goal collection plus its running score.
//
// Goals are appended and never removed or reordered, so a position stays
// valid for the lifetime of a store. Each goal also carries a GoalId for
// callers that want addressing that survives display reordering.

use serde::Serialize;

use crate::error::GoalError;
use crate::goal::{Goal, GoalId, GoalKind, RECORD_DELIMITER};

/// Which kind of goal to create, with the variant-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalVariant {
    Simple,
    Eternal,
    Checklist { target_count: u32, bonus: i64 },
}

/// One display row of [`GoalStore::list_goals`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalListing {
    pub id: GoalId,
    pub label: String,
    pub name: String,
    pub points: i64,
}

/// In-memory goal collection and cumulative score.
///
/// The score is the sum of every point ever awarded and only changes
/// through [`record_event`](Self::record_event) and
/// [`record_event_by_id`](Self::record_event_by_id).
#[derive(Debug, Clone, Default)]
pub struct GoalStore {
    goals: Vec<Goal>,
    score: i64,
}

impl GoalStore {
    /// Create an empty store with a score of zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from already-decoded parts. Used by the codec.
    pub(crate) fn from_parts(goals: Vec<Goal>, score: i64) -> Self {
        Self { goals, score }
    }

    /// Construct a goal of the requested variant and append it.
    pub fn create_goal(
        &mut self,
        name: &str,
        points: i64,
        variant: GoalVariant,
    ) -> Result<GoalId, GoalError> {
        validate_name(name)?;

        let kind = match variant {
            GoalVariant::Simple => GoalKind::Simple { complete: false },
            GoalVariant::Eternal => GoalKind::Eternal,
            GoalVariant::Checklist {
                target_count,
                bonus,
            } => {
                if target_count < 1 {
                    return Err(GoalError::InvalidArgument {
                        field: "target_count",
                        reason: "must be at least 1".to_string(),
                    });
                }
                GoalKind::Checklist {
                    target_count,
                    current_count: 0,
                    bonus,
                }
            }
        };

        let goal = Goal::new(name, points, kind);
        let id = goal.id;
        tracing::debug!(goal_id = %id, kind = goal.kind.tag(), name, points, "goal created");
        self.goals.push(goal);
        Ok(id)
    }

    /// Record one event against the goal at `index` and add the earned
    /// points to the score. The score saturates at the `i64` bounds.
    pub fn record_event(&mut self, index: usize) -> Result<i64, GoalError> {
        let len = self.goals.len();
        let goal = self
            .goals
            .get_mut(index)
            .ok_or(GoalError::IndexOutOfRange { index, len })?;
        let gained = goal.record_progress();
        self.score = self.score.saturating_add(gained);
        tracing::debug!(index, goal_id = %goal.id, gained, score = self.score, "event recorded");
        Ok(gained)
    }

    /// Record one event against the goal with the given identifier.
    pub fn record_event_by_id(&mut self, id: GoalId) -> Result<i64, GoalError> {
        let index = self.position(id).ok_or(GoalError::NotFound(id))?;
        self.record_event(index)
    }

    /// Display rows in insertion order.
    pub fn list_goals(&self) -> Vec<GoalListing> {
        self.goals
            .iter()
            .map(|g| GoalListing {
                id: g.id,
                label: g.progress_label(),
                name: g.name.clone(),
                points: g.points,
            })
            .collect()
    }

    pub fn total_score(&self) -> i64 {
        self.score
    }

    /// Read-only view of the goals in insertion order.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Current position of the goal with the given identifier.
    pub fn position(&self, id: GoalId) -> Option<usize> {
        self.goals.iter().position(|g| g.id == id)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}

/// Names must survive the line-oriented record format unchanged.
fn validate_name(name: &str) -> Result<(), GoalError> {
    let reason = if name.trim().is_empty() {
        "must not be empty"
    } else if name.contains(RECORD_DELIMITER) {
        "must not contain ','"
    } else if name.contains(['\n', '\r']) {
        "must not contain a line break"
    } else {
        return Ok(());
    };
    Err(GoalError::InvalidArgument {
        field: "name",
        reason: reason.to_string(),
    })
}
