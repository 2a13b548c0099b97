//! Deferred transitions.
//!
//! Some turn transitions happen after a short delay: recovering from the
//! triple-six penalty, skipping a turn with no legal move, handing the turn
//! to the next player, and re-opening the roll after a bonus move.
//!
//! Each pending transition carries the [`RollId`] it was scheduled under.
//! The engine drops a transition whose stamp no longer matches the state,
//! and a reset cancels everything outright. Time is a plain millisecond
//! counter driven by the caller, so tests never sleep.

use serde::{Deserialize, Serialize};

use crate::core::RollId;

/// Unique identifier for a pending transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransitionId(pub u32);

impl TransitionId {
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TransitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Transition({})", self.0)
    }
}

/// What a deferred transition does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// End the penalty pause and pass the turn.
    PenaltyRecovery,
    /// Skip a turn that had no legal move.
    AutoSkip,
    /// Pass the turn to the next player.
    AdvanceTurn,
    /// Let the same player roll again after moving on a 6.
    BonusRoll,
}

/// A transition waiting for its due time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransition {
    pub id: TransitionId,
    pub kind: TransitionKind,
    /// Stamp the transition was scheduled under.
    pub roll_id: RollId,
    /// Clock time (ms) at which it fires.
    pub due_ms: u64,
}

/// Pending transitions ordered by due time, then scheduling order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Scheduler {
    pending: Vec<PendingTransition>,
    next_id: u32,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `kind` to fire at `due_ms`.
    pub fn schedule(&mut self, kind: TransitionKind, roll_id: RollId, due_ms: u64) -> TransitionId {
        let id = TransitionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let entry = PendingTransition {
            id,
            kind,
            roll_id,
            due_ms,
        };

        // Stable insert: equal due times keep scheduling order.
        let at = self.pending.partition_point(|p| p.due_ms <= due_ms);
        self.pending.insert(at, entry);
        id
    }

    /// Drop every pending transition. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Remove and return every transition due at or before `now_ms`, earliest first.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<PendingTransition> {
        let split = self.pending.partition_point(|p| p.due_ms <= now_ms);
        self.pending.drain(..split).collect()
    }

    /// Due time of the earliest pending transition.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.pending.first().map(|p| p.due_ms)
    }

    #[must_use]
    pub fn pending(&self) -> &[PendingTransition] {
        &self.pending
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
