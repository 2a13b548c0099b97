//! Game rules: piece movement, deferred transitions, and the turn engine.
//!
//! - `movement` resolves a single move as a pure function of the players
//! - `schedule` holds transitions that fire after a delay
//! - `engine` owns the state and sequences turns
//!
//! The engine calls into `movement` but never re-derives board arithmetic.

pub mod engine;
pub mod movement;
pub mod schedule;

pub use engine::{ActionRejected, GameEngine, PENALTY_SIXES};
pub use movement::{reflect_home, resolve_move, HomeLanding, MoveResolution};
pub use schedule::{PendingTransition, Scheduler, TransitionId, TransitionKind};
