//! # rust-aeroplane
//!
//! Rules engine for the four-color aeroplane racing game.
//!
//! ## Design Principles
//!
//! 1. **Single Source of Truth**: `GameEngine` owns the only mutable
//!    `GameState`. Nothing else changes it.
//!
//! 2. **Whole-State Replacement**: Every transition builds the next snapshot
//!    from a clone and swaps it in. Cloning is cheap via `im-rs`.
//!
//! 3. **Presentation-Agnostic**: The engine reports *what* happened (log
//!    lines, `MoveEvent`s); how it is drawn or paced is up to the caller.
//!
//! ## Architecture
//!
//! - **Deferred Transitions**: Turn hand-offs fire after a configurable
//!   delay on a caller-driven clock. Each carries the roll stamp it was
//!   scheduled under and is dropped if the game has moved on.
//!
//! - **Shared Geometry**: Movement arithmetic reads the same tables a
//!   renderer draws from, so jumps and shortcuts always match the board.
//!
//! ## Modules
//!
//! - `core`: Colors, pieces, players, dice, configuration, log, state
//! - `board`: Track and per-color layout tables
//! - `rules`: Movement resolution, deferred transitions, turn engine
//!
//! ## Example
//!
//! ```
//! use rust_aeroplane::{EngineConfig, GameEngine, PlayerColor, TurnState};
//!
//! let mut engine = GameEngine::new(EngineConfig::instant().with_seed(1));
//! engine.start_game(&[PlayerColor::Blue, PlayerColor::Yellow]).unwrap();
//!
//! // Yellow always sits first.
//! assert_eq!(engine.players()[0].color, PlayerColor::Yellow);
//!
//! engine.roll_dice().unwrap();
//! if engine.turn_state() == TurnState::Moving {
//!     let piece = engine.movable_pieces()[0];
//!     engine.move_piece(piece).unwrap();
//! }
//! assert!(engine.state().track_is_consistent());
//! ```

pub mod core;
pub mod board;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    PlayerColor, PLAYER_ORDER,
    Piece, PieceId, PieceState, PIECES_PER_PLAYER,
    Player, PlayerId, MovablePieces,
    DiceSource, GameRng, GameRngState, ScriptedDice,
    ConfigError, EngineConfig,
    GameLog, LogEntry, MoveEvent, MoveEvents, describe_move,
    Action, ActionRecord,
    GameState, GameStatus, RollId, TurnState,
};

pub use crate::board::{Coord, Shortcut, TrackCell, TRACK_LENGTH};

pub use crate::rules::{
    ActionRejected, GameEngine,
    MoveResolution, resolve_move,
    PendingTransition, TransitionKind,
};
