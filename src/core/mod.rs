//! Core game types: colors, pieces, players, dice, configuration, log, state.
//!
//! Nothing in here knows the movement rules; it only holds and describes
//! state. The `rules` module performs every mutation.

pub mod color;
pub mod piece;
pub mod player;
pub mod rng;
pub mod config;
pub mod log;
pub mod action;
pub mod state;

pub use color::{PlayerColor, PLAYER_ORDER};
pub use piece::{Piece, PieceId, PieceState, PIECES_PER_PLAYER};
pub use player::{MovablePieces, Player, PlayerId};
pub use rng::{DiceSource, GameRng, GameRngState, ScriptedDice};
pub use config::{ConfigError, EngineConfig};
pub use log::{describe_move, GameLog, LogEntry, MoveEvent, MoveEvents};
pub use action::{Action, ActionRecord};
pub use state::{GameState, GameStatus, RollId, TurnState};
