//! Game state snapshot.
//!
//! ## GameState
//!
//! The single source of truth for a game session:
//! - Status and turn state
//! - Seated players and their pieces
//! - Current player, dice value, six streak
//! - Log and action history
//!
//! Uses `im` persistent data structures so the engine can build each next
//! snapshot from a cheap clone and swap it in whole. Only the player a
//! transition touches is actually copied.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::{Action, ActionRecord};
use super::color::PlayerColor;
use super::log::GameLog;
use super::piece::{PieceId, PIECES_PER_PLAYER};
use super::player::{Player, PlayerId};
use crate::board::TRACK_LENGTH;

/// Whether a game is being set up, played, or over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Setup,
    Playing,
    Finished,
}

/// What input the current turn accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnState {
    /// Waiting for the current player to roll.
    #[default]
    Rolling,
    /// A roll is waiting to be spent on a piece.
    Moving,
    /// Locked while a deferred transition is pending. No input accepted.
    Resolving,
    /// Someone won. Only a reset is accepted.
    Finished,
}

/// Stamp that changes on every transition.
///
/// Deferred transitions carry the stamp they were scheduled under and are
/// dropped if the state has moved on. Carries no gameplay meaning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RollId(pub u64);

impl RollId {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for RollId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Roll({})", self.0)
    }
}

/// Complete game state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,

    /// Seated players in seating order.
    pub players: Vector<Player>,

    /// Index into `players` of whose turn it is.
    pub current_player: usize,

    /// Last roll, cleared once it has been spent.
    pub dice_value: Option<u8>,

    pub turn_state: TurnState,

    pub log: GameLog,

    /// Piece the presentation layer is pointing at. No gameplay effect.
    pub highlighted_piece: Option<PieceId>,

    /// Sixes rolled in a row during the current turn.
    pub consecutive_sixes: u8,

    /// Pieces moved on a 6 during the current turn. The triple-six penalty
    /// sends these back to base.
    pub moved_piece_ids: SmallVec<[PieceId; PIECES_PER_PLAYER]>,

    /// Set once, when a player finishes all four pieces.
    pub winner: Option<PlayerId>,

    pub roll_id: RollId,

    /// Accepted actions, oldest first.
    pub history: Vector<ActionRecord>,
}

impl GameState {
    /// A fresh state waiting for a game to start.
    #[must_use]
    pub fn setup() -> Self {
        Self::default()
    }

    /// A game in progress with the given colors seated in order.
    ///
    /// Colors are seated exactly as given; callers sort and validate them.
    #[must_use]
    pub fn playing(colors: &[PlayerColor]) -> Self {
        let players: Vector<Player> = colors
            .iter()
            .enumerate()
            .map(|(idx, &color)| Player::new(PlayerId::new(idx as u8), color))
            .collect();

        let log = match colors.first() {
            Some(&first) => GameLog::opened_by(first),
            None => GameLog::new(),
        };

        Self {
            status: GameStatus::Playing,
            players,
            log,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current(&self) -> Option<&Player> {
        self.players.get(self.current_player)
    }

    /// Player with the given ID.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Index of the player after the current one.
    #[must_use]
    pub fn next_player_index(&self) -> usize {
        match self.players.len() {
            0 => 0,
            n => (self.current_player + 1) % n,
        }
    }

    /// Move the roll stamp forward and return the new value.
    pub fn stamp(&mut self) -> RollId {
        self.roll_id = self.roll_id.next();
        self.roll_id
    }

    /// Clear the six streak and the pieces moved on sixes.
    pub fn reset_streak(&mut self) {
        self.consecutive_sixes = 0;
        self.moved_piece_ids.clear();
    }

    /// Append an action to the history.
    pub fn record_action(&mut self, player: Option<PlayerId>, action: Action) {
        let sequence = self.history.len() as u32;
        self.history
            .push_back(ActionRecord::new(player, action, self.roll_id, sequence));
    }

    /// Whether no two pieces of different colors share an active track cell.
    #[must_use]
    pub fn track_is_consistent(&self) -> bool {
        let mut seen: [Option<usize>; TRACK_LENGTH as usize] = [None; TRACK_LENGTH as usize];
        for (owner, player) in self.players.iter().enumerate() {
            for cell in player.pieces.iter().filter_map(|p| p.state.track_cell()) {
                match seen.get_mut(cell as usize) {
                    Some(Some(other)) if *other != owner => return false,
                    Some(slot) => *slot = Some(owner),
                    None => return false,
                }
            }
        }
        true
    }
}
