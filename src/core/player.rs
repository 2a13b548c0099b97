//! Player identification and per-player pieces.
//!
//! ## PlayerId
//!
//! Seat index, 0-based, fixed when the game starts.
//!
//! ## Player
//!
//! A seated color with exactly four pieces. Players are created once at
//! game start and never added or removed mid-game.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::PlayerColor;
use super::piece::{Piece, PieceId, PIECES_PER_PLAYER};

/// Player identifier (seat index).
///
/// Player indices are 0-based: the first seated player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use rust_aeroplane::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Pieces a roll lets a player move. Never more than four.
pub type MovablePieces = SmallVec<[PieceId; PIECES_PER_PLAYER]>;

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub color: PlayerColor,
    pub name: String,
    pub pieces: [Piece; PIECES_PER_PLAYER],
}

impl Player {
    /// Seat a player with all pieces in base. The name is the color's name.
    #[must_use]
    pub fn new(id: PlayerId, color: PlayerColor) -> Self {
        Self {
            id,
            color,
            name: color.name().to_string(),
            pieces: [0, 1, 2, 3].map(|i| Piece::new(PieceId::new(i))),
        }
    }

    /// Look up a piece by ID.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    /// Look up a piece by ID for mutation.
    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(id.index())
    }

    /// Pieces that have a legal move for `roll`.
    #[must_use]
    pub fn movable_pieces(&self, roll: u8) -> MovablePieces {
        self.pieces
            .iter()
            .filter(|p| p.is_movable(roll))
            .map(|p| p.id)
            .collect()
    }

    /// Whether any piece can move with `roll`.
    #[must_use]
    pub fn can_move(&self, roll: u8) -> bool {
        self.pieces.iter().any(|p| p.is_movable(roll))
    }

    /// A player has won once all four pieces are finished.
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.pieces.iter().all(|p| p.state.is_finished())
    }
}
