//! Pieces and their lifecycle.
//!
//! A piece moves forward through five states:
//!
//! ```text
//! Base -> Launched -> Active { cell } -> Home { offset } -> Finished
//! ```
//!
//! Capture is the only backward transition: it returns a piece to `Base`.
//! Position data lives inside the state variant, so a track cell can only
//! exist for an active piece and a home offset only for a piece in its
//! home stretch.

use serde::{Deserialize, Serialize};

/// Number of pieces each player owns.
pub const PIECES_PER_PLAYER: usize = 4;

/// Legacy numeric position of a piece in base or on the launch pad.
pub const BASE_POSITION: i32 = -1;

/// Legacy numeric position offset for home-stretch pieces.
pub const HOME_POSITION_BASE: i32 = 100;

/// Legacy numeric position of a finished piece.
pub const FINISHED_POSITION: i32 = 200;

/// Piece identifier, unique within a player (0-3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u8);

impl PieceId {
    /// Create a new piece ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this ID names one of a player's pieces.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.index() < PIECES_PER_PLAYER
    }

    /// Iterate over all piece IDs of a player.
    pub fn all() -> impl Iterator<Item = PieceId> {
        (0..PIECES_PER_PLAYER as u8).map(PieceId)
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece {}", self.0)
    }
}

/// Where a piece is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PieceState {
    /// In the hangar. Needs a 6 to leave.
    #[default]
    Base,
    /// On the launch pad, not yet on the shared track.
    Launched,
    /// On the shared track at `cell` (0-51).
    Active { cell: u8 },
    /// In the color's private home stretch at `offset` (0-4).
    Home { offset: u8 },
    /// Reached the centre. Never moves again.
    Finished,
}

impl PieceState {
    /// Track cell if the piece is active.
    #[must_use]
    pub const fn track_cell(self) -> Option<u8> {
        match self {
            PieceState::Active { cell } => Some(cell),
            _ => None,
        }
    }

    /// Home-stretch offset if the piece is in its home stretch.
    #[must_use]
    pub const fn home_offset(self) -> Option<u8> {
        match self {
            PieceState::Home { offset } => Some(offset),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, PieceState::Finished)
    }
}

/// A single piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    #[serde(flatten)]
    pub state: PieceState,
}

impl Piece {
    /// Create a piece in base.
    #[must_use]
    pub const fn new(id: PieceId) -> Self {
        Self {
            id,
            state: PieceState::Base,
        }
    }

    /// Create a piece in the given state.
    #[must_use]
    pub const fn with_state(id: PieceId, state: PieceState) -> Self {
        Self { id, state }
    }

    /// Numeric position as readers of the board expect it:
    /// -1 in base or launched, the track cell while active,
    /// `100 + offset` in the home stretch, 200 once finished.
    #[must_use]
    pub const fn position(&self) -> i32 {
        match self.state {
            PieceState::Base | PieceState::Launched => BASE_POSITION,
            PieceState::Active { cell } => cell as i32,
            PieceState::Home { offset } => HOME_POSITION_BASE + offset as i32,
            PieceState::Finished => FINISHED_POSITION,
        }
    }

    /// Whether a roll gives this piece a legal move.
    ///
    /// Base pieces need a 6. Launched, active and home pieces can always
    /// move (a home piece near the centre bounces). Finished pieces never move.
    #[must_use]
    pub const fn is_movable(&self, roll: u8) -> bool {
        match self.state {
            PieceState::Base => roll == 6,
            PieceState::Launched | PieceState::Active { .. } | PieceState::Home { .. } => true,
            PieceState::Finished => false,
        }
    }

    /// Return the piece to base.
    pub fn send_to_base(&mut self) {
        self.state = PieceState::Base;
    }
}
