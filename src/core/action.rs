//! Action history.
//!
//! Every accepted action is recorded with the player who took it and the
//! roll identifier it was taken under. The history is kept for replay and
//! debugging; the game log is the human-readable counterpart.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::PlayerColor;
use super::piece::PieceId;
use super::player::PlayerId;
use super::state::RollId;

/// An action accepted by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Seat the given colors and start playing.
    StartGame { colors: SmallVec<[PlayerColor; 4]> },
    /// Roll the die; `value` is what came up.
    RollDice { value: u8 },
    /// Move `piece` by `roll`.
    MovePiece { piece: PieceId, roll: u8 },
    /// Pass the turn. `auto` when the engine skipped because no move existed.
    SkipTurn { auto: bool },
}

impl Action {
    /// Whether the engine took this action on the player's behalf.
    #[must_use]
    pub fn is_automatic(&self) -> bool {
        matches!(self, Action::SkipTurn { auto: true })
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Acting player. `None` for game-level actions such as starting.
    pub player: Option<PlayerId>,

    /// The action taken.
    pub action: Action,

    /// Roll identifier in force when the action was accepted.
    pub roll_id: RollId,

    /// Position in the history (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: Option<PlayerId>, action: Action, roll_id: RollId, sequence: u32) -> Self {
        Self {
            player,
            action,
            roll_id,
            sequence,
        }
    }
}
