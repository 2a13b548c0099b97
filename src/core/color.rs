//! Player colors and seating order.

use serde::{Deserialize, Serialize};

/// One of the four fixed player colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    Yellow,
    Red,
    Green,
    Blue,
}

/// Seating order. Players are always seated in this order regardless of
/// the order colors were selected in.
pub const PLAYER_ORDER: [PlayerColor; 4] = [
    PlayerColor::Yellow,
    PlayerColor::Red,
    PlayerColor::Green,
    PlayerColor::Blue,
];

impl PlayerColor {
    /// Display name, also used as the player's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PlayerColor::Yellow => "Yellow",
            PlayerColor::Red => "Red",
            PlayerColor::Green => "Green",
            PlayerColor::Blue => "Blue",
        }
    }

    /// Position of this color in [`PLAYER_ORDER`].
    #[must_use]
    pub const fn seat(self) -> usize {
        match self {
            PlayerColor::Yellow => 0,
            PlayerColor::Red => 1,
            PlayerColor::Green => 2,
            PlayerColor::Blue => 3,
        }
    }

    /// Iterate over all colors in seating order.
    pub fn all() -> impl Iterator<Item = PlayerColor> {
        PLAYER_ORDER.into_iter()
    }
}

impl std::fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_matches_order() {
        for (idx, color) in PLAYER_ORDER.iter().enumerate() {
            assert_eq!(color.seat(), idx);
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(PlayerColor::Yellow.name(), "Yellow");
        assert_eq!(format!("{}", PlayerColor::Blue), "Blue");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&PlayerColor::Green).unwrap();
        assert_eq!(json, "\"green\"");
        let back: PlayerColor = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(back, PlayerColor::Red);
    }
}
