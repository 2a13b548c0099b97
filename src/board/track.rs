//! The shared 52-cell track.
//!
//! The track runs clockwise around the cross-shaped 15x15 board. It is
//! built from twelve straight segments; cells are numbered in walking
//! order starting from the left arm. Cell ownership cycles Blue, Yellow,
//! Red, Green so every color owns every fourth cell. Ownership decides
//! jumps and shortcuts, not who may stand on the cell.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::core::PlayerColor;

/// Side length of the square board grid.
pub const BOARD_SIZE: u8 = 15;

/// Number of cells on the shared track.
pub const TRACK_LENGTH: u8 = 52;

/// Cells skipped by an ordinary same-color jump.
pub const JUMP_DISTANCE: u8 = 4;

/// Grid coordinate. `(0, 0)` is the bottom-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// One cell of the shared track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackCell {
    pub index: u8,
    pub coord: Coord,
    pub owner: PlayerColor,
}

const OWNER_PATTERN: [PlayerColor; 4] = [
    PlayerColor::Blue,
    PlayerColor::Yellow,
    PlayerColor::Red,
    PlayerColor::Green,
];

/// Straight runs of the track, inclusive at both ends, in walking order.
const SEGMENTS: [(Coord, Coord); 12] = [
    (Coord::new(0, 10), Coord::new(3, 10)),
    (Coord::new(4, 11), Coord::new(4, 14)),
    (Coord::new(5, 14), Coord::new(9, 14)),
    (Coord::new(10, 14), Coord::new(10, 11)),
    (Coord::new(11, 10), Coord::new(14, 10)),
    (Coord::new(14, 9), Coord::new(14, 5)),
    (Coord::new(14, 4), Coord::new(11, 4)),
    (Coord::new(10, 3), Coord::new(10, 0)),
    (Coord::new(9, 0), Coord::new(5, 0)),
    (Coord::new(4, 0), Coord::new(4, 3)),
    (Coord::new(3, 4), Coord::new(0, 4)),
    (Coord::new(0, 5), Coord::new(0, 9)),
];

/// Inclusive walk from `from` to `to` along a single axis.
pub(crate) fn walk(from: Coord, to: Coord) -> impl Iterator<Item = Coord> {
    let steps = from.x.abs_diff(to.x).max(from.y.abs_diff(to.y));
    (0..=steps).map(move |i| Coord::new(toward(from.x, to.x, i), toward(from.y, to.y, i)))
}

fn toward(from: u8, to: u8, i: u8) -> u8 {
    match from.cmp(&to) {
        std::cmp::Ordering::Less => from + i,
        std::cmp::Ordering::Greater => from - i,
        std::cmp::Ordering::Equal => from,
    }
}

fn build_track() -> Vec<TrackCell> {
    SEGMENTS
        .iter()
        .flat_map(|&(from, to)| walk(from, to))
        .enumerate()
        .map(|(i, coord)| TrackCell {
            index: i as u8,
            coord,
            owner: OWNER_PATTERN[i % OWNER_PATTERN.len()],
        })
        .collect()
}

/// The full track, computed once.
pub fn track() -> &'static [TrackCell] {
    static TRACK: OnceLock<Vec<TrackCell>> = OnceLock::new();
    TRACK.get_or_init(build_track)
}

/// Owning color of a track cell. The index wraps around the track.
#[must_use]
pub const fn cell_owner(cell: u8) -> PlayerColor {
    OWNER_PATTERN[(cell % TRACK_LENGTH) as usize % OWNER_PATTERN.len()]
}

/// Grid coordinate of a track cell. The index wraps around the track.
#[must_use]
pub fn cell_coord(cell: u8) -> Coord {
    track()[(cell % TRACK_LENGTH) as usize].coord
}

/// Cell reached by moving `steps` forward from `cell`, wrapping at 52.
#[must_use]
pub const fn advance(cell: u8, steps: u8) -> u8 {
    ((cell as u16 + steps as u16) % TRACK_LENGTH as u16) as u8
}

/// Forward distance from `from` to `to` around the track.
#[must_use]
pub const fn distance(from: u8, to: u8) -> u8 {
    ((to as u16 + TRACK_LENGTH as u16 - (from % TRACK_LENGTH) as u16) % TRACK_LENGTH as u16) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_track_length() {
        assert_eq!(track().len(), TRACK_LENGTH as usize);
    }

    #[test]
    fn test_cells_are_unique() {
        let coords: FxHashSet<Coord> = track().iter().map(|c| c.coord).collect();
        assert_eq!(coords.len(), TRACK_LENGTH as usize);
    }

    #[test]
    fn test_cells_are_adjacent_or_corner() {
        // Consecutive cells differ by one step, or by one diagonal step at the
        // inner corners of the cross.
        let cells = track();
        for i in 0..cells.len() {
            let a = cells[i].coord;
            let b = cells[(i + 1) % cells.len()].coord;
            assert!(a.x.abs_diff(b.x) <= 1 && a.y.abs_diff(b.y) <= 1, "{a:?} -> {b:?}");
        }
    }

    #[test]
    fn test_segment_endpoints() {
        assert_eq!(cell_coord(0), Coord::new(0, 10));
        assert_eq!(cell_coord(3), Coord::new(3, 10));
        assert_eq!(cell_coord(4), Coord::new(4, 11));
        assert_eq!(cell_coord(13), Coord::new(10, 14));
        assert_eq!(cell_coord(51), Coord::new(0, 9));
    }

    #[test]
    fn test_owner_pattern() {
        assert_eq!(cell_owner(0), PlayerColor::Blue);
        assert_eq!(cell_owner(1), PlayerColor::Yellow);
        assert_eq!(cell_owner(2), PlayerColor::Red);
        assert_eq!(cell_owner(3), PlayerColor::Green);
        assert_eq!(cell_owner(49), PlayerColor::Yellow);
        for cell in track() {
            assert_eq!(cell.owner, cell_owner(cell.index));
        }
    }

    #[test]
    fn test_advance_wraps() {
        assert_eq!(advance(50, 4), 2);
        assert_eq!(advance(10, 6), 16);
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(47, 49), 2);
        assert_eq!(distance(49, 49), 0);
        assert_eq!(distance(50, 10), 12);
        assert_eq!(distance(11, 10), 51);
    }
}
