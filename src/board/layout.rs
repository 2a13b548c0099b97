//! Per-color board layout: start and gateway cells, shortcuts, home stretch,
//! launch pads and hangars.
//!
//! The movement rules and any renderer read the same tables, so jump and
//! shortcut arithmetic always agrees with what is drawn.

use std::sync::OnceLock;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::track::{walk, Coord};
use crate::core::{Piece, PieceState, PlayerColor};

/// Slots in a home stretch, including the finish slot.
pub const HOME_LENGTH: u8 = 6;

/// Home-stretch offset that means "finished".
pub const HOME_FINISH_OFFSET: u8 = 5;

/// Centre of the board where finished pieces rest.
pub const CENTER: Coord = Coord::new(7, 7);

/// A same-color teleport from `entry` to `exit` on the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub entry: u8,
    pub exit: u8,
}

/// Rectangle of grid cells a color's base pieces are drawn in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HangarZone {
    pub x_min: u8,
    pub x_max: u8,
    pub y_min: u8,
    pub y_max: u8,
}

impl HangarZone {
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.x >= self.x_min
            && coord.x <= self.x_max
            && coord.y >= self.y_min
            && coord.y <= self.y_max
    }
}

/// Track cell where a launched piece's count starts.
#[must_use]
pub const fn start_cell(color: PlayerColor) -> u8 {
    match color {
        PlayerColor::Yellow => 0,
        PlayerColor::Red => 13,
        PlayerColor::Green => 26,
        PlayerColor::Blue => 39,
    }
}

/// Track cell where a color's pieces turn off into their home stretch.
#[must_use]
pub const fn gateway_cell(color: PlayerColor) -> u8 {
    match color {
        PlayerColor::Yellow => 49,
        PlayerColor::Red => 10,
        PlayerColor::Green => 23,
        PlayerColor::Blue => 36,
    }
}

#[must_use]
pub const fn shortcut(color: PlayerColor) -> Shortcut {
    match color {
        PlayerColor::Blue => Shortcut { entry: 4, exit: 16 },
        PlayerColor::Yellow => Shortcut { entry: 17, exit: 29 },
        PlayerColor::Red => Shortcut { entry: 30, exit: 42 },
        PlayerColor::Green => Shortcut { entry: 43, exit: 3 },
    }
}

/// Launch pad where launched pieces wait before entering the track.
#[must_use]
pub const fn launch_coord(color: PlayerColor) -> Coord {
    match color {
        PlayerColor::Yellow => Coord::new(0, 11),
        PlayerColor::Red => Coord::new(11, 14),
        PlayerColor::Blue => Coord::new(3, 0),
        PlayerColor::Green => Coord::new(14, 3),
    }
}

#[must_use]
pub const fn hangar_zone(color: PlayerColor) -> HangarZone {
    match color {
        PlayerColor::Yellow => HangarZone { x_min: 1, x_max: 2, y_min: 12, y_max: 13 },
        PlayerColor::Red => HangarZone { x_min: 12, x_max: 13, y_min: 12, y_max: 13 },
        PlayerColor::Green => HangarZone { x_min: 12, x_max: 13, y_min: 1, y_max: 2 },
        PlayerColor::Blue => HangarZone { x_min: 1, x_max: 2, y_min: 1, y_max: 2 },
    }
}

fn home_lane_ends(color: PlayerColor) -> (Coord, Coord) {
    match color {
        PlayerColor::Yellow => (Coord::new(1, 7), Coord::new(6, 7)),
        PlayerColor::Green => (Coord::new(13, 7), Coord::new(8, 7)),
        PlayerColor::Red => (Coord::new(7, 13), Coord::new(7, 8)),
        PlayerColor::Blue => (Coord::new(7, 1), Coord::new(7, 6)),
    }
}

fn shortcut_path_ends(color: PlayerColor) -> (Coord, Coord) {
    match color {
        PlayerColor::Green => (Coord::new(3, 5), Coord::new(3, 10)),
        PlayerColor::Blue => (Coord::new(5, 11), Coord::new(10, 11)),
        PlayerColor::Yellow => (Coord::new(11, 9), Coord::new(11, 4)),
        PlayerColor::Red => (Coord::new(9, 3), Coord::new(4, 3)),
    }
}

struct ColorPaths {
    home: Vec<Coord>,
    flight: Vec<Coord>,
    flight_set: FxHashSet<Coord>,
}

fn paths(color: PlayerColor) -> &'static ColorPaths {
    static PATHS: OnceLock<Vec<ColorPaths>> = OnceLock::new();
    let all = PATHS.get_or_init(|| {
        PlayerColor::all()
            .map(|c| {
                let (home_from, home_to) = home_lane_ends(c);
                let (flight_from, flight_to) = shortcut_path_ends(c);
                let mut home: Vec<Coord> = walk(home_from, home_to).collect();
                home.push(CENTER);
                let flight: Vec<Coord> = walk(flight_from, flight_to).collect();
                let flight_set = flight.iter().copied().collect();
                ColorPaths { home, flight, flight_set }
            })
            .collect()
    });
    &all[color.seat()]
}

/// Home stretch coordinates from the gateway inwards, ending at [`CENTER`].
#[must_use]
pub fn home_path(color: PlayerColor) -> &'static [Coord] {
    &paths(color).home
}

/// Coordinate of a home-stretch offset, if it is on the path.
#[must_use]
pub fn home_coord(color: PlayerColor, offset: u8) -> Option<Coord> {
    home_path(color).get(offset as usize).copied()
}

/// Coordinates a piece flies over when it takes its color's shortcut.
#[must_use]
pub fn shortcut_path(color: PlayerColor) -> &'static [Coord] {
    &paths(color).flight
}

/// Whether `coord` lies under `color`'s shortcut flight path.
#[must_use]
pub fn shortcut_crosses(color: PlayerColor, coord: Coord) -> bool {
    paths(color).flight_set.contains(&coord)
}

/// Where a piece of `color` is drawn. Base pieces have no single cell;
/// they are drawn anywhere inside [`hangar_zone`].
#[must_use]
pub fn piece_coord(color: PlayerColor, piece: &Piece) -> Option<Coord> {
    match piece.state {
        PieceState::Base => None,
        PieceState::Launched => Some(launch_coord(color)),
        PieceState::Active { cell } => Some(super::track::cell_coord(cell)),
        PieceState::Home { offset } => home_coord(color, offset),
        PieceState::Finished => Some(CENTER),
    }
}
