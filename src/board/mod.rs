//! Board geometry: the shared track and per-color layout tables.
//!
//! Everything here is static and read-only. The movement rules use it for
//! arithmetic, a renderer uses it for drawing.

pub mod track;
pub mod layout;

pub use track::{
    advance, cell_coord, cell_owner, distance, track, Coord, TrackCell, BOARD_SIZE, JUMP_DISTANCE,
    TRACK_LENGTH,
};
pub use layout::{
    gateway_cell, hangar_zone, home_coord, home_path, launch_coord, piece_coord, shortcut,
    shortcut_crosses, shortcut_path, start_cell, HangarZone, Shortcut, CENTER, HOME_FINISH_OFFSET,
    HOME_LENGTH,
};
