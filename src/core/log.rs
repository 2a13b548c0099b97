//! The game log and structured move events.
//!
//! ## GameLog
//!
//! Append-only audit trail: one human-readable entry per accepted action,
//! including skips and penalties. Stored in an `im::Vector` so snapshots
//! share the log instead of copying it. Readers usually want newest first.
//!
//! ## MoveEvent
//!
//! What a single move did, in order: launches, captures, jumps, shortcuts,
//! home-stretch entries, bounces. Log text for a move is rendered from its
//! events; a presentation layer can consume the events directly to decide
//! what to animate.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::PlayerColor;
use super::piece::PieceId;

/// Log text written when a game starts.
pub const GAME_STARTED: &str = "Mission Started!";

/// One line of the game log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Sequence number. The opening entry is 0.
    pub turn: u32,
    pub text: String,
    /// Color of the player the entry is about.
    pub color: PlayerColor,
}

/// Append-only game log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLog {
    /// Oldest first.
    entries: Vector<LogEntry>,
}

impl GameLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a log with the opening entry (turn 0).
    #[must_use]
    pub fn opened_by(color: PlayerColor) -> Self {
        let mut log = Self::new();
        log.entries.push_back(LogEntry {
            turn: 0,
            text: GAME_STARTED.to_string(),
            color,
        });
        log
    }

    /// Append an entry, numbered one past the current length.
    pub fn push(&mut self, text: impl Into<String>, color: PlayerColor) -> u32 {
        let turn = self.entries.len() as u32 + 1;
        self.entries.push_back(LogEntry {
            turn,
            text: text.into(),
            color,
        });
        turn
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry.
    #[must_use]
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Entries, newest first.
    pub fn newest_first(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev()
    }

    /// Entries, oldest first.
    pub fn oldest_first(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }
}

/// Something that happened during a single move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MoveEvent {
    /// A base piece moved onto its launch pad.
    Launched,
    /// A launched piece entered the track at `cell`.
    Entered { cell: u8 },
    /// An active piece moved `steps` along the track to `to`.
    Moved { steps: u8, to: u8 },
    /// An opposing active piece on `cell` was sent back to base.
    Captured { victim: PlayerColor, piece: PieceId, cell: u8 },
    /// Same-color jump forward to `to`. `on_launch` when taken straight
    /// off the launch pad.
    Jumped { to: u8, on_launch: bool },
    /// Shortcut flight to `to`. `chained` when reached through a jump.
    Shortcut { to: u8, chained: bool },
    /// An opposing home-stretch piece under the flight path was sent back to base.
    Crashed { victim: PlayerColor, piece: PieceId },
    /// Stopped exactly on the gateway cell.
    ReachedGateway,
    /// Left the track into the home stretch at `offset`.
    EnteredHome { offset: u8 },
    /// Advanced within the home stretch to `offset`.
    AdvancedHome { offset: u8 },
    /// Overshot the centre and reflected back to `offset`.
    Bounced { offset: u8, from_track: bool },
    /// Reached the centre.
    Finished { from_track: bool },
}

/// Events of one move. Rarely more than a handful.
pub type MoveEvents = SmallVec<[MoveEvent; 6]>;

impl MoveEvent {
    /// Log fragment for this event.
    #[must_use]
    pub fn describe(&self) -> String {
        match *self {
            MoveEvent::Launched => "Ready to Launch!".to_string(),
            MoveEvent::Entered { .. } => "Launched to Track!".to_string(),
            MoveEvent::Moved { steps, .. } => format!("Moved {steps}."),
            MoveEvent::Captured { victim, .. } => format!(" Hit & Captured {victim}!"),
            MoveEvent::Jumped { on_launch: true, .. } => " + Jump!".to_string(),
            MoveEvent::Jumped { on_launch: false, .. } => " Jumped +4!".to_string(),
            MoveEvent::Shortcut { chained: false, .. } => " SHORTCUT!".to_string(),
            MoveEvent::Shortcut { chained: true, .. } => " + SHORTCUT!".to_string(),
            MoveEvent::Crashed { victim, .. } => format!(" Crashed {victim}!"),
            MoveEvent::ReachedGateway => " (Ready for Home)".to_string(),
            MoveEvent::EnteredHome { offset } => with_last_step("Entered Final Stretch!", offset),
            MoveEvent::AdvancedHome { offset } => with_last_step("Approaching center...", offset),
            MoveEvent::Bounced { from_track: true, .. } => "Overshot & Bounced!".to_string(),
            MoveEvent::Bounced { from_track: false, .. } => "Bounced back!".to_string(),
            MoveEvent::Finished { from_track: true } => {
                "Direct Hit! Mission Accomplished!".to_string()
            }
            MoveEvent::Finished { from_track: false } => "Docked at Center!".to_string(),
        }
    }

    /// Whether this event sent an opposing piece back to base.
    #[must_use]
    pub const fn is_capture(&self) -> bool {
        matches!(self, MoveEvent::Captured { .. } | MoveEvent::Crashed { .. })
    }
}

fn with_last_step(text: &str, offset: u8) -> String {
    // Offset 4 is the last slot before the centre.
    if offset == 4 {
        format!("{text} 1 step to win!")
    } else {
        text.to_string()
    }
}

/// Render the log line for a whole move.
///
/// A capture straight after a launch-pad jump reads "after jump".
#[must_use]
pub fn describe_move(events: &[MoveEvent]) -> String {
    let mut text = String::new();
    let mut after_launch_jump = false;

    for event in events {
        match *event {
            MoveEvent::Captured { victim, .. } if after_launch_jump => {
                text.push_str(&format!(" Hit & Captured {victim} after jump!"));
            }
            _ => {
                after_launch_jump = matches!(event, MoveEvent::Jumped { on_launch: true, .. });
                text.push_str(&event.describe());
            }
        }
    }
    text
}
