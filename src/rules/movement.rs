//! Movement and collision resolution for a single piece.
//!
//! [`resolve_move`] is a pure function: it takes the current players and
//! returns the players after the move plus the ordered events the move
//! produced. It never touches turn order; the engine decides what happens
//! next.
//!
//! ## Rules
//!
//! - Base -> Launched on a 6.
//! - Launched -> Active at `start + roll - 1`. Landing on an own-color cell
//!   without capturing jumps 4 further.
//! - Active moves forward. Within reach of the gateway it lands on the
//!   track; an own-color landing without capture either flies the shortcut
//!   (on the entry cell) or jumps 4, and a jump onto the entry cell flies the
//!   shortcut too. Past the gateway the piece enters its home stretch.
//! - Home moves reflect off the centre: exactly 5 finishes, beyond 5 bounces.
//! - Every landing on the track captures opposing active pieces there.
//! - Flying a shortcut also crashes opposing home-stretch pieces under the
//!   flight path.

use im::Vector;

use crate::board::{
    advance, cell_owner, distance, gateway_cell, home_coord, shortcut, shortcut_crosses,
    start_cell, HOME_FINISH_OFFSET, JUMP_DISTANCE,
};
use crate::core::{MoveEvent, MoveEvents, Piece, PieceId, PieceState, Player, PlayerColor};

/// Outcome of a legal move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveResolution {
    /// All players after the move, captures included.
    pub players: Vector<Player>,
    /// The moved piece in its final state.
    pub piece: Piece,
    /// What happened, in order.
    pub events: MoveEvents,
}

impl MoveResolution {
    /// Number of opposing pieces sent back to base.
    #[must_use]
    pub fn captures(&self) -> usize {
        self.events.iter().filter(|e| e.is_capture()).count()
    }
}

/// Where a home-stretch count lands after reflecting off the centre.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HomeLanding {
    Finished,
    Home(u8),
    Bounced(u8),
}

/// Reflect a home-stretch target offset off the finish slot.
///
/// `5` finishes, below 5 stays at the target, above 5 bounces back by the
/// overshoot.
#[must_use]
pub const fn reflect_home(target: u8) -> HomeLanding {
    if target == HOME_FINISH_OFFSET {
        HomeLanding::Finished
    } else if target < HOME_FINISH_OFFSET {
        HomeLanding::Home(target)
    } else {
        HomeLanding::Bounced(HOME_FINISH_OFFSET.saturating_sub(target - HOME_FINISH_OFFSET))
    }
}

/// Apply `roll` to `piece_id` of the player at index `mover`.
///
/// Returns `None` if the move is illegal: unknown player or piece, a roll
/// outside 1-6, a base piece without a 6, or a finished piece.
#[must_use]
pub fn resolve_move(
    players: &Vector<Player>,
    mover: usize,
    piece_id: PieceId,
    roll: u8,
) -> Option<MoveResolution> {
    if !(1..=6).contains(&roll) {
        return None;
    }

    let player = players.get(mover)?;
    let color = player.color;
    let piece = *player.piece(piece_id)?;
    if !piece.is_movable(roll) {
        return None;
    }

    let mut next = players.clone();
    let mut events = MoveEvents::new();

    let state = match piece.state {
        PieceState::Base => {
            events.push(MoveEvent::Launched);
            PieceState::Launched
        }
        PieceState::Launched => {
            let mut cell = advance(start_cell(color), roll - 1);
            events.push(MoveEvent::Entered { cell });

            let captured = capture_at(&mut next, mover, cell, &mut events);
            if !captured && cell_owner(cell) == color {
                cell = advance(cell, JUMP_DISTANCE);
                events.push(MoveEvent::Jumped { to: cell, on_launch: true });
                capture_at(&mut next, mover, cell, &mut events);
            }
            PieceState::Active { cell }
        }
        PieceState::Active { cell } => {
            let gateway = gateway_cell(color);
            let dist = distance(cell, gateway);

            if roll <= dist {
                let landed = move_on_track(&mut next, mover, color, cell, roll, &mut events);
                PieceState::Active { cell: landed }
            } else {
                let steps = roll - dist - 1;
                enter_home(steps, true, &mut events)
            }
        }
        PieceState::Home { offset } => enter_home(offset + roll, false, &mut events),
        // Excluded by is_movable
        PieceState::Finished => return None,
    };

    // Catch-all: an active piece always resolves collisions where it stops.
    if let PieceState::Active { cell } = state {
        capture_at(&mut next, mover, cell, &mut events);
    }

    let moved = Piece::with_state(piece_id, state);
    if let Some(slot) = next.get_mut(mover).and_then(|p| p.piece_mut(piece_id)) {
        *slot = moved;
    }

    Some(MoveResolution {
        players: next,
        piece: moved,
        events,
    })
}

/// Forward move along the track that stays at or before the gateway.
/// Returns the final cell after any jump or shortcut.
fn move_on_track(
    players: &mut Vector<Player>,
    mover: usize,
    color: PlayerColor,
    from: u8,
    roll: u8,
    events: &mut MoveEvents,
) -> u8 {
    let gateway = gateway_cell(color);
    let flight = shortcut(color);

    let mut cell = advance(from, roll);
    events.push(MoveEvent::Moved { steps: roll, to: cell });

    if capture_at(players, mover, cell, events) {
        return cell;
    }

    if cell == gateway {
        events.push(MoveEvent::ReachedGateway);
        return cell;
    }

    if cell_owner(cell) != color {
        return cell;
    }

    if cell == flight.entry {
        return fly_shortcut(players, mover, color, false, events);
    }

    cell = advance(cell, JUMP_DISTANCE);
    events.push(MoveEvent::Jumped { to: cell, on_launch: false });
    capture_at(players, mover, cell, events);

    if cell == flight.entry {
        cell = fly_shortcut(players, mover, color, true, events);
    }

    cell
}

/// Fly `color`'s shortcut: crash opposing home-stretch pieces under the
/// flight path, land on the exit and capture there. Returns the exit cell.
fn fly_shortcut(
    players: &mut Vector<Player>,
    mover: usize,
    color: PlayerColor,
    chained: bool,
    events: &mut MoveEvents,
) -> u8 {
    for idx in 0..players.len() {
        if idx == mover {
            continue;
        }

        let victims: MoveEvents = match players.get(idx) {
            Some(opponent) => opponent
                .pieces
                .iter()
                .filter(|p| {
                    p.state
                        .home_offset()
                        .and_then(|offset| home_coord(opponent.color, offset))
                        .is_some_and(|coord| shortcut_crosses(color, coord))
                })
                .map(|p| MoveEvent::Crashed {
                    victim: opponent.color,
                    piece: p.id,
                })
                .collect(),
            None => continue,
        };

        send_victims_to_base(players, idx, &victims);
        events.extend(victims);
    }

    let exit = shortcut(color).exit;
    events.push(MoveEvent::Shortcut { to: exit, chained });
    capture_at(players, mover, exit, events);
    exit
}

/// Capture every opposing active piece on `cell`. Returns whether any was hit.
fn capture_at(
    players: &mut Vector<Player>,
    mover: usize,
    cell: u8,
    events: &mut MoveEvents,
) -> bool {
    let mut captured = false;

    for idx in 0..players.len() {
        if idx == mover {
            continue;
        }

        let victims: MoveEvents = match players.get(idx) {
            Some(opponent) => opponent
                .pieces
                .iter()
                .filter(|p| p.state.track_cell() == Some(cell))
                .map(|p| MoveEvent::Captured {
                    victim: opponent.color,
                    piece: p.id,
                    cell,
                })
                .collect(),
            None => continue,
        };

        if victims.is_empty() {
            continue;
        }

        send_victims_to_base(players, idx, &victims);
        events.extend(victims);
        captured = true;
    }

    captured
}

fn send_victims_to_base(players: &mut Vector<Player>, idx: usize, victims: &[MoveEvent]) {
    if victims.is_empty() {
        return;
    }

    if let Some(opponent) = players.get_mut(idx) {
        for event in victims {
            if let MoveEvent::Captured { piece, .. } | MoveEvent::Crashed { piece, .. } = *event {
                if let Some(p) = opponent.piece_mut(piece) {
                    p.send_to_base();
                }
            }
        }
    }
}

fn enter_home(target: u8, from_track: bool, events: &mut MoveEvents) -> PieceState {
    match reflect_home(target) {
        HomeLanding::Finished => {
            events.push(MoveEvent::Finished { from_track });
            PieceState::Finished
        }
        HomeLanding::Home(offset) => {
            events.push(if from_track {
                MoveEvent::EnteredHome { offset }
            } else {
                MoveEvent::AdvancedHome { offset }
            });
            PieceState::Home { offset }
        }
        HomeLanding::Bounced(offset) => {
            events.push(MoveEvent::Bounced { offset, from_track });
            PieceState::Home { offset }
        }
    }
}
