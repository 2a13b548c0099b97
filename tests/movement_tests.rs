//! Movement tests through the engine.
//!
//! Captures, jumps, shortcuts with collateral crashes and the home-stretch
//! bounce, plus property tests over random games.

use proptest::prelude::*;

use rust_aeroplane::core::{
    EngineConfig, GameState, MoveEvent, PieceId, PieceState, PlayerColor, ScriptedDice,
};
use rust_aeroplane::rules::{reflect_home, resolve_move, GameEngine, HomeLanding};
use rust_aeroplane::TurnState;

fn ready_to_move(state: GameState, roll: u8) -> GameEngine<ScriptedDice> {
    let mut engine =
        GameEngine::from_state(EngineConfig::instant(), ScriptedDice::new([roll]), state);
    engine.roll_dice().unwrap();
    assert_eq!(engine.turn_state(), TurnState::Moving);
    engine
}

/// Green jumps onto its shortcut, crashes the Yellow piece in the home
/// stretch under the flight path and captures the Yellow piece on the exit.
#[test]
fn test_chained_shortcut_with_collateral_crash() {
    let mut state = GameState::playing(&[PlayerColor::Yellow, PlayerColor::Green]);
    state.current_player = 1;
    state.players[0].pieces[0].state = PieceState::Home { offset: 2 };
    state.players[0].pieces[1].state = PieceState::Active { cell: 3 };
    state.players[0].pieces[2].state = PieceState::Home { offset: 4 };
    state.players[1].pieces[0].state = PieceState::Active { cell: 37 };
    let mut engine = ready_to_move(state, 2);

    let events = engine.move_piece(PieceId::new(0)).unwrap();

    assert_eq!(
        events.as_slice(),
        &[
            MoveEvent::Moved { steps: 2, to: 39 },
            MoveEvent::Jumped { to: 43, on_launch: false },
            MoveEvent::Crashed { victim: PlayerColor::Yellow, piece: PieceId::new(0) },
            MoveEvent::Shortcut { to: 3, chained: true },
            MoveEvent::Captured { victim: PlayerColor::Yellow, piece: PieceId::new(1), cell: 3 },
        ]
    );

    let yellow = &engine.players()[0];
    assert_eq!(yellow.pieces[0].state, PieceState::Base);
    assert_eq!(yellow.pieces[1].state, PieceState::Base);
    assert_eq!(yellow.pieces[2].state, PieceState::Home { offset: 4 });
    assert_eq!(engine.players()[1].pieces[0].state, PieceState::Active { cell: 3 });

    let text = engine
        .log()
        .newest_first()
        .find(|e| e.color == PlayerColor::Green && e.text.starts_with("Moved"))
        .map(|e| e.text.clone());
    assert_eq!(
        text.as_deref(),
        Some("Moved 2. Jumped +4! Crashed Yellow! + SHORTCUT! Hit & Captured Yellow!")
    );
}

fn move_text(engine: &GameEngine<ScriptedDice>, color: PlayerColor) -> Option<String> {
    engine
        .log()
        .newest_first()
        .find(|e| e.color == color && !e.text.contains("rolled"))
        .map(|e| e.text.clone())
}

/// A same-color jump lands on a Red piece, captures it, then carries on
/// into Yellow's shortcut.
#[test]
fn test_capture_after_track_jump_then_shortcut() {
    let mut state = GameState::playing(&[PlayerColor::Yellow, PlayerColor::Red]);
    state.players[0].pieces[0].state = PieceState::Active { cell: 11 };
    state.players[1].pieces[2].state = PieceState::Active { cell: 17 };
    let mut engine = ready_to_move(state, 2);

    let events = engine.move_piece(PieceId::new(0)).unwrap();

    assert_eq!(
        events.as_slice(),
        &[
            MoveEvent::Moved { steps: 2, to: 13 },
            MoveEvent::Jumped { to: 17, on_launch: false },
            MoveEvent::Captured { victim: PlayerColor::Red, piece: PieceId::new(2), cell: 17 },
            MoveEvent::Shortcut { to: 29, chained: true },
        ]
    );
    assert_eq!(engine.players()[0].pieces[0].state, PieceState::Active { cell: 29 });
    assert_eq!(engine.players()[1].pieces[2].state, PieceState::Base);
    assert_eq!(
        move_text(&engine, PlayerColor::Yellow).as_deref(),
        Some("Moved 2. Jumped +4! Hit & Captured Red! + SHORTCUT!")
    );
}

#[test]
fn test_capture_after_track_jump() {
    let mut state = GameState::playing(&[PlayerColor::Yellow, PlayerColor::Red]);
    state.players[0].pieces[0].state = PieceState::Active { cell: 6 };
    state.players[1].pieces[0].state = PieceState::Active { cell: 13 };
    let mut engine = ready_to_move(state, 3);

    let events = engine.move_piece(PieceId::new(0)).unwrap();

    assert_eq!(
        events.as_slice(),
        &[
            MoveEvent::Moved { steps: 3, to: 9 },
            MoveEvent::Jumped { to: 13, on_launch: false },
            MoveEvent::Captured { victim: PlayerColor::Red, piece: PieceId::new(0), cell: 13 },
        ]
    );
    assert_eq!(engine.players()[0].pieces[0].state, PieceState::Active { cell: 13 });
    assert_eq!(engine.players()[1].pieces[0].state, PieceState::Base);
}

#[test]
fn test_capture_after_launch_jump_logged() {
    let mut state = GameState::playing(&[PlayerColor::Yellow, PlayerColor::Red]);
    state.players[0].pieces[0].state = PieceState::Launched;
    state.players[1].pieces[1].state = PieceState::Active { cell: 5 };
    let mut engine = ready_to_move(state, 2);

    engine.move_piece(PieceId::new(0)).unwrap();

    assert_eq!(engine.players()[0].pieces[0].state, PieceState::Active { cell: 5 });
    assert_eq!(engine.players()[1].pieces[1].state, PieceState::Base);
    assert_eq!(
        move_text(&engine, PlayerColor::Yellow).as_deref(),
        Some("Launched to Track! + Jump! Hit & Captured Red after jump!")
    );
}

#[test]
fn test_direct_shortcut_each_color() {
    let cases = [
        (PlayerColor::Yellow, 14, 29),
        (PlayerColor::Red, 27, 42),
        (PlayerColor::Green, 40, 3),
        (PlayerColor::Blue, 1, 16),
    ];

    for (color, from, exit) in cases {
        let mut state = GameState::playing(&[color, other(color)]);
        let mover = state.players.iter().position(|p| p.color == color).unwrap();
        state.players[mover].pieces[0].state = PieceState::Active { cell: from };

        let res = resolve_move(&state.players, mover, PieceId::new(0), 3).unwrap();
        assert_eq!(res.piece.state, PieceState::Active { cell: exit }, "{color}");
        assert!(res
            .events
            .contains(&MoveEvent::Shortcut { to: exit, chained: false }));
    }
}

#[test]
fn test_capture_is_logged_and_sends_to_base() {
    let mut state = GameState::playing(&[PlayerColor::Red, PlayerColor::Blue]);
    state.players[0].pieces[2].state = PieceState::Active { cell: 20 };
    state.players[1].pieces[3].state = PieceState::Active { cell: 25 };
    let mut engine = ready_to_move(state, 5);

    engine.move_piece(PieceId::new(2)).unwrap();

    assert_eq!(engine.players()[1].pieces[3].state, PieceState::Base);
    assert_eq!(engine.players()[1].pieces[3].position(), -1);
    assert!(engine
        .log()
        .newest_first()
        .any(|e| e.text == "Moved 5. Hit & Captured Blue!"));
}

#[test]
fn test_capture_takes_every_stacked_piece() {
    let mut state = GameState::playing(&[PlayerColor::Yellow, PlayerColor::Red, PlayerColor::Blue]);
    state.players[0].pieces[0].state = PieceState::Active { cell: 30 };
    state.players[1].pieces[0].state = PieceState::Active { cell: 34 };
    state.players[1].pieces[1].state = PieceState::Active { cell: 34 };
    state.players[2].pieces[0].state = PieceState::Active { cell: 34 };

    let res = resolve_move(&state.players, 0, PieceId::new(0), 4).unwrap();
    assert_eq!(res.captures(), 3);
    assert_eq!(res.piece.state, PieceState::Active { cell: 34 });
}

#[test]
fn test_gateway_landing_logged() {
    let mut state = GameState::playing(&[PlayerColor::Yellow, PlayerColor::Red]);
    state.players[1].pieces[0].state = PieceState::Active { cell: 6 };
    state.current_player = 1;
    let mut engine = ready_to_move(state, 4);

    engine.move_piece(PieceId::new(0)).unwrap();

    assert_eq!(engine.players()[1].pieces[0].state, PieceState::Active { cell: 10 });
    assert!(engine
        .log()
        .newest_first()
        .any(|e| e.text == "Moved 4. (Ready for Home)"));
}

#[test]
fn test_leave_track_offsets() {
    // One short of the Blue gateway: a 6 spends 1 reaching it, 1 turning
    // in, and lands on offset 4.
    let mut state = GameState::playing(&[PlayerColor::Yellow, PlayerColor::Blue]);
    state.players[1].pieces[0].state = PieceState::Active { cell: 35 };

    let res = resolve_move(&state.players, 1, PieceId::new(0), 6).unwrap();
    assert_eq!(res.piece.state, PieceState::Home { offset: 4 });
    assert_eq!(
        res.events.as_slice(),
        &[MoveEvent::EnteredHome { offset: 4 }]
    );

    // On the gateway with a 6: exactly 5 home steps, a direct finish.
    state.players[1].pieces[0].state = PieceState::Active { cell: 36 };
    let res = resolve_move(&state.players, 1, PieceId::new(0), 6).unwrap();
    assert_eq!(res.piece.state, PieceState::Finished);
}

#[test]
fn test_home_bounce_through_engine() {
    let mut state = GameState::playing(&[PlayerColor::Yellow, PlayerColor::Red]);
    state.players[0].pieces[0].state = PieceState::Home { offset: 3 };
    let mut engine = ready_to_move(state, 4);

    engine.move_piece(PieceId::new(0)).unwrap();

    assert_eq!(engine.players()[0].pieces[0].state, PieceState::Home { offset: 3 });
    assert!(engine.log().newest_first().any(|e| e.text == "Bounced back!"));
}

fn other(color: PlayerColor) -> PlayerColor {
    match color {
        PlayerColor::Yellow => PlayerColor::Red,
        _ => PlayerColor::Yellow,
    }
}

proptest! {
    #[test]
    fn prop_home_moves_reflect(offset in 0u8..5, roll in 1u8..=6) {
        let mut state = GameState::playing(&[PlayerColor::Green, PlayerColor::Blue]);
        state.players[0].pieces[0].state = PieceState::Home { offset };

        let res = resolve_move(&state.players, 0, PieceId::new(0), roll).unwrap();
        let target = offset + roll;

        if target == 5 {
            prop_assert_eq!(res.piece.state, PieceState::Finished);
        } else {
            let expected = 5 - target.abs_diff(5);
            prop_assert_eq!(res.piece.state, PieceState::Home { offset: expected });
        }
    }

    #[test]
    fn prop_reflect_stays_in_stretch(target in 0u8..=10) {
        match reflect_home(target) {
            HomeLanding::Finished => prop_assert_eq!(target, 5),
            HomeLanding::Home(o) | HomeLanding::Bounced(o) => prop_assert!(o < 5),
        }
    }

    #[test]
    fn prop_random_games_keep_invariants(
        seed in any::<u64>(),
        players in 2usize..=4,
        choices in proptest::collection::vec(any::<usize>(), 64..256),
    ) {
        let colors: Vec<_> = PlayerColor::all().take(players).collect();
        let mut engine = GameEngine::new(EngineConfig::instant().with_seed(seed));
        engine.start_game(&colors).unwrap();

        let mut finished: Vec<usize> = vec![0; players];

        for choice in choices {
            match engine.turn_state() {
                TurnState::Rolling => {
                    engine.roll_dice().unwrap();
                }
                TurnState::Moving => {
                    let movable = engine.movable_pieces();
                    prop_assert!(!movable.is_empty());
                    let piece = movable[choice % movable.len()];
                    engine.move_piece(piece).unwrap();
                }
                TurnState::Resolving => prop_assert!(false, "instant engine left resolving"),
                TurnState::Finished => break,
            }

            prop_assert!(engine.state().track_is_consistent());

            for (idx, player) in engine.players().iter().enumerate() {
                for piece in &player.pieces {
                    if let PieceState::Home { offset } = piece.state {
                        prop_assert!(offset < 5);
                    }
                }
                let done = player.pieces.iter().filter(|p| p.state.is_finished()).count();
                prop_assert!(done >= finished[idx]);
                finished[idx] = done;
            }
        }
    }
}
