//! The turn engine.
//!
//! `GameEngine` owns the game state and is the only thing that changes it.
//! Callers drive it through six actions and a clock:
//!
//! - `start_game`, `roll_dice`, `move_piece`, `skip_turn`, `reset_game`
//! - `set_highlighted_piece` (presentation hint only)
//! - `advance(elapsed_ms)` / `settle()` fire deferred transitions
//!
//! Every action first checks its guards and returns [`ActionRejected`]
//! without touching anything if they fail. Accepted actions build the next
//! [`GameState`] from a clone of the current one and swap it in whole.
//!
//! Transitions whose delay is zero fire before the action returns, so an
//! engine built with [`EngineConfig::instant`] never sits in `Resolving`.

use thiserror::Error;

use crate::core::{
    describe_move, Action, ConfigError, DiceSource, EngineConfig, GameLog, GameRng, GameRngState,
    GameState, GameStatus, MovablePieces, MoveEvents, PieceId, PieceState, Player, PlayerColor,
    PlayerId, RollId, TurnState, PLAYER_ORDER,
};

use super::movement::resolve_move;
use super::schedule::{PendingTransition, Scheduler, TransitionKind};

/// Sixes in a row that trigger the penalty.
pub const PENALTY_SIXES: u8 = 3;

/// Log text for the triple-six penalty.
pub const PENALTY_TEXT: &str =
    "Three consecutive 6s! Engines overheated! Pieces returned to hangar.";

/// Log text for a skipped turn.
pub const SKIPPED_TEXT: &str = "Skipped.";

/// Log text for a skipped 6, which keeps the turn.
pub const SKIPPED_SIX_TEXT: &str = "No moves, but rolled 6! Roll again.";

/// Why an action was refused. State is unchanged whenever one is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRejected {
    #[error("no game is being played")]
    NotPlaying,
    #[error("a game has already started; reset it first")]
    AlreadyStarted,
    #[error("{action} is not accepted while the turn is {state:?}")]
    WrongTurnState { action: &'static str, state: TurnState },
    #[error("there is no roll to spend")]
    NoActiveRoll,
    #[error("no piece {0}")]
    UnknownPiece(PieceId),
    #[error("piece {piece} cannot move with a {roll}")]
    IllegalMove { piece: PieceId, roll: u8 },
    #[error("a game needs 2 to 4 distinct colors")]
    InvalidColors,
}

/// Game engine over a dice source.
#[derive(Clone, Debug)]
pub struct GameEngine<D: DiceSource = GameRng> {
    config: EngineConfig,
    state: GameState,
    dice: D,
    scheduler: Scheduler,
    clock_ms: u64,
}

impl GameEngine<GameRng> {
    /// Create an engine rolling seeded dice, or entropy-seeded dice when the
    /// config has no seed.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let dice = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self::with_dice(config, dice)
    }

    /// Like [`GameEngine::new`], but rejects a config `validate` refuses.
    ///
    /// `new` and `with_dice` take the config as given; use this for configs
    /// built from outside input rather than `from_toml` or `load`.
    pub fn try_new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Continue a saved game with the dice where they stood when it was saved.
    #[must_use]
    pub fn resume(config: EngineConfig, state: GameState, dice: &GameRngState) -> Self {
        Self::from_state(config, GameRng::from_state(dice), state)
    }

    /// Dice position to save next to [`GameEngine::state`].
    #[must_use]
    pub fn dice_state(&self) -> GameRngState {
        self.dice.state()
    }
}

impl Default for GameEngine<GameRng> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<D: DiceSource> GameEngine<D> {
    /// Create an engine rolling the given dice.
    pub fn with_dice(config: EngineConfig, dice: D) -> Self {
        Self::from_state(config, dice, GameState::setup())
    }

    /// Create an engine that continues from an existing state.
    pub fn from_state(config: EngineConfig, dice: D, state: GameState) -> Self {
        Self {
            config,
            state,
            dice,
            scheduler: Scheduler::new(),
            clock_ms: 0,
        }
    }

    // === Actions ===

    /// Seat the given colors and start a game.
    ///
    /// Seats follow the fixed color order regardless of the order given.
    pub fn start_game(&mut self, colors: &[PlayerColor]) -> Result<(), ActionRejected> {
        if self.state.status != GameStatus::Setup {
            return Err(ActionRejected::AlreadyStarted);
        }

        let seated: smallvec::SmallVec<[PlayerColor; 4]> = PLAYER_ORDER
            .iter()
            .copied()
            .filter(|c| colors.contains(c))
            .collect();

        let distinct = seated.len() == colors.len();
        if !distinct || !(2..=4).contains(&seated.len()) {
            return Err(ActionRejected::InvalidColors);
        }

        self.scheduler.cancel_all();

        let mut next = GameState::playing(&seated);
        next.roll_id = self.state.roll_id;
        next.stamp();
        next.record_action(None, Action::StartGame { colors: seated });

        self.state = next;
        Ok(())
    }

    /// Roll the die for the current player. Returns the value rolled.
    pub fn roll_dice(&mut self) -> Result<u8, ActionRejected> {
        self.expect_turn("roll", TurnState::Rolling)?;

        let roll = self.dice.roll();
        let mut next = self.state.clone();
        let (player_id, name, color) = match next.current() {
            Some(p) => (p.id, p.name.clone(), p.color),
            None => return Err(ActionRejected::NotPlaying),
        };

        next.dice_value = Some(roll);
        next.stamp();
        next.record_action(Some(player_id), Action::RollDice { value: roll });

        if roll == 6 {
            next.consecutive_sixes += 1;

            if next.consecutive_sixes >= PENALTY_SIXES {
                apply_penalty(&mut next, player_id);
                next.log.push(PENALTY_TEXT, color);
                next.turn_state = TurnState::Resolving;

                let delay = self.config.penalty_delay_ms;
                self.state = next;
                self.defer_now(TransitionKind::PenaltyRecovery, delay);
                return Ok(roll);
            }

            next.log.push(
                format!("{name} rolled a 6! (Streak: {})", next.consecutive_sixes),
                color,
            );
        } else {
            next.log.push(format!("{name} rolled {roll}"), color);
        }

        let can_move = next.current().is_some_and(|p| p.can_move(roll));
        if can_move {
            next.turn_state = TurnState::Moving;
            self.state = next;
        } else {
            next.turn_state = TurnState::Resolving;
            let delay = self.config.no_move_delay_ms;
            self.state = next;
            self.defer_now(TransitionKind::AutoSkip, delay);
        }

        Ok(roll)
    }

    /// Spend the current roll on one of the current player's pieces.
    ///
    /// Returns what the move did.
    pub fn move_piece(&mut self, piece: PieceId) -> Result<MoveEvents, ActionRejected> {
        self.expect_turn("move", TurnState::Moving)?;

        let roll = self.state.dice_value.ok_or(ActionRejected::NoActiveRoll)?;
        if !piece.is_valid() {
            return Err(ActionRejected::UnknownPiece(piece));
        }

        let mover = self.state.current_player;
        let resolution = resolve_move(&self.state.players, mover, piece, roll)
            .ok_or(ActionRejected::IllegalMove { piece, roll })?;

        let mut next = self.state.clone();
        next.players = resolution.players;
        next.dice_value = None;
        next.stamp();

        let (player_id, color, won) = match next.current() {
            Some(p) => (p.id, p.color, p.has_won()),
            None => return Err(ActionRejected::NotPlaying),
        };
        next.record_action(Some(player_id), Action::MovePiece { piece, roll });

        let mut text = describe_move(&resolution.events);

        if won {
            next.log.push(text, color);
            next.winner.get_or_insert(player_id);
            next.status = GameStatus::Finished;
            next.turn_state = TurnState::Finished;
            self.scheduler.cancel_all();
            self.state = next;
        } else if roll == 6 {
            if !next.moved_piece_ids.contains(&piece) {
                next.moved_piece_ids.push(piece);
            }
            text.push_str(" Bonus Roll!");
            next.log.push(text, color);
            next.turn_state = TurnState::Resolving;

            let delay = self.config.bonus_settle_delay_ms;
            self.state = next;
            self.defer_now(TransitionKind::BonusRoll, delay);
        } else {
            next.log.push(text, color);
            next.reset_streak();
            next.highlighted_piece = None;
            next.turn_state = TurnState::Resolving;

            let delay = self.config.turn_advance_delay_ms;
            self.state = next;
            self.defer_now(TransitionKind::AdvanceTurn, delay);
        }

        Ok(resolution.events)
    }

    /// Pass instead of moving.
    ///
    /// A skipped 6 keeps the turn; anything else hands it on.
    pub fn skip_turn(&mut self) -> Result<(), ActionRejected> {
        self.expect_turn("skip", TurnState::Moving)?;
        self.apply_skip(false, self.clock_ms);
        self.fire_due();
        Ok(())
    }

    /// Drop the current game and return to setup.
    ///
    /// Pending transitions are cancelled and the roll stamp moves on, so
    /// nothing scheduled for the old game can touch the new one.
    pub fn reset_game(&mut self) {
        self.scheduler.cancel_all();

        let mut next = GameState::setup();
        next.roll_id = self.state.roll_id;
        next.stamp();
        self.state = next;
    }

    /// Point the presentation layer at a piece. No gameplay effect.
    pub fn set_highlighted_piece(&mut self, piece: Option<PieceId>) {
        self.state.highlighted_piece = piece;
    }

    // === Clock ===

    /// Move the clock forward and fire every transition now due.
    ///
    /// Returns how many transitions were applied (stale ones are dropped
    /// without counting).
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        self.clock_ms = self.clock_ms.saturating_add(elapsed_ms);
        self.fire_due()
    }

    /// Fire every pending transition, jumping the clock to each due time.
    pub fn settle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(due) = self.scheduler.next_due() {
            self.clock_ms = self.clock_ms.max(due);
            fired += self.fire_due();
        }
        fired
    }

    // === Reads ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    #[must_use]
    pub fn players(&self) -> &im::Vector<Player> {
        &self.state.players
    }

    /// Index of the player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> usize {
        self.state.current_player
    }

    #[must_use]
    pub fn dice_value(&self) -> Option<u8> {
        self.state.dice_value
    }

    #[must_use]
    pub fn turn_state(&self) -> TurnState {
        self.state.turn_state
    }

    #[must_use]
    pub fn log(&self) -> &GameLog {
        &self.state.log
    }

    #[must_use]
    pub fn highlighted_piece(&self) -> Option<PieceId> {
        self.state.highlighted_piece
    }

    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        self.state.winner.and_then(|id| self.state.player(id))
    }

    #[must_use]
    pub fn roll_id(&self) -> RollId {
        self.state.roll_id
    }

    /// Pieces the current roll may move. Empty unless a move is awaited.
    #[must_use]
    pub fn movable_pieces(&self) -> MovablePieces {
        match (self.state.turn_state, self.state.dice_value, self.state.current()) {
            (TurnState::Moving, Some(roll), Some(player)) => player.movable_pieces(roll),
            _ => MovablePieces::new(),
        }
    }

    #[must_use]
    pub fn pending_transitions(&self) -> &[PendingTransition] {
        self.scheduler.pending()
    }

    /// Simulated time in milliseconds.
    #[must_use]
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    #[must_use]
    pub fn dice(&self) -> &D {
        &self.dice
    }

    pub fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    // === Internals ===

    fn expect_turn(&self, action: &'static str, wanted: TurnState) -> Result<(), ActionRejected> {
        if self.state.status != GameStatus::Playing {
            return Err(ActionRejected::NotPlaying);
        }
        if self.state.turn_state != wanted {
            return Err(ActionRejected::WrongTurnState {
                action,
                state: self.state.turn_state,
            });
        }
        Ok(())
    }

    /// Schedule `kind` under the current stamp, `delay_ms` after `base_ms`.
    fn defer(&mut self, kind: TransitionKind, base_ms: u64, delay_ms: u64) {
        let due = base_ms.saturating_add(delay_ms);
        self.scheduler.schedule(kind, self.state.roll_id, due);
    }

    /// Schedule `kind` from the current clock and fire it at once if due.
    fn defer_now(&mut self, kind: TransitionKind, delay_ms: u64) {
        self.defer(kind, self.clock_ms, delay_ms);
        self.fire_due();
    }

    /// Fire everything due, including transitions scheduled by the ones
    /// fired, until nothing due remains.
    fn fire_due(&mut self) -> usize {
        let mut fired = 0;
        loop {
            let due = self.scheduler.drain_due(self.clock_ms);
            if due.is_empty() {
                break;
            }
            for transition in due {
                if self.fire(transition) {
                    fired += 1;
                }
            }
        }
        fired
    }

    fn fire(&mut self, transition: PendingTransition) -> bool {
        if transition.roll_id != self.state.roll_id
            || self.state.status != GameStatus::Playing
            || self.state.turn_state != TurnState::Resolving
        {
            return false;
        }

        match transition.kind {
            TransitionKind::AutoSkip => self.apply_skip(true, transition.due_ms),
            TransitionKind::PenaltyRecovery | TransitionKind::AdvanceTurn => {
                let mut next = self.state.clone();
                next.current_player = next.next_player_index();
                next.dice_value = None;
                next.reset_streak();
                next.turn_state = TurnState::Rolling;
                next.stamp();
                self.state = next;
            }
            TransitionKind::BonusRoll => {
                let mut next = self.state.clone();
                next.dice_value = None;
                next.turn_state = TurnState::Rolling;
                next.stamp();
                self.state = next;
            }
        }
        true
    }

    /// Log a skip. A non-6 hands the turn on `turn_advance_delay_ms` after
    /// `base_ms`; a transition-driven skip passes its own due time so a long
    /// `advance` does not stretch the hand-off.
    fn apply_skip(&mut self, auto: bool, base_ms: u64) {
        let mut next = self.state.clone();
        let (player_id, color) = match next.current() {
            Some(p) => (p.id, p.color),
            None => return,
        };

        let rolled_six = next.dice_value == Some(6);
        next.dice_value = None;
        next.stamp();
        next.record_action(Some(player_id), Action::SkipTurn { auto });

        if rolled_six {
            next.log.push(SKIPPED_SIX_TEXT, color);
            next.turn_state = TurnState::Rolling;
            self.state = next;
        } else {
            next.log.push(SKIPPED_TEXT, color);
            next.reset_streak();
            next.turn_state = TurnState::Resolving;

            let delay = self.config.turn_advance_delay_ms;
            self.state = next;
            self.defer(TransitionKind::AdvanceTurn, base_ms, delay);
        }
    }
}

/// Send the pieces moved on this turn's sixes back to base. Finished pieces
/// stay finished.
fn apply_penalty(state: &mut GameState, player: PlayerId) {
    let moved = std::mem::take(&mut state.moved_piece_ids);
    if let Some(p) = state.players.get_mut(player.index()) {
        for id in moved {
            if let Some(piece) = p.piece_mut(id) {
                if piece.state != PieceState::Finished {
                    piece.send_to_base();
                }
            }
        }
    }
    state.consecutive_sixes = 0;
}
