//! Command surface for a front end: one game plus the settings and CPU that
//! go with it.
//!
//! Presentation layers call into [`GameSession`] and render the returned
//! [`GameState`]; they never touch the rules directly. The flip lock is
//! started here after every capturing move and released by
//! [`GameSession::end_flipping`] once the animation is done.

use serde::Serialize;
use tracing::{debug, info, warn};

use butter_othello::{Game, GameState, Position, RandomSource};

use crate::config::{GameMode, Settings};
use crate::easy::EasyStrategy;
use crate::error::SessionResult;
use crate::hard::HardStrategy;
use crate::strategy::{all_valid_moves, CpuMove, CpuStrategy};

/// Result of a placement attempt
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOutcome {
    pub success: bool,
    pub flipped: Vec<Position>,
    pub state: GameState,
}

/// What the CPU did on its turn
#[derive(Clone, Debug, PartialEq)]
pub enum CpuAction {
    Placed { chosen: CpuMove, outcome: PlaceOutcome },
    Passed,
}

/// CPU opponent matching `settings`, `None` for two human players
pub fn strategy_for(settings: &Settings) -> Option<Box<dyn CpuStrategy>> {
    match settings.mode {
        GameMode::Pvp => None,
        GameMode::CpuEasy => Some(Box::new(match settings.seed {
            Some(seed) => EasyStrategy::seeded(seed),
            None => EasyStrategy::new(),
        })),
        GameMode::CpuHard => Some(Box::new(HardStrategy::with_depth(settings.search_depth))),
    }
}

fn game_for(settings: &Settings, round: u64) -> Game {
    match settings.seed {
        Some(seed) => Game::with_seed(seed.wrapping_add(round), settings.replenish),
        None => Game::with_source(Box::new(RandomSource::new(settings.replenish))),
    }
}

pub struct GameSession {
    settings: Settings,
    game: Game,
    cpu: Option<Box<dyn CpuStrategy>>,
    /// Games started so far, mixed into the seed so rematches differ
    round: u64,
}

impl GameSession {
    pub fn new(settings: Settings) -> Self {
        GameSession {
            game: game_for(&settings, 0),
            cpu: strategy_for(&settings),
            settings,
            round: 0,
        }
    }

    /// Session around an already prepared game
    pub fn with_game(settings: Settings, game: Game) -> Self {
        GameSession {
            game,
            cpu: strategy_for(&settings),
            settings,
            round: 0,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> GameState {
        GameState::capture(&self.game)
    }

    /// Name of the configured CPU, if any
    pub fn cpu_name(&self) -> Option<&'static str> {
        self.cpu.as_ref().map(|cpu| cpu.name())
    }

    pub fn select_slot(&mut self, slot_id: u8) -> SessionResult<()> {
        self.game.select_piece(slot_id)?;
        Ok(())
    }

    pub fn deselect_slot(&mut self) {
        self.game.deselect_piece();
    }

    /// Place the current selection for the side to move. A successful
    /// capture locks the game until [`Self::end_flipping`].
    pub fn place(&mut self, x: i32, y: i32) -> SessionResult<PlaceOutcome> {
        let pos = Position::new(x, y)?;
        if self.is_cpu_turn() {
            debug!(%pos, "human placement refused on the cpu's turn");
            return Ok(self.outcome(None));
        }
        let result = self.place_for_turn(pos);
        Ok(self.outcome(result))
    }

    fn place_for_turn(&mut self, pos: Position) -> Option<Vec<Position>> {
        let flipped = self.game.place(pos, self.game.current_turn())?;
        if !flipped.is_empty() {
            self.game.start_flipping(&flipped);
        }
        Some(flipped)
    }

    fn outcome(&self, result: Option<Vec<Position>>) -> PlaceOutcome {
        PlaceOutcome {
            success: result.is_some(),
            flipped: result.unwrap_or_default(),
            state: self.state(),
        }
    }

    pub fn end_flipping(&mut self) {
        self.game.end_flipping();
    }

    pub fn pass(&mut self) -> bool {
        self.game.pass()
    }

    /// Throw the current game away and deal a fresh one
    pub fn new_game(&mut self) {
        self.round += 1;
        self.game = game_for(&self.settings, self.round);
        self.cpu = strategy_for(&self.settings);
        info!(round = self.round, mode = ?self.settings.mode, "new game");
    }

    /// The side to move is CPU controlled and the game is still running
    pub fn is_cpu_turn(&self) -> bool {
        self.cpu.is_some()
            && self.settings.is_cpu(self.game.current_turn())
            && !self.game.is_game_over()
    }

    /// Let the CPU play if it is its turn. `Ok(None)` when it is not, or
    /// while the board is locked.
    pub fn cpu_turn(&mut self) -> SessionResult<Option<CpuAction>> {
        if !self.is_cpu_turn() || self.game.is_locked() {
            return Ok(None);
        }
        let Some(cpu) = self.cpu.as_mut() else {
            return Ok(None);
        };

        let color = self.game.current_turn();
        let Some(chosen) = cpu.decide_move(&self.game) else {
            debug!(?color, "cpu has no move, passing");
            self.game.pass();
            return Ok(Some(CpuAction::Passed));
        };

        self.game.select_piece(chosen.slot.value())?;
        match self.place_for_turn(chosen.position) {
            Some(flipped) => Ok(Some(CpuAction::Placed {
                chosen,
                outcome: self.outcome(Some(flipped)),
            })),
            None => {
                warn!(slot = %chosen.slot, position = %chosen.position, "cpu move refused, passing");
                self.game.pass();
                Ok(Some(CpuAction::Passed))
            }
        }
    }

    /// Pass for the side to move when it cannot play anything from its hand
    /// but the game goes on. Returns whether a pass happened.
    pub fn resolve_forced_pass(&mut self) -> bool {
        if self.game.is_locked() || self.game.is_game_over() {
            return false;
        }
        if !all_valid_moves(&self.game).is_empty() {
            return false;
        }
        let color = self.game.current_turn();
        debug!(?color, "forced pass");
        self.game.pass()
    }
}
