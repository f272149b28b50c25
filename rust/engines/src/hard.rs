//! Hard CPU - Minimax with alpha-beta pruning
//!
//! Algorithm Details:
//! - Every candidate (slot, square) is simulated on a copy of the game
//! - The resulting position is searched with minimax + alpha-beta to a fixed
//!   depth (5 plies including the candidate itself by default)
//! - Leaves are scored by [`crate::evaluation::evaluate`] from the CPU's side
//! - A side with no candidates passes, which costs a ply like a move
//! - On top of the search score, piece types are nudged:
//!   1. butter is punished on squares that are good for whoever receives it
//!      and rewarded on squares that are poison for them
//!   2. cat is rewarded in proportion to the square's static value
//!   3. buttercat gets a flat bonus
//!   4. any special is discouraged while fewer than 20 pieces are down
//!
//! Slots holding the same type lead to the same position, so candidates are
//! collapsed by (type, square) before searching.

use tracing::{debug, info};

use butter_othello::{Color, Game, PieceType};

use crate::evaluation::{evaluate, position_value};
use crate::strategy::{all_valid_moves, CpuMove, CpuStrategy};

pub const DEFAULT_DEPTH: u32 = 5;

/// Below this many black and white pieces specials are held back
const SPECIAL_HOARD_PIECES: usize = 20;

const NEG_INFINITY: i32 = i32::MIN + 1;
const POS_INFINITY: i32 = i32::MAX;

#[derive(Debug, Clone)]
pub struct HardStrategy {
    depth: u32,
}

impl HardStrategy {
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_DEPTH)
    }

    /// Search `depth` plies, counting the candidate move itself
    pub fn with_depth(depth: u32) -> Self {
        HardStrategy { depth: depth.max(1) }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Score adjustment for playing `kind` at `position`
    fn piece_adjustment(
        kind: PieceType,
        position: butter_othello::Position,
        pieces: usize,
    ) -> i32 {
        let value = position_value(position);
        let mut adjustment = match kind {
            PieceType::Normal => 0,
            PieceType::Butter => {
                if value < -10 {
                    30
                } else if value > 50 {
                    -100
                } else {
                    -15
                }
            }
            PieceType::Cat => {
                if value > 50 {
                    40
                } else if value > 0 {
                    20
                } else {
                    10
                }
            }
            PieceType::ButterCat => 15,
        };

        if kind.is_special() && pieces < SPECIAL_HOARD_PIECES {
            adjustment -= 10;
        }
        adjustment
    }
}

impl Default for HardStrategy {
    fn default() -> Self {
        Self::new()
    }
}

/// Candidates with duplicate (type, square) pairs removed, first slot kept
fn distinct_moves(game: &Game) -> Vec<(CpuMove, PieceType)> {
    let hand = game.hand(game.current_turn());
    let mut seen = Vec::new();
    let mut moves = Vec::new();

    for candidate in all_valid_moves(game) {
        let Some(slot) = hand.slot(candidate.slot) else { continue };
        let key = (slot.kind, candidate.position);
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        moves.push((candidate, slot.kind));
    }

    moves
}

/// Copy of `game` with `candidate` played, or `None` if it was refused
fn play(game: &Game, candidate: CpuMove) -> Option<Game> {
    let mut next = game.clone();
    next.select_piece(candidate.slot.value()).ok()?;
    next.place(candidate.position, game.current_turn())?;
    Some(next)
}

/// Minimax with alpha-beta pruning, scored for `cpu`.
///
/// Alpha is the best score the maximizing side (the CPU) can already force,
/// beta the best the minimizing side can force; once they cross the rest of
/// the node is cut. A side that cannot get any candidate accepted passes.
pub fn minimax(
    game: &Game,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    cpu: Color,
) -> i32 {
    if depth == 0 || game.is_game_over() {
        return evaluate(game, cpu);
    }

    let mut best = if maximizing { NEG_INFINITY } else { POS_INFINITY };
    let mut played = false;

    for (candidate, _) in distinct_moves(game) {
        // a refused simulation is simply skipped
        let Some(next) = play(game, candidate) else { continue };
        played = true;
        let score = minimax(&next, depth - 1, alpha, beta, !maximizing, cpu);
        if maximizing {
            best = best.max(score);
            alpha = alpha.max(score);
        } else {
            best = best.min(score);
            beta = beta.min(score);
        }
        if beta <= alpha {
            break;
        }
    }

    if !played {
        let mut passed = game.clone();
        passed.pass();
        return minimax(&passed, depth - 1, alpha, beta, !maximizing, cpu);
    }
    best
}

/// Pieces held by either color; buttercats are neutral and left out
fn colored_pieces(game: &Game) -> usize {
    game.piece_count(Color::Black) + game.piece_count(Color::White)
}

impl CpuStrategy for HardStrategy {
    fn decide_move(&mut self, game: &Game) -> Option<CpuMove> {
        let cpu = game.current_turn();
        let pieces = colored_pieces(game);
        let mut best: Option<(CpuMove, i32)> = None;

        for (candidate, kind) in distinct_moves(game) {
            let Some(next) = play(game, candidate) else { continue };

            let score = minimax(&next, self.depth - 1, NEG_INFINITY, POS_INFINITY, false, cpu);
            let adjustment = Self::piece_adjustment(kind, candidate.position, pieces);
            let adjusted = score.saturating_add(adjustment);
            debug!(
                slot = %candidate.slot,
                ?kind,
                position = %candidate.position,
                score,
                adjusted,
                "scored candidate"
            );

            if best.map_or(true, |(_, top)| adjusted > top) {
                best = Some((candidate, adjusted));
            }
        }

        let (chosen, score) = best?;
        info!(slot = %chosen.slot, position = %chosen.position, score, "hard cpu move");
        Some(chosen)
    }

    fn name(&self) -> &'static str {
        "hard"
    }
}
