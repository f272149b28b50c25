//! Easy CPU - randomized play with a couple of piece-saving habits
//!
//! - Uses any slot before a cat, so the uncapturable-by-color piece is kept
//! - When a cat does get played, keeps it off the corners (already safe
//!   squares) if anything else is available
//! - Otherwise picks uniformly among the squares that actually accept the
//!   piece

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

use butter_othello::{Game, HandSlot, PieceType, Position};

use crate::strategy::{CpuMove, CpuStrategy};

#[derive(Debug)]
pub struct EasyStrategy {
    rng: StdRng,
}

impl EasyStrategy {
    pub fn new() -> Self {
        EasyStrategy {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        EasyStrategy {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Squares where `slot` really lands, in board order
    fn squares_for(game: &Game, slot: &HandSlot) -> Vec<Position> {
        let color = game.current_turn();
        let mut selected = game.clone();
        if selected.select_piece(slot.id.value()).is_err() {
            return Vec::new();
        }
        selected
            .valid_moves(color)
            .into_iter()
            .filter(|&pos| selected.clone().place(pos, color).is_some())
            .collect()
    }
}

impl Default for EasyStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuStrategy for EasyStrategy {
    fn decide_move(&mut self, game: &Game) -> Option<CpuMove> {
        let hand = game.hand(game.current_turn());
        let mut slots: Vec<&HandSlot> = hand.available().collect();
        // stable sort: non-cat slots first, hand order otherwise
        slots.sort_by_key(|slot| slot.kind == PieceType::Cat);

        for slot in slots {
            let mut squares = Self::squares_for(game, slot);
            if squares.is_empty() {
                continue;
            }
            if slot.kind == PieceType::Cat {
                let off_corner: Vec<Position> =
                    squares.iter().copied().filter(|pos| !pos.is_corner()).collect();
                if !off_corner.is_empty() {
                    squares = off_corner;
                }
            }

            let position = *squares.choose(&mut self.rng)?;
            info!(slot = %slot.id, kind = ?slot.kind, %position, "easy cpu move");
            return Some(CpuMove { slot: slot.id, position });
        }

        None
    }

    fn name(&self) -> &'static str {
        "easy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use butter_othello::{Board, Color, Hand, Piece, ScriptedSource};

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y).unwrap()
    }

    fn game_with(board: Board, black: [PieceType; 4]) -> Game {
        Game::from_parts(
            board,
            Color::Black,
            Hand::new(Color::Black, black),
            Hand::new(Color::White, [PieceType::Normal; 4]),
            Box::new(ScriptedSource::default()),
        )
    }

    #[test]
    fn test_returns_valid_move_on_initial_board() {
        let game = Game::with_source(Box::new(ScriptedSource::default()));
        let mut cpu = EasyStrategy::seeded(3);
        let chosen = cpu.decide_move(&game).unwrap();

        let mut check = game.clone();
        check.select_piece(chosen.slot.value()).unwrap();
        assert!(check.place(chosen.position, Color::Black).is_some());
    }

    #[test]
    fn test_prefers_non_cat_slot() {
        let game = game_with(
            Board::new(),
            [PieceType::Cat, PieceType::Normal, PieceType::Cat, PieceType::Cat],
        );
        let mut cpu = EasyStrategy::seeded(11);
        for _ in 0..20 {
            assert_eq!(cpu.decide_move(&game).unwrap().slot.value(), 1);
        }
    }

    #[test]
    fn test_cat_avoids_corner_when_possible() {
        // corner (0,0) and edge (3,0) both capture
        let mut board = Board::empty();
        board.set(pos(1, 0), Piece::normal(Color::White));
        board.set(pos(2, 0), Piece::normal(Color::Black));
        board.set(pos(1, 1), Piece::normal(Color::White));
        board.set(pos(1, 2), Piece::normal(Color::Black));
        board.set(pos(4, 0), Piece::normal(Color::White));
        board.set(pos(5, 0), Piece::normal(Color::Black));
        let game = game_with(board, [PieceType::Cat; 4]);
        assert!(game.can_place(pos(0, 0), Color::Black));

        let mut cpu = EasyStrategy::seeded(5);
        for _ in 0..20 {
            assert!(!cpu.decide_move(&game).unwrap().position.is_corner());
        }
    }

    #[test]
    fn test_cat_takes_corner_when_only_option() {
        let mut board = Board::empty();
        board.set(pos(1, 0), Piece::normal(Color::White));
        board.set(pos(2, 0), Piece::normal(Color::Black));
        let game = game_with(board, [PieceType::Cat; 4]);

        let mut cpu = EasyStrategy::seeded(5);
        assert_eq!(cpu.decide_move(&game).unwrap().position, pos(0, 0));
    }

    #[test]
    fn test_no_move_returns_none() {
        let game = game_with(Board::empty(), [PieceType::Normal; 4]);
        assert_eq!(EasyStrategy::seeded(1).decide_move(&game), None);
    }
}
