//! Game aggregate: board, turn, both hands, the single active selection and
//! the flip-animation lock.
//!
//! All mutation goes through `Game`'s methods. Board and hands are plain
//! values, so `clone()` gives a fully independent game that search code can
//! play forward freely.

use serde::Serialize;
use tracing::{debug, trace};

use crate::board::Board;
use crate::error::GameResult;
use crate::hand::{Hand, SlotId};
use crate::piece::{Piece, PieceType};
use crate::position::{Color, Position, DIRECTIONS};
use crate::source::{PieceSource, RandomSource, ReplenishPolicy};

/// Result of a finished game
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Black,
    White,
    Draw,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    current_turn: Color,
    black_hand: Hand,
    white_hand: Hand,
    selection: Option<SlotId>,
    /// Bitmask over board indices of cells mid-flip
    flipping: u64,
    locked: bool,
    source: Box<dyn PieceSource>,
}

impl Game {
    /// New match with hands drawn from an entropy-seeded source
    pub fn new() -> Self {
        Self::with_source(Box::new(RandomSource::default()))
    }

    /// New match whose draws are reproducible from `seed`
    pub fn with_seed(seed: u64, policy: ReplenishPolicy) -> Self {
        Self::with_source(Box::new(RandomSource::seeded(seed, policy)))
    }

    /// New match drawing every piece from `source`, black's hand first
    pub fn with_source(mut source: Box<dyn PieceSource>) -> Self {
        let black_hand = Hand::drawn(Color::Black, source.as_mut());
        let white_hand = Hand::drawn(Color::White, source.as_mut());
        Self::from_parts(Board::new(), Color::Black, black_hand, white_hand, source)
    }

    /// Assemble a game from explicit components
    pub fn from_parts(
        board: Board,
        current_turn: Color,
        black_hand: Hand,
        white_hand: Hand,
        source: Box<dyn PieceSource>,
    ) -> Self {
        Game {
            board,
            current_turn,
            black_hand,
            white_hand,
            selection: None,
            flipping: 0,
            locked: false,
            source,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    pub fn hand(&self, color: Color) -> &Hand {
        match color {
            Color::Black => &self.black_hand,
            Color::White => &self.white_hand,
        }
    }

    fn set_hand(&mut self, hand: Hand) {
        match hand.color() {
            Color::Black => self.black_hand = hand,
            Color::White => self.white_hand = hand,
        }
    }

    /// Select a supply slot. The slot id decides which hand it comes from;
    /// any previous selection, from either player, is replaced. Whether it
    /// is that player's turn is only checked when placing.
    pub fn select_piece(&mut self, slot_id: u8) -> GameResult<()> {
        if self.locked {
            trace!(slot_id, "selection ignored while locked");
            return Ok(());
        }
        let id = SlotId::new(slot_id)?;
        let id = self.hand(id.owner()).select(id)?;
        debug!(slot = %id, owner = ?id.owner(), "selected slot");
        self.selection = Some(id);
        Ok(())
    }

    pub fn deselect_piece(&mut self) {
        if !self.locked {
            self.selection = None;
        }
    }

    /// The single active selection, if any
    pub fn selection(&self) -> Option<SlotId> {
        self.selection
    }

    /// Selected slot if it belongs to `color`'s hand
    pub fn selected_slot(&self, color: Color) -> Option<SlotId> {
        self.selection.filter(|id| id.owner() == color)
    }

    /// Type held by `color`'s selected slot
    pub fn selected_kind(&self, color: Color) -> Option<PieceType> {
        let id = self.selected_slot(color)?;
        self.hand(color).slot(id).map(|slot| slot.kind)
    }

    /// Number of pieces that would be sandwiched by `basis` from `from`
    /// along (dx, dy). Buttercats and empty cells end the scan with nothing.
    fn run_length(&self, from: Position, basis: Color, dx: i8, dy: i8) -> usize {
        let mut count = 0;
        let mut current = from.step(dx, dy);

        while let Some(pos) = current {
            match self.board.get(pos) {
                None => return 0,
                Some(piece) if piece.is_butter_cat() => return 0,
                Some(piece) if piece.color == basis => return count,
                Some(_) => count += 1,
            }
            current = pos.step(dx, dy);
        }

        0
    }

    /// Check if `color` could legally place at `pos`:
    /// 1. The cell is empty
    /// 2. Some direction holds a run of opponent pieces closed by `color`
    pub fn can_place(&self, pos: Position, color: Color) -> bool {
        if self.board.get(pos).is_some() {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&(dx, dy)| self.run_length(pos, color, dx, dy) > 0)
    }

    /// Every square where `can_place` holds, ignoring selection
    pub fn legal_positions(&self, color: Color) -> Vec<Position> {
        Position::all().filter(|&pos| self.can_place(pos, color)).collect()
    }

    fn has_any_move(&self, color: Color) -> bool {
        Position::all().any(|pos| self.can_place(pos, color))
    }

    /// Squares where `color`'s selected piece would be accepted by
    /// [`Self::place`]. Specials skip the central block, and butter is
    /// checked for the color it lands in. With nothing selected this is
    /// every legal square for `color`.
    pub fn valid_moves(&self, color: Color) -> Vec<Position> {
        let kind = self.selected_kind(color);
        let special = kind.is_some_and(|kind| kind.is_special());
        let landing = kind.map_or(color, |kind| kind.landing_color(color));

        Position::all()
            .filter(|pos| !(special && pos.is_central()))
            .filter(|&pos| self.can_place(pos, landing))
            .collect()
    }

    /// Whether the side to move has any legal square at all
    pub fn has_valid_moves(&self) -> bool {
        self.has_any_move(self.current_turn)
    }

    /// Place the selected piece for `color` at `pos`.
    ///
    /// Returns the captured squares (never `pos` itself), or `None` when the
    /// placement is refused: locked, wrong turn, nothing selected, special
    /// piece in the center, or `pos` not legal for the piece's landing color.
    pub fn place(&mut self, pos: Position, color: Color) -> Option<Vec<Position>> {
        if self.locked {
            trace!(%pos, "placement refused while locked");
            return None;
        }
        if color != self.current_turn {
            trace!(%pos, ?color, "placement refused out of turn");
            return None;
        }
        let id = self.selected_slot(color)?;
        let kind = self.hand(color).slot(id)?.kind;
        if kind.is_special() && pos.is_central() {
            trace!(%pos, ?kind, "special piece refused in the center");
            return None;
        }

        let landing = kind.landing_color(color);
        if !self.can_place(pos, landing) {
            trace!(%pos, ?landing, "no capture available");
            return None;
        }

        let current_hand = *self.hand(color);
        let hand = current_hand
            .use_selected(Some(id), self.source.as_mut())
            .ok()?;

        self.board.set(pos, Piece::new(landing, kind));

        let mut flipped = Vec::new();
        if kind != PieceType::ButterCat {
            for (dx, dy) in DIRECTIONS {
                let run = self.run_length(pos, color, dx, dy);
                let mut current = pos;
                for _ in 0..run {
                    let Some(next) = current.step(dx, dy) else { break };
                    current = next;
                    if let Some(piece) = self.board.get(current) {
                        if !piece.kind.resists_flip() {
                            self.board.set(current, Piece::new(color, piece.kind));
                        }
                    }
                    flipped.push(current);
                }
            }
        }

        self.set_hand(hand);
        self.selection = None;
        self.current_turn = color.opposite();

        debug!(%pos, ?color, ?kind, flipped = flipped.len(), "placed piece");
        Some(flipped)
    }

    /// Lock the game while `positions` animate
    pub fn start_flipping(&mut self, positions: &[Position]) {
        self.locked = true;
        self.flipping = positions
            .iter()
            .fold(0, |mask, pos| mask | (1u64 << pos.index()));
    }

    pub fn end_flipping(&mut self) {
        self.locked = false;
        self.flipping = 0;
    }

    pub fn is_flipping(&self, pos: Position) -> bool {
        self.flipping & (1u64 << pos.index()) != 0
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Hand the turn to the opponent, dropping any selection.
    /// Returns `false` and does nothing while locked.
    pub fn pass(&mut self) -> bool {
        if self.locked {
            trace!("pass refused while locked");
            return false;
        }
        self.selection = None;
        self.current_turn = self.current_turn.opposite();
        debug!(turn = ?self.current_turn, "turn passed");
        true
    }

    /// Neither the side to move nor, after it, the opponent has a legal square
    pub fn is_game_over(&self) -> bool {
        if self.has_any_move(self.current_turn) {
            return false;
        }
        !self.has_any_move(self.current_turn.opposite())
    }

    /// Pieces on the board belonging to `color`
    pub fn piece_count(&self, color: Color) -> usize {
        self.board.count(color)
    }

    /// Outcome by piece count, or `None` while the game is still running
    pub fn winner(&self) -> Option<Winner> {
        if !self.is_game_over() {
            return None;
        }
        let black = self.piece_count(Color::Black);
        let white = self.piece_count(Color::White);
        Some(match black.cmp(&white) {
            std::cmp::Ordering::Greater => Winner::Black,
            std::cmp::Ordering::Less => Winner::White,
            std::cmp::Ordering::Equal => Winner::Draw,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::source::ScriptedSource;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y).unwrap()
    }

    fn normal_game() -> Game {
        Game::with_source(Box::new(ScriptedSource::default()))
    }

    /// Game over `board` with black to move and the given hands
    fn game_with(board: Board, black: [PieceType; 4], white: [PieceType; 4]) -> Game {
        Game::from_parts(
            board,
            Color::Black,
            Hand::new(Color::Black, black),
            Hand::new(Color::White, white),
            Box::new(ScriptedSource::default()),
        )
    }

    #[test]
    fn test_initial_state() {
        let game = normal_game();
        assert_eq!(game.current_turn(), Color::Black);
        assert_eq!(game.piece_count(Color::Black), 2);
        assert_eq!(game.piece_count(Color::White), 2);
        assert_eq!(game.selection(), None);
        assert!(!game.is_locked());
        assert!(!game.is_game_over());
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_valid_moves_initial_board() {
        let game = normal_game();
        let moves = game.valid_moves(Color::Black);
        assert_eq!(moves.len(), 4);
        for expected in [pos(3, 2), pos(2, 3), pos(5, 4), pos(4, 5)] {
            assert!(moves.contains(&expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_place_normal_flips_sandwiched_piece() {
        let mut game = normal_game();
        game.select_piece(0).unwrap();

        let flipped = game.place(pos(2, 3), Color::Black).unwrap();

        assert_eq!(flipped, vec![pos(3, 3)]);
        assert_eq!(game.board().get(pos(3, 3)), Some(Piece::normal(Color::Black)));
        assert_eq!(game.board().get(pos(2, 3)), Some(Piece::normal(Color::Black)));
        assert_eq!(game.piece_count(Color::Black), 4);
        assert_eq!(game.piece_count(Color::White), 1);
        assert_eq!(game.current_turn(), Color::White);
        assert_eq!(game.selection(), None);
    }

    #[test]
    fn test_place_refusals() {
        let mut game = normal_game();

        // nothing selected
        assert_eq!(game.place(pos(2, 3), Color::Black), None);

        // wrong turn
        game.select_piece(4).unwrap();
        assert_eq!(game.place(pos(2, 4), Color::White), None);

        // selection belongs to the other player
        assert_eq!(game.place(pos(2, 3), Color::Black), None);

        // illegal square
        game.select_piece(0).unwrap();
        assert_eq!(game.place(pos(0, 0), Color::Black), None);

        // locked
        game.start_flipping(&[pos(3, 3)]);
        assert_eq!(game.place(pos(2, 3), Color::Black), None);
        game.end_flipping();
        assert!(game.place(pos(2, 3), Color::Black).is_some());
    }

    #[test]
    fn test_selection_is_global() {
        let mut game = normal_game();
        game.select_piece(1).unwrap();
        game.select_piece(6).unwrap();
        assert_eq!(game.selected_slot(Color::Black), None);
        assert_eq!(game.selected_slot(Color::White), Some(SlotId::new(6).unwrap()));
        game.deselect_piece();
        assert_eq!(game.selection(), None);
    }

    #[test]
    fn test_select_errors() {
        let mut game = normal_game();
        assert_eq!(game.select_piece(9).unwrap_err(), GameError::UnknownSlot(9));

        let black = Hand::new(Color::Black, [PieceType::Normal; 4])
            .mark_used(SlotId::new(3).unwrap())
            .unwrap();
        let mut game = Game::from_parts(
            Board::new(),
            Color::Black,
            black,
            Hand::new(Color::White, [PieceType::Normal; 4]),
            Box::new(ScriptedSource::default()),
        );
        assert_eq!(game.select_piece(3).unwrap_err(), GameError::SlotUsed(3));
    }

    #[test]
    fn test_selection_ignored_while_locked() {
        let mut game = normal_game();
        game.start_flipping(&[]);
        game.select_piece(0).unwrap();
        assert_eq!(game.selection(), None);
    }

    #[test]
    fn test_special_selection_excludes_center() {
        let mut game = game_with(
            Board::new(),
            [PieceType::Cat, PieceType::Normal, PieceType::Normal, PieceType::Normal],
            [PieceType::Normal; 4],
        );
        game.select_piece(0).unwrap();
        // all four opening moves are central
        assert!(game.valid_moves(Color::Black).is_empty());
        assert_eq!(game.place(pos(2, 3), Color::Black), None);

        game.select_piece(1).unwrap();
        assert_eq!(game.valid_moves(Color::Black).len(), 4);
    }

    /// Black at (0,0), white run (1,0)-(2,0), empty (3,0)
    fn edge_board() -> Board {
        let mut board = Board::empty();
        board.set(pos(0, 0), Piece::normal(Color::Black));
        board.set(pos(1, 0), Piece::normal(Color::White));
        board.set(pos(2, 0), Piece::normal(Color::White));
        board
    }

    #[test]
    fn test_cat_lands_in_own_color_and_captures() {
        let mut game = game_with(
            edge_board(),
            [PieceType::Cat, PieceType::Normal, PieceType::Normal, PieceType::Normal],
            [PieceType::Normal; 4],
        );
        game.select_piece(0).unwrap();
        let flipped = game.place(pos(3, 0), Color::Black).unwrap();

        assert_eq!(flipped, vec![pos(2, 0), pos(1, 0)]);
        assert_eq!(game.board().get(pos(3, 0)), Some(Piece::new(Color::Black, PieceType::Cat)));
        assert_eq!(game.board().get(pos(1, 0)), Some(Piece::normal(Color::Black)));
    }

    #[test]
    fn test_cat_and_butter_cells_spin_back_when_captured() {
        let mut board = edge_board();
        board.set(pos(1, 0), Piece::new(Color::White, PieceType::Cat));
        board.set(pos(2, 0), Piece::new(Color::White, PieceType::Butter));
        let mut game = game_with(board, [PieceType::Normal; 4], [PieceType::Normal; 4]);

        game.select_piece(0).unwrap();
        let flipped = game.place(pos(3, 0), Color::Black).unwrap();

        assert_eq!(flipped.len(), 2);
        assert_eq!(game.board().get(pos(1, 0)), Some(Piece::new(Color::White, PieceType::Cat)));
        assert_eq!(game.board().get(pos(2, 0)), Some(Piece::new(Color::White, PieceType::Butter)));
    }

    #[test]
    fn test_butter_cat_blocks_scan() {
        let mut board = edge_board();
        board.set(pos(1, 0), Piece::new(Color::White, PieceType::ButterCat));
        let game = game_with(board, [PieceType::Normal; 4], [PieceType::Normal; 4]);
        assert!(!game.can_place(pos(3, 0), Color::Black));
    }

    #[test]
    fn test_butter_cat_refused_in_center() {
        // white to move; (2,2) captures (3,3) toward (4,4)
        let mut board = Board::new();
        board.set(pos(3, 3), Piece::normal(Color::Black));
        let mut game = Game::from_parts(
            board,
            Color::White,
            Hand::new(Color::Black, [PieceType::Normal; 4]),
            Hand::new(Color::White, [PieceType::ButterCat; 4]),
            Box::new(ScriptedSource::default()),
        );
        let target = pos(2, 2);
        assert!(game.can_place(target, Color::White));

        game.select_piece(4).unwrap();
        assert!(!game.valid_moves(Color::White).contains(&target));
        assert_eq!(game.place(target, Color::White), None);
        assert_eq!(*game.board(), board);
        assert_eq!(game.current_turn(), Color::White);
    }

    #[test]
    fn test_butter_cat_edge_placement() {
        let mut game = game_with(
            edge_board(),
            [PieceType::ButterCat, PieceType::Normal, PieceType::Normal, PieceType::Normal],
            [PieceType::Normal; 4],
        );
        game.select_piece(0).unwrap();
        let flipped = game.place(pos(3, 0), Color::Black).unwrap();

        assert!(flipped.is_empty());
        assert_eq!(
            game.board().get(pos(3, 0)),
            Some(Piece::new(Color::Black, PieceType::ButterCat))
        );
        assert_eq!(game.board().get(pos(1, 0)), Some(Piece::normal(Color::White)));
        assert_eq!(game.current_turn(), Color::White);
        // the slot was refilled from the script (normal once exhausted)
        assert_eq!(game.hand(Color::Black).slots()[0].kind, PieceType::Normal);
    }

    #[test]
    fn test_butter_lands_in_opponent_color() {
        // white (0,0), black (1,0), empty (2,0): legal for white at (2,0)
        let mut board = Board::empty();
        board.set(pos(0, 0), Piece::normal(Color::White));
        board.set(pos(1, 0), Piece::normal(Color::Black));
        let source = ScriptedSource::new([PieceType::Cat]);
        let mut game = Game::from_parts(
            board,
            Color::Black,
            Hand::new(
                Color::Black,
                [PieceType::Normal, PieceType::Butter, PieceType::Normal, PieceType::Cat],
            ),
            Hand::new(Color::White, [PieceType::Normal; 4]),
            Box::new(source),
        );
        let hand_before = *game.hand(Color::Black);

        game.select_piece(1).unwrap();
        let flipped = game.place(pos(2, 0), Color::Black).unwrap();

        assert!(flipped.is_empty());
        assert_eq!(
            game.board().get(pos(2, 0)),
            Some(Piece::new(Color::White, PieceType::Butter))
        );
        let hand_after = game.hand(Color::Black);
        assert_eq!(hand_after.slots()[1].kind, PieceType::Cat);
        for i in [0, 2, 3] {
            assert_eq!(hand_after.slots()[i], hand_before.slots()[i]);
        }
    }

    #[test]
    fn test_butter_captures_for_placer() {
        // (2,0): white (0,0)-black (1,0) makes it legal for white to land,
        // and black's basis captures white (3,0) toward black (4,0)
        let mut board = Board::empty();
        board.set(pos(0, 0), Piece::normal(Color::White));
        board.set(pos(1, 0), Piece::normal(Color::Black));
        board.set(pos(3, 0), Piece::normal(Color::White));
        board.set(pos(4, 0), Piece::normal(Color::Black));
        let mut game = Game::from_parts(
            board,
            Color::Black,
            Hand::new(
                Color::Black,
                [PieceType::Butter, PieceType::Normal, PieceType::Cat, PieceType::Normal],
            ),
            Hand::new(Color::White, [PieceType::Normal; 4]),
            Box::new(ScriptedSource::new([PieceType::ButterCat])),
        );
        let hand_before = *game.hand(Color::Black);

        game.select_piece(0).unwrap();
        assert!(game.valid_moves(Color::Black).contains(&pos(2, 0)));
        let flipped = game.place(pos(2, 0), Color::Black).unwrap();

        assert_eq!(flipped, vec![pos(3, 0)]);
        assert_eq!(game.board().get(pos(3, 0)), Some(Piece::normal(Color::Black)));
        assert_eq!(game.board().get(pos(1, 0)), Some(Piece::normal(Color::Black)));
        assert_eq!(
            game.board().get(pos(2, 0)),
            Some(Piece::new(Color::White, PieceType::Butter))
        );
        assert_eq!(game.piece_count(Color::Black), 3);
        assert_eq!(game.piece_count(Color::White), 2);

        let hand_after = game.hand(Color::Black);
        assert_eq!(hand_after.slots()[0].kind, PieceType::ButterCat);
        assert!(!hand_after.slots()[0].is_used);
        for i in 1..4 {
            assert_eq!(hand_after.slots()[i], hand_before.slots()[i]);
        }
        assert_eq!(game.current_turn(), Color::White);
    }

    #[test]
    fn test_butter_valid_moves_use_landing_color() {
        // (2,0) captures for black, but white could not capture there
        let mut board = Board::empty();
        board.set(pos(0, 0), Piece::normal(Color::Black));
        board.set(pos(1, 0), Piece::normal(Color::White));
        let mut game = game_with(
            board,
            [PieceType::Butter, PieceType::Normal, PieceType::Normal, PieceType::Normal],
            [PieceType::Normal; 4],
        );

        game.select_piece(1).unwrap();
        assert_eq!(game.valid_moves(Color::Black), vec![pos(2, 0)]);

        game.select_piece(0).unwrap();
        assert!(game.valid_moves(Color::Black).is_empty());
        assert_eq!(game.place(pos(2, 0), Color::Black), None);
    }

    #[test]
    fn test_pass_and_lock() {
        let mut game = normal_game();
        game.select_piece(0).unwrap();
        game.start_flipping(&[pos(3, 3)]);
        assert!(game.is_flipping(pos(3, 3)));
        assert!(!game.is_flipping(pos(4, 4)));
        assert!(!game.pass());
        assert_eq!(game.current_turn(), Color::Black);

        game.end_flipping();
        assert!(!game.is_flipping(pos(3, 3)));
        assert!(game.pass());
        assert_eq!(game.current_turn(), Color::White);
        assert_eq!(game.selection(), None);
    }

    #[test]
    fn test_game_over_requires_both_sides_stuck() {
        // black can move, white cannot: not over
        let game = game_with(edge_board(), [PieceType::Normal; 4], [PieceType::Normal; 4]);
        assert!(game.has_valid_moves());
        assert!(!game.is_game_over());

        // white to move with no moves while black still has one: not over
        let mut stuck = game.clone();
        assert!(stuck.pass());
        assert!(!stuck.has_valid_moves());
        assert!(!stuck.is_game_over());
        assert_eq!(stuck.winner(), None);
    }

    #[test]
    fn test_winner_by_count() {
        let mut board = Board::empty();
        board.set(pos(0, 0), Piece::normal(Color::Black));
        board.set(pos(7, 7), Piece::normal(Color::Black));
        board.set(pos(0, 7), Piece::normal(Color::White));
        let game = game_with(board, [PieceType::Normal; 4], [PieceType::Normal; 4]);
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Winner::Black));

        let mut board = Board::empty();
        board.set(pos(0, 0), Piece::normal(Color::Black));
        board.set(pos(7, 7), Piece::normal(Color::White));
        board.set(pos(0, 7), Piece::new(Color::Black, PieceType::ButterCat));
        let game = game_with(board, [PieceType::Normal; 4], [PieceType::Normal; 4]);
        assert_eq!(game.winner(), Some(Winner::Draw));

        let game = game_with(Board::empty(), [PieceType::Normal; 4], [PieceType::Normal; 4]);
        assert_eq!(game.winner(), Some(Winner::Draw));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = normal_game();
        let board_before = *original.board();
        let black_before = *original.hand(Color::Black);

        let mut copy = original.clone();
        copy.select_piece(0).unwrap();
        copy.place(pos(2, 3), Color::Black).unwrap();
        copy.start_flipping(&[pos(3, 3)]);

        assert_eq!(*original.board(), board_before);
        assert_eq!(*original.hand(Color::Black), black_before);
        assert_eq!(original.current_turn(), Color::Black);
        assert_eq!(original.selection(), None);
        assert!(!original.is_locked());
    }
}
