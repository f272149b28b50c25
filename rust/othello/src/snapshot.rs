//! Read-only view of a game for presentation layers

use serde::Serialize;

use crate::game::{Game, Winner};
use crate::hand::{HandSlot, SlotId};
use crate::piece::PieceType;
use crate::position::{Color, Position};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellState {
    pub x: u8,
    pub y: u8,
    pub color: Option<Color>,
    pub piece_type: Option<PieceType>,
    pub is_valid_move: bool,
    pub is_flipping: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandState {
    pub color: Color,
    pub slots: Vec<HandSlot>,
    pub selected_slot_id: Option<SlotId>,
    pub has_selection: bool,
}

/// Everything a board view needs to render one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Rows top to bottom, each indexed by x
    pub board: Vec<Vec<CellState>>,
    pub current_turn: Color,
    pub is_game_over: bool,
    pub is_locked: bool,
    pub black_hand: HandState,
    pub white_hand: HandState,
    pub black_count: usize,
    pub white_count: usize,
    pub winner: Option<Winner>,
    pub has_valid_moves: bool,
}

impl GameState {
    pub fn capture(game: &Game) -> Self {
        let turn = game.current_turn();
        let mut valid = [false; 64];
        for pos in game.valid_moves(turn) {
            valid[pos.index()] = true;
        }

        let board = game
            .board()
            .rows()
            .enumerate()
            .map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(|(x, cell)| {
                        let index = y * 8 + x;
                        CellState {
                            x: x as u8,
                            y: y as u8,
                            color: cell.map(|piece| piece.color),
                            piece_type: cell.map(|piece| piece.kind),
                            is_valid_move: valid[index],
                            is_flipping: Position::new(x as i32, y as i32)
                                .map(|pos| game.is_flipping(pos))
                                .unwrap_or(false),
                        }
                    })
                    .collect()
            })
            .collect();

        GameState {
            board,
            current_turn: turn,
            is_game_over: game.is_game_over(),
            is_locked: game.is_locked(),
            black_hand: hand_state(game, Color::Black),
            white_hand: hand_state(game, Color::White),
            black_count: game.piece_count(Color::Black),
            white_count: game.piece_count(Color::White),
            winner: game.winner(),
            has_valid_moves: game.has_valid_moves(),
        }
    }

    pub fn cell(&self, pos: Position) -> &CellState {
        &self.board[pos.y() as usize][pos.x() as usize]
    }

    pub fn hand(&self, color: Color) -> &HandState {
        match color {
            Color::Black => &self.black_hand,
            Color::White => &self.white_hand,
        }
    }
}

fn hand_state(game: &Game, color: Color) -> HandState {
    let selected = game.selected_slot(color);
    HandState {
        color,
        slots: game.hand(color).slots().to_vec(),
        selected_slot_id: selected,
        has_selection: selected.is_some(),
    }
}
