//! Static evaluation for the hard CPU
//!
//! Scores a position from one color's point of view by combining:
//!   1. Positional weights (static table favoring corners and edges)
//!   2. Mobility (difference in legal squares)
//!   3. Stable pieces (owned corners plus edge runs growing out of them)
//!   4. Piece count, weighted heavily once the board fills up
//!   5. Risky squares next to an empty corner
//!   6. Edge occupation
//!
//! Finished games override all of that with a fixed win/loss/draw score.

use butter_othello::{Board, Color, Game, Position, Winner};

/// Score of a won game; a loss is the negation and a draw is 0
pub const WIN_SCORE: i32 = 100_000;

/// Piece total at which raw piece count starts to dominate
const ENDGAME_PIECES: usize = 40;

const POSITION_WEIGHT: i32 = 2;
const MOBILITY_WEIGHT: i32 = 10;
const STABILITY_WEIGHT: i32 = 25;
const OPENING_COUNT_WEIGHT: i32 = 2;
const ENDGAME_COUNT_WEIGHT: i32 = 15;
const DANGER_WEIGHT: i32 = 30;
const EDGE_WEIGHT: i32 = 5;

/// Static value of each square, indexed `[y][x]`
pub const POSITION_VALUES: [[i32; 8]; 8] = [
    [100, -20, 10, 5, 5, 10, -20, 100],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [10, -2, 5, 1, 1, 5, -2, 10],
    [5, -2, 1, 0, 0, 1, -2, 5],
    [5, -2, 1, 0, 0, 1, -2, 5],
    [10, -2, 5, 1, 1, 5, -2, 10],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [100, -20, 10, 5, 5, 10, -20, 100],
];

const CORNERS: [(u8, u8); 4] = [(0, 0), (7, 0), (0, 7), (7, 7)];

/// Squares touching each corner, paired with that corner
const DANGER_SQUARES: [((u8, u8), (u8, u8)); 12] = [
    ((1, 0), (0, 0)), ((0, 1), (0, 0)), ((1, 1), (0, 0)),
    ((6, 0), (7, 0)), ((7, 1), (7, 0)), ((6, 1), (7, 0)),
    ((0, 6), (0, 7)), ((1, 7), (0, 7)), ((1, 6), (0, 7)),
    ((6, 6), (7, 7)), ((7, 6), (7, 7)), ((6, 7), (7, 7)),
];

pub fn position_value(pos: Position) -> i32 {
    POSITION_VALUES[pos.y() as usize][pos.x() as usize]
}

fn square(x: u8, y: u8) -> Option<Position> {
    Position::new(x as i32, y as i32).ok()
}

fn owned(board: &Board, pos: Position, color: Color) -> bool {
    board.get(pos).is_some_and(|piece| piece.counts_as(color))
}

/// Evaluate `game` from `perspective`'s side
pub fn evaluate(game: &Game, perspective: Color) -> i32 {
    if let Some(winner) = game.winner() {
        return match winner {
            Winner::Draw => 0,
            Winner::Black if perspective == Color::Black => WIN_SCORE,
            Winner::White if perspective == Color::White => WIN_SCORE,
            _ => -WIN_SCORE,
        };
    }

    let board = game.board();
    let me = perspective;
    let them = perspective.opposite();
    let mut score = 0;

    score += (positional_score(board, me) - positional_score(board, them)) * POSITION_WEIGHT;

    let mobility = game.legal_positions(me).len() as i32 - game.legal_positions(them).len() as i32;
    score += mobility * MOBILITY_WEIGHT;

    score += (count_stable(board, me) - count_stable(board, them)) * STABILITY_WEIGHT;

    let mine = game.piece_count(me);
    let theirs = game.piece_count(them);
    let count_weight = if mine + theirs < ENDGAME_PIECES {
        OPENING_COUNT_WEIGHT
    } else {
        ENDGAME_COUNT_WEIGHT
    };
    score += (mine as i32 - theirs as i32) * count_weight;

    score -= count_dangerous(board, me) * DANGER_WEIGHT;
    score += count_dangerous(board, them) * DANGER_WEIGHT;

    score += (count_edges(board, me) - count_edges(board, them)) * EDGE_WEIGHT;

    score
}

fn positional_score(board: &Board, color: Color) -> i32 {
    board
        .pieces()
        .filter(|(_, piece)| piece.counts_as(color))
        .map(|(pos, _)| position_value(pos))
        .sum()
}

/// Owned corners plus the same-colored runs extending from them along both
/// edges
fn count_stable(board: &Board, color: Color) -> i32 {
    let mut count = 0;
    for (cx, cy) in CORNERS {
        let Some(corner) = square(cx, cy) else { continue };
        if !owned(board, corner, color) {
            continue;
        }
        count += 1;

        let dx: i8 = if cx == 0 { 1 } else { -1 };
        let dy: i8 = if cy == 0 { 1 } else { -1 };
        for (sx, sy) in [(dx, 0), (0, dy)] {
            let mut current = corner.step(sx, sy);
            while let Some(pos) = current {
                if !owned(board, pos, color) {
                    break;
                }
                count += 1;
                current = pos.step(sx, sy);
            }
        }
    }
    count
}

/// Squares held next to a corner that is still empty
fn count_dangerous(board: &Board, color: Color) -> i32 {
    DANGER_SQUARES
        .iter()
        .filter_map(|&((x, y), (cx, cy))| Some((square(x, y)?, square(cx, cy)?)))
        .filter(|&(pos, corner)| owned(board, pos, color) && board.get(corner).is_none())
        .count() as i32
}

fn count_edges(board: &Board, color: Color) -> i32 {
    board
        .pieces()
        .filter(|(pos, piece)| pos.is_edge() && piece.counts_as(color))
        .count() as i32
}
