use crate::piece::Piece;
use crate::position::{Color, Position};

/// 8x8 grid of optional pieces stored as a flat array, so copies are plain
/// memcpys and never share state.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Board {
    cells: [Option<Piece>; 64],
    generation: u32,
}

impl Board {
    /// Create a board with the standard Othello cross in the center:
    /// - (3,3) and (4,4) are White
    /// - (3,4) and (4,3) are Black
    pub fn new() -> Self {
        let mut board = Board::empty();
        board.cells[Self::idx(3, 3)] = Some(Piece::normal(Color::White));
        board.cells[Self::idx(4, 4)] = Some(Piece::normal(Color::White));
        board.cells[Self::idx(3, 4)] = Some(Piece::normal(Color::Black));
        board.cells[Self::idx(4, 3)] = Some(Piece::normal(Color::Black));
        board
    }

    /// A board with no pieces at all
    pub fn empty() -> Self {
        Board {
            cells: [None; 64],
            generation: 0,
        }
    }

    fn idx(x: usize, y: usize) -> usize {
        y * 8 + x
    }

    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.cells[pos.index()]
    }

    pub fn set(&mut self, pos: Position, piece: Piece) {
        self.cells[pos.index()] = Some(piece);
        self.generation = self.generation.wrapping_add(1);
    }

    /// Number of writes since construction
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Count of pieces that belong to `color`; buttercats are neutral
    pub fn count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|piece| piece.counts_as(color))
            .count()
    }

    /// Total occupied cells, buttercats included
    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Occupied cells with their positions
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.map(|piece| (Position::from_index(index), piece)))
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Piece>]> {
        self.cells.chunks(8)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
