use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// Board side length
pub const BOARD_SIZE: u8 = 8;

/// The eight compass directions as (dx, dy)
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Get the opposing color
    pub fn opposite(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Both colors, black first
    pub const ALL: [Color; 2] = [Color::Black, Color::White];
}

/// A square on the board. `x` is the column, `y` the row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// Create a position, rejecting anything off the board
    pub fn new(x: i32, y: i32) -> GameResult<Self> {
        if !(0..BOARD_SIZE as i32).contains(&x) || !(0..BOARD_SIZE as i32).contains(&y) {
            return Err(GameError::InvalidPosition { x, y });
        }
        Ok(Position { x: x as u8, y: y as u8 })
    }

    /// Position for a flat index `y * 8 + x`; callers guarantee `index < 64`
    pub(crate) const fn from_index(index: usize) -> Self {
        Position {
            x: (index % 8) as u8,
            y: (index / 8) as u8,
        }
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    /// Flat index `y * 8 + x`
    pub fn index(&self) -> usize {
        self.y as usize * BOARD_SIZE as usize + self.x as usize
    }

    /// Neighbouring square in direction (dx, dy), or `None` past the edge
    pub fn step(&self, dx: i8, dy: i8) -> Option<Position> {
        let nx = self.x as i8 + dx;
        let ny = self.y as i8 + dy;
        if nx < 0 || ny < 0 || nx >= BOARD_SIZE as i8 || ny >= BOARD_SIZE as i8 {
            return None;
        }
        Some(Position { x: nx as u8, y: ny as u8 })
    }

    /// Inside the central 4x4 block where special pieces may not go
    pub fn is_central(&self) -> bool {
        (2..=5).contains(&self.x) && (2..=5).contains(&self.y)
    }

    pub fn is_corner(&self) -> bool {
        (self.x == 0 || self.x == 7) && (self.y == 0 || self.y == 7)
    }

    pub fn is_edge(&self) -> bool {
        self.x == 0 || self.x == 7 || self.y == 0 || self.y == 7
    }

    /// Every square in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..64).map(Position::from_index)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
