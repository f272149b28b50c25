use serde::{Deserialize, Serialize};

use crate::position::Color;

/// Kind of piece, governing where it may go and how it reacts to captures
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    /// Plain disc, takes the capturing color
    Normal,
    /// Lands in the opponent's color and spins back when captured
    Butter,
    /// Lands in the placer's color and spins back when captured
    Cat,
    /// Never captures, is never captured, blocks scans
    #[serde(rename = "buttercat")]
    ButterCat,
}

impl PieceType {
    pub const ALL: [PieceType; 4] = [
        PieceType::Normal,
        PieceType::Butter,
        PieceType::Cat,
        PieceType::ButterCat,
    ];

    pub const SPECIALS: [PieceType; 3] = [PieceType::Butter, PieceType::Cat, PieceType::ButterCat];

    pub fn is_special(self) -> bool {
        self != PieceType::Normal
    }

    /// Keeps its color when sandwiched
    pub fn resists_flip(self) -> bool {
        matches!(self, PieceType::Butter | PieceType::Cat)
    }

    /// Color the piece shows on the board when `placer` puts it down
    pub fn landing_color(self, placer: Color) -> Color {
        match self {
            PieceType::Butter => placer.opposite(),
            _ => placer,
        }
    }
}

/// Contents of an occupied cell
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceType) -> Self {
        Piece { color, kind }
    }

    pub const fn normal(color: Color) -> Self {
        Piece { color, kind: PieceType::Normal }
    }

    pub fn is_butter_cat(&self) -> bool {
        self.kind == PieceType::ButterCat
    }

    /// Belongs to `color` for capture purposes; buttercats belong to nobody
    pub fn counts_as(&self, color: Color) -> bool {
        !self.is_butter_cat() && self.color == color
    }
}
