//! Error types for the rules engine
//!
//! Only programmer errors live here: bad coordinates and bad slot selections.
//! Rejected placements are an everyday outcome and are reported as `None`
//! from [`crate::Game::place`] instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Coordinates outside the 8x8 board
    #[error("Invalid position: ({x}, {y}) (must be 0-7)")]
    InvalidPosition { x: i32, y: i32 },

    /// Slot id not owned by any hand
    #[error("Unknown supply slot {0} (must be 0-7)")]
    UnknownSlot(u8),

    /// Slot exists but its piece has already been spent
    #[error("Supply slot {0} is used and cannot be selected")]
    SlotUsed(u8),

    /// A hand operation needed a selection but there was none
    #[error("No supply slot is selected")]
    NoSelection,
}

pub type GameResult<T> = Result<T, GameError>;
