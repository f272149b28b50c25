//! Core types and game logic for butter-cat Othello
//!
//! Othello/Reversi with a per-player supply of four pieces, some of which are
//! special:
//! - `Butter`: lands in the opponent's color, spins back when captured
//! - `Cat`: lands in the placer's color, spins back when captured
//! - `ButterCat`: neither captures nor can be captured, blocks scanning
//!
//! Special pieces may never be placed in the central 4x4 block.

pub mod board;
pub mod error;
pub mod game;
pub mod hand;
pub mod piece;
pub mod position;
pub mod snapshot;
pub mod source;

pub use board::Board;
pub use error::{GameError, GameResult};
pub use game::{Game, Winner};
pub use hand::{Hand, HandSlot, SlotId, SLOTS_PER_HAND};
pub use piece::{Piece, PieceType};
pub use position::{Color, Position, BOARD_SIZE, DIRECTIONS};
pub use snapshot::{CellState, GameState, HandState};
pub use source::{PieceSource, RandomSource, ReplenishPolicy, ScriptedSource};
