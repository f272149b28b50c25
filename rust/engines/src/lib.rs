//! CPU opponents and game session for butter-othello
//!
//! This crate sits on top of the rules in `butter_othello` and contains:
//! - `easy`: random play that hoards cats and keeps them off corners
//! - `hard`: minimax with alpha-beta pruning and a 5-ply default lookahead
//! - `evaluation`: the static evaluator used by the hard CPU
//! - `session`: the command surface a front end drives, with settings and
//!   CPU turns
//!
//! Every strategy implements [`CpuStrategy`] and only reads the game through
//! its public API, simulating moves on clones.

pub mod config;
pub mod easy;
pub mod error;
pub mod evaluation;
pub mod hard;
pub mod session;
pub mod strategy;

#[cfg(feature = "python")]
mod bindings;

pub use config::{GameMode, Settings};
pub use easy::EasyStrategy;
pub use error::{SessionError, SessionResult};
pub use evaluation::evaluate;
pub use hard::{HardStrategy, DEFAULT_DEPTH};
pub use session::{strategy_for, CpuAction, GameSession, PlaceOutcome};
pub use strategy::{all_valid_moves, CpuMove, CpuStrategy};
