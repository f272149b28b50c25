use thiserror::Error;

use butter_othello::GameError;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("Invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;
