use ndarray::Array2;
use numpy::{PyArray1, PyArray2};
use pyo3::exceptions::PyValueError;
/// PyO3 bindings for butter-othello
/// Exposes a full game session, CPU opponent included, to Python
use pyo3::prelude::*;

use butter_othello::{Color, PieceType, Position, Winner};

use crate::config::{GameMode, Settings};
use crate::session::{CpuAction, GameSession};

fn parse_mode(mode: &str) -> PyResult<GameMode> {
    match mode {
        "pvp" => Ok(GameMode::Pvp),
        "cpu-easy" => Ok(GameMode::CpuEasy),
        "cpu-hard" => Ok(GameMode::CpuHard),
        other => Err(PyValueError::new_err(format!(
            "Unknown mode '{}'. Must be one of: pvp, cpu-easy, cpu-hard",
            other
        ))),
    }
}

fn parse_color(color: &str) -> PyResult<Color> {
    match color {
        "black" => Ok(Color::Black),
        "white" => Ok(Color::White),
        other => Err(PyValueError::new_err(format!(
            "Unknown color '{}'. Must be 'black' or 'white'",
            other
        ))),
    }
}

fn to_py_err(err: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Python wrapper for a butter-othello game session
///
/// Placements that capture lock the board until `end_flipping()` is called,
/// mirroring the flip animation of a graphical front end.
#[pyclass]
pub struct ButterOthelloGame {
    session: GameSession,
}

#[pymethods]
impl ButterOthelloGame {
    /// Create a new game
    ///
    /// Args:
    ///     mode (str): "pvp", "cpu-easy" or "cpu-hard"
    ///     cpu_color (str): "black" or "white", the side the CPU plays
    ///     seed (int | None): seed for piece draws and the easy CPU
    #[new]
    #[pyo3(signature = (mode = "pvp", cpu_color = "white", seed = None))]
    pub fn new(mode: &str, cpu_color: &str, seed: Option<u64>) -> PyResult<Self> {
        let settings = Settings {
            mode: parse_mode(mode)?,
            cpu_color: parse_color(cpu_color)?,
            seed,
            ..Settings::default()
        };
        Ok(Self {
            session: GameSession::new(settings),
        })
    }

    /// Start a fresh game with the same settings
    pub fn reset(&mut self) {
        self.session.new_game();
    }

    /// Select a supply slot (0-3 black, 4-7 white)
    ///
    /// Raises:
    ///     ValueError: If the slot does not exist or is already used
    pub fn select_slot(&mut self, slot_id: u8) -> PyResult<()> {
        self.session.select_slot(slot_id).map_err(to_py_err)
    }

    /// Place the selected piece for the side to move
    ///
    /// Args:
    ///     x (int): column 0-7
    ///     y (int): row 0-7
    ///
    /// Returns:
    ///     tuple: (valid, pieces_flipped, game_over)
    ///
    /// Raises:
    ///     ValueError: If (x, y) is off the board
    pub fn step(&mut self, x: i32, y: i32) -> PyResult<(bool, usize, bool)> {
        let outcome = self.session.place(x, y).map_err(to_py_err)?;
        Ok((outcome.success, outcome.flipped.len(), outcome.state.is_game_over))
    }

    /// Release the flip lock
    pub fn end_flipping(&mut self) {
        self.session.end_flipping();
    }

    /// Pass the turn. Returns False while the board is locked.
    pub fn pass_turn(&mut self) -> bool {
        self.session.pass()
    }

    /// Let the CPU play if it is its turn
    ///
    /// Returns:
    ///     tuple | None: (slot, x, y, pieces_flipped) for a placement,
    ///         None when the CPU passed or it was not its turn
    pub fn cpu_move(&mut self) -> PyResult<Option<(u8, u8, u8, usize)>> {
        let action = self.session.cpu_turn().map_err(to_py_err)?;
        Ok(match action {
            Some(CpuAction::Placed { chosen, outcome }) => Some((
                chosen.slot.value(),
                chosen.position.x(),
                chosen.position.y(),
                outcome.flipped.len(),
            )),
            Some(CpuAction::Passed) | None => None,
        })
    }

    /// Get the board as a 2D numpy array indexed [y, x]
    ///
    /// Returns:
    ///     np.ndarray: Shape (8, 8) with dtype uint8
    ///         - 0 = Empty cell
    ///         - 1 = Black piece
    ///         - 2 = White piece
    ///         - 3 = Buttercat (neutral)
    pub fn get_board<'py>(&self, py: Python<'py>) -> PyResult<&'py PyArray2<u8>> {
        let board = self.session.game().board();
        let array = Array2::from_shape_fn((8, 8), |(y, x)| {
            let cell = Position::new(x as i32, y as i32)
                .ok()
                .and_then(|pos| board.get(pos));
            match cell {
                None => 0,
                Some(piece) if piece.is_butter_cat() => 3,
                Some(piece) if piece.color == Color::Black => 1,
                Some(_) => 2,
            }
        });
        Ok(PyArray2::from_owned_array(py, array))
    }

    /// Get the piece type of every cell as a 2D numpy array indexed [y, x]
    ///
    /// Returns:
    ///     np.ndarray: Shape (8, 8) with dtype uint8
    ///         - 0 = Empty, 1 = Normal, 2 = Butter, 3 = Cat, 4 = Buttercat
    pub fn get_piece_types<'py>(&self, py: Python<'py>) -> PyResult<&'py PyArray2<u8>> {
        let board = self.session.game().board();
        let array = Array2::from_shape_fn((8, 8), |(y, x)| {
            let cell = Position::new(x as i32, y as i32)
                .ok()
                .and_then(|pos| board.get(pos));
            match cell.map(|piece| piece.kind) {
                None => 0,
                Some(PieceType::Normal) => 1,
                Some(PieceType::Butter) => 2,
                Some(PieceType::Cat) => 3,
                Some(PieceType::ButterCat) => 4,
            }
        });
        Ok(PyArray2::from_owned_array(py, array))
    }

    /// Get valid squares for the side to move under the current selection
    ///
    /// Returns:
    ///     np.ndarray: Shape (64,) with dtype bool, index = y * 8 + x
    pub fn get_valid_moves<'py>(&self, py: Python<'py>) -> PyResult<&'py PyArray1<bool>> {
        let game = self.session.game();
        let mut moves = [false; 64];
        for pos in game.valid_moves(game.current_turn()) {
            moves[pos.index()] = true;
        }
        Ok(PyArray1::from_slice(py, &moves))
    }

    /// Get the side to move
    ///
    /// Returns:
    ///     int: 0 for Black, 1 for White
    pub fn get_current_player(&self) -> u8 {
        match self.session.game().current_turn() {
            Color::Black => 0,
            Color::White => 1,
        }
    }

    /// Get piece counts for both players, buttercats excluded
    ///
    /// Returns:
    ///     tuple: (black_count, white_count)
    pub fn get_piece_counts(&self) -> (usize, usize) {
        let game = self.session.game();
        (game.piece_count(Color::Black), game.piece_count(Color::White))
    }

    /// Get the winner of the game
    ///
    /// Returns:
    ///     int:
    ///         - 0 = Black wins
    ///         - 1 = White wins
    ///         - 2 = Draw
    ///         - 3 = Game not finished
    pub fn get_winner(&self) -> u8 {
        match self.session.game().winner() {
            Some(Winner::Black) => 0,
            Some(Winner::White) => 1,
            Some(Winner::Draw) => 2,
            None => 3,
        }
    }

    /// Full game snapshot as a JSON string
    pub fn state_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.session.state()).map_err(to_py_err)
    }
}

/// Python module definition
///
/// This module can be imported in Python as `butter_othello`
#[pymodule]
#[pyo3(name = "butter_othello")]
fn butter_othello_py(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<ButterOthelloGame>()?;
    Ok(())
}
