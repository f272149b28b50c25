use butter_othello::{Game, Position, SlotId};

/// One candidate CPU action: which supply slot to use and where to put it
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CpuMove {
    pub slot: SlotId,
    pub position: Position,
}

/// A computer opponent. Strategies only see the game through its public
/// API and never mutate the game they are given.
pub trait CpuStrategy: Send {
    /// Pick a move for the side to move, or `None` when it has to pass
    fn decide_move(&mut self, game: &Game) -> Option<CpuMove>;

    fn name(&self) -> &'static str;
}

/// Every (slot, square) pair open to the side to move: each unused slot is
/// selected on a scratch copy and its valid squares collected.
pub fn all_valid_moves(game: &Game) -> Vec<CpuMove> {
    let color = game.current_turn();
    let mut moves = Vec::new();

    for slot in game.hand(color).available() {
        let mut scratch = game.clone();
        if scratch.select_piece(slot.id.value()).is_err() {
            continue;
        }
        moves.extend(
            scratch
                .valid_moves(color)
                .into_iter()
                .map(|position| CpuMove { slot: slot.id, position }),
        );
    }

    moves
}
