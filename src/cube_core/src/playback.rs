use crate::{moves::Move, solver::Solution, state::PuzzleState};

/// A cursor for stepping through a move sequence on a caller's state, one
/// move at a time in either direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    moves: Vec<Move>,
    position: usize,
}

impl Playback {
    pub fn new(moves: Vec<Move>) -> Playback {
        Playback { moves, position: 0 }
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// How many moves have been applied so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.position == self.moves.len()
    }

    /// The move the next [`Playback::step_forward`] would apply.
    pub fn peek(&self) -> Option<Move> {
        self.moves.get(self.position).copied()
    }

    /// Applies the next move to `state` and returns it.
    pub fn step_forward(&mut self, state: &mut PuzzleState) -> Option<Move> {
        let mv = self.peek()?;
        state.apply(mv);
        self.position += 1;
        Some(mv)
    }

    /// Undoes the previous move on `state` and returns the move that was
    /// applied to do so.
    pub fn step_back(&mut self, state: &mut PuzzleState) -> Option<Move> {
        let previous = self.position.checked_sub(1)?;
        let undo = self.moves[previous].inverse();
        state.apply(undo);
        self.position = previous;
        Some(undo)
    }

    /// Applies every remaining move, returning how many there were.
    pub fn play_to_end(&mut self, state: &mut PuzzleState) -> usize {
        let remaining = self.moves.len() - self.position;
        state.apply_all(self.moves[self.position..].iter().copied());
        self.position = self.moves.len();
        remaining
    }

    /// Undoes every applied move.
    pub fn rewind(&mut self, state: &mut PuzzleState) {
        while self.step_back(state).is_some() {}
    }
}

impl From<Solution> for Playback {
    fn from(solution: Solution) -> Self {
        Playback::new(solution.moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{face::Face, moves::parse_sequence};

    #[test]
    fn steps_both_ways() {
        let mut state = PuzzleState::new();
        let mut playback = Playback::new(parse_sequence("R U2 F'").unwrap());

        assert_eq!(playback.step_back(&mut state), None);
        assert_eq!(playback.step_forward(&mut state), Some(Move::clockwise(Face::R)));
        assert_eq!(playback.peek(), Some(Move::half(Face::U)));
        assert_eq!(playback.play_to_end(&mut state), 2);
        assert!(playback.is_finished());
        assert_eq!(playback.step_forward(&mut state), None);

        let mut expected = PuzzleState::new();
        expected.apply_notation("R U2 F'").unwrap();
        assert_eq!(state, expected);

        assert_eq!(playback.step_back(&mut state), Some(Move::clockwise(Face::F)));
        assert_eq!(playback.position(), 2);
        playback.rewind(&mut state);
        assert_eq!(playback.position(), 0);
        assert!(state.is_solved());
    }
}
