use std::fmt;

use itertools::Itertools;
use log::trace;

use crate::{
    face::{Color, Face},
    move_table::MoveTable,
    moves::{Move, MoveParseError, parse_sequence},
};

pub const FACELET_COUNT: usize = 54;

/// The colors on all 54 facelets, face by face in the order of [`Face::ALL`],
/// each face row-major.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    facelets: [Color; FACELET_COUNT],
}

impl PuzzleState {
    /// A solved cube.
    pub fn new() -> PuzzleState {
        PuzzleState {
            facelets: std::array::from_fn(|i| Face::ALL[i / 9].solved_color()),
        }
    }

    /// Takes an arbitrary coloring. Nothing checks that it is reachable.
    pub fn from_facelets(facelets: [Color; FACELET_COUNT]) -> PuzzleState {
        PuzzleState { facelets }
    }

    pub fn reset(&mut self) {
        *self = PuzzleState::new();
    }

    pub fn facelets(&self) -> &[Color; FACELET_COUNT] {
        &self.facelets
    }

    pub fn facelet(&self, face: Face, row: usize, col: usize) -> Color {
        self.facelets[face.offset() + row * 3 + col]
    }

    pub fn center(&self, face: Face) -> Color {
        self.facelet(face, 1, 1)
    }

    pub fn apply(&mut self, mv: Move) -> &mut Self {
        self.facelets = MoveTable::get().permutation(mv).apply(&self.facelets);
        self
    }

    pub fn apply_all<I: IntoIterator<Item = Move>>(&mut self, moves: I) -> &mut Self {
        for mv in moves {
            self.apply(mv);
        }
        self
    }

    /// Parses and applies whitespace separated notation. The state is left
    /// untouched if any token fails to parse.
    ///
    /// # Errors
    ///
    /// Returns the parse error of the first malformed token.
    pub fn apply_notation(&mut self, notation: &str) -> Result<&mut Self, MoveParseError> {
        let moves = parse_sequence(notation)?;
        Ok(self.apply_all(moves))
    }

    /// Applies `count` random moves and returns them. A candidate that would
    /// exactly undo the previous move is drawn again instead.
    pub fn scramble(&mut self, count: usize, rng: &mut fastrand::Rng) -> Vec<Move> {
        let mut applied: Vec<Move> = Vec::with_capacity(count);

        while applied.len() < count {
            let candidate = Move::ALL[rng.usize(..Move::ALL.len())];

            if let Some(&last) = applied.last()
                && last.face() == candidate.face()
                && (last.turns() + candidate.turns()) % 4 == 0
            {
                continue;
            }

            self.apply(candidate);
            applied.push(candidate);
        }

        trace!(target: "scramble", "Applied {count} scramble moves");

        applied
    }

    pub fn is_solved(&self) -> bool {
        Face::ALL.iter().all(|&face| {
            let center = self.center(face);
            self.facelets[face.offset()..face.offset() + 9]
                .iter()
                .all(|&color| color == center)
        })
    }
}

impl Default for PuzzleState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PuzzleState\n{self}")
    }
}

/// Unfolded net: U on top, then the L F R B band, then D.
impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = |face: Face, r: usize| (0..3).map(|c| self.facelet(face, r, c).initial()).join(" ");

        for r in 0..3 {
            writeln!(f, "      {}", row(Face::U, r))?;
        }
        for r in 0..3 {
            let band = [Face::L, Face::F, Face::R, Face::B]
                .into_iter()
                .map(|face| row(face, r))
                .join(" ");
            writeln!(f, "{band}")?;
        }
        for r in 0..3 {
            writeln!(f, "      {}", row(Face::D, r))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_solved() {
        let state = PuzzleState::new();
        assert!(state.is_solved());
        assert_eq!(state.center(Face::F), Color::Green);
        assert_eq!(state.facelet(Face::D, 2, 2), Color::Yellow);
    }

    #[test]
    fn single_wrong_facelet_is_not_solved() {
        let mut facelets = *PuzzleState::new().facelets();
        facelets[Face::R.offset() + 2] = Color::Blue;
        assert!(!PuzzleState::from_facelets(facelets).is_solved());
    }

    #[test]
    fn quarter_turn_then_inverse_restores() {
        for mv in Move::ALL {
            let mut state = PuzzleState::new();
            state.apply_notation("R U F' D2 L B").unwrap();
            let before = state.clone();
            state.apply(mv).apply(mv.inverse());
            assert_eq!(state, before, "{mv} then its inverse");
        }
    }

    #[test]
    fn u_turn_moves_front_row_to_left() {
        let mut state = PuzzleState::new();
        state.apply(Move::clockwise(Face::U));
        assert_eq!(state.facelet(Face::L, 0, 0), Color::Green);
        assert_eq!(state.facelet(Face::F, 0, 1), Color::Red);
        assert_eq!(state.facelet(Face::F, 1, 0), Color::Green);
    }

    #[test]
    fn scramble_is_reproducible_and_avoids_cancellation() {
        let mut a = PuzzleState::new();
        let mut b = PuzzleState::new();
        let moves_a = a.scramble(40, &mut fastrand::Rng::with_seed(7));
        let moves_b = b.scramble(40, &mut fastrand::Rng::with_seed(7));

        assert_eq!(moves_a.len(), 40);
        assert_eq!(moves_a, moves_b);
        assert_eq!(a, b);
        for pair in moves_a.windows(2) {
            assert!(pair[0].face() != pair[1].face() || pair[0].turns() + pair[1].turns() != 4);
        }

        let mut replay = PuzzleState::new();
        replay.apply_all(moves_a);
        assert_eq!(replay, a);
    }

    #[test]
    fn reset_and_bad_notation() {
        let mut state = PuzzleState::new();
        state.apply_notation("F R").unwrap();
        assert!(state.apply_notation("U X").is_err());
        state.reset();
        assert!(state.is_solved());
    }

    #[test]
    fn net_layout() {
        let net = PuzzleState::new().to_string();
        let lines: Vec<_> = net.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "      W W W");
        assert_eq!(lines[4], "O O O G G G R R R B B B");
        assert_eq!(lines[8], "      Y Y Y");
    }
}
