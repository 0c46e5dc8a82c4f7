use std::fmt;

use crate::{
    face::Face,
    moves::{Move, count_moves, parse_notation},
};

/// A fixed move sequence written as if `F` were the front face. It can be
/// performed with any side face in front by relabeling `F`, `R`, `B`, and `L`.
#[derive(Debug, Clone, Copy)]
pub struct Algorithm {
    notation: &'static str,
    moves: &'static [Move],
}

macro_rules! algorithm {
    ($(#[$meta:meta])* $name:ident = $notation:literal) => {
        $(#[$meta])*
        pub const $name: Algorithm = Algorithm {
            notation: $notation,
            moves: {
                const MOVES: [Move; count_moves($notation)] = parse_notation($notation);
                &MOVES
            },
        };
    };
}

algorithm!(
    /// Flips an edge on the top layer; also cycles last-layer edge orientation.
    EDGE_FLIP = "F R U R' U' F'"
);
algorithm!(SEXY = "R U R' U'");
algorithm!(CORNER_DROP = "R U R'");
algorithm!(
    /// Brings the front top edge into the front-right slot.
    RIGHT_INSERT = "U R U' R' U' F' U F"
);
algorithm!(
    /// Brings the front top edge into the front-left slot.
    LEFT_INSERT = "U' L' U L U F U' F'"
);
algorithm!(L_SHAPE = "F U R U' R' F'");
algorithm!(SUNE = "R U R' U R U2 R'");
algorithm!(
    /// Cycles three top corners, leaving the back pair alone.
    A_PERM = "R' F R' B2 R F' R' B2 R2"
);
algorithm!(
    /// Cycles three top edges, leaving the back edge alone.
    U_PERM = "R U' R U R U R U' R' U' R2"
);
algorithm!(
    /// Swaps opposite top edges front with back and left with right.
    H_PERM = "R2 L2 D R2 L2 U2 R2 L2 D R2 L2"
);

impl Algorithm {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// The moves of this algorithm performed with `front` as the front face.
    pub fn oriented(&self, front: Face) -> impl Iterator<Item = Move> + 'static {
        self.moves
            .iter()
            .map(move |&mv| mv.on(relabel(mv.face(), front)))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notation)
    }
}

fn relabel(face: Face, front: Face) -> Face {
    match face {
        Face::F => front,
        Face::R => front.right(),
        Face::B => front.opposite(),
        Face::L => front.left(),
        Face::U | Face::D => face,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{moves::format_sequence, state::PuzzleState};

    #[test]
    fn notation_and_moves_agree() {
        for alg in [
            EDGE_FLIP, SEXY, CORNER_DROP, RIGHT_INSERT, LEFT_INSERT, L_SHAPE, SUNE, A_PERM,
            U_PERM, H_PERM,
        ] {
            let moves = alg.oriented(Face::F).collect::<Vec<_>>();
            assert_eq!(format_sequence(&moves), alg.to_string());
            assert_eq!(moves.len(), alg.len());
        }
    }

    #[test]
    fn relabels_around_the_new_front() {
        let moves = format_sequence(&SEXY.oriented(Face::L).collect::<Vec<_>>());
        assert_eq!(moves, "F U F' U'");
        let moves = format_sequence(&EDGE_FLIP.oriented(Face::B).collect::<Vec<_>>());
        assert_eq!(moves, "B L U L' U' B'");
    }

    #[test]
    fn sexy_move_has_order_six() {
        let mut state = PuzzleState::new();
        for _ in 0..6 {
            state.apply_all(SEXY.oriented(Face::R));
        }
        assert!(state.is_solved());
    }

    #[test]
    fn h_perm_keeps_first_two_layers() {
        let mut state = PuzzleState::new();
        state.apply_all(H_PERM.oriented(Face::F));
        for face in Face::SIDES {
            assert_eq!(state.facelet(face, 0, 1), face.opposite().solved_color());
            for row in 1..3 {
                for col in 0..3 {
                    assert_eq!(state.facelet(face, row, col), face.solved_color());
                }
            }
        }
    }
}
