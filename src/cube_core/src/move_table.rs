//! The 18 face-turn permutations, built once per process.

use std::sync::LazyLock;

use log::debug;

use crate::{face::Face, moves::Move, permutation::Permutation};

/// Quarter turn of a face's own 3x3 grid: position `i` takes the facelet that
/// was at `FACE_ROTATION[i]`.
const FACE_ROTATION: [usize; 9] = [6, 3, 0, 7, 4, 1, 8, 5, 2];

/// The three 4-cycles of neighboring facelets dragged along by a clockwise
/// quarter turn of each face, indexed by [`Face::index`].
const ADJACENT_CYCLES: [[[usize; 4]; 3]; 6] = [
    // U
    [[18, 45, 27, 36], [19, 46, 28, 37], [20, 47, 29, 38]],
    // D
    [[24, 42, 33, 51], [25, 43, 34, 52], [26, 44, 35, 53]],
    // L
    [[0, 36, 9, 53], [3, 39, 12, 50], [6, 42, 15, 47]],
    // R
    [[2, 51, 11, 38], [5, 48, 14, 41], [8, 45, 17, 44]],
    // F
    [[6, 27, 11, 26], [7, 30, 10, 23], [8, 33, 9, 20]],
    // B
    [[0, 24, 17, 29], [1, 21, 16, 32], [2, 18, 15, 35]],
];

static MOVE_TABLE: LazyLock<MoveTable> = LazyLock::new(MoveTable::build);

pub struct MoveTable {
    permutations: [Permutation; 18],
}

impl MoveTable {
    /// The process-wide table.
    pub fn get() -> &'static MoveTable {
        &MOVE_TABLE
    }

    fn build() -> MoveTable {
        let permutations = Move::ALL.map(|mv| {
            let quarter_turn = face_rotation(mv.face()).then(&Permutation::from_cycles(
                &ADJACENT_CYCLES[mv.face().index()],
            ));
            quarter_turn.pow(usize::from(mv.turns()))
        });

        debug!(target: "move_table", "Built permutations for {} moves", permutations.len());

        MoveTable { permutations }
    }

    pub fn permutation(&self, mv: Move) -> &Permutation {
        &self.permutations[mv.index()]
    }
}

fn face_rotation(face: Face) -> Permutation {
    let offset = face.offset();
    let mut cycles = vec![];
    let mut covered = [false; 9];

    for start in 0..9 {
        if covered[start] {
            continue;
        }
        let mut cycle = vec![];
        let mut i = start;
        while !covered[i] {
            covered[i] = true;
            cycle.push(offset + i);
            i = inverse_rotation(i);
        }
        if cycle.len() > 1 {
            cycles.push(cycle);
        }
    }

    Permutation::from_cycles(&cycles)
}

/// Where the facelet at grid position `i` ends up after one quarter turn.
fn inverse_rotation(i: usize) -> usize {
    FACE_ROTATION
        .iter()
        .position(|&from| from == i)
        .unwrap_or(i)
}
