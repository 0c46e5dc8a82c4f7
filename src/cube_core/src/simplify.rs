use crate::moves::Move;

/// Merges runs of consecutive turns of the same face. Turns are summed modulo
/// four; a full rotation disappears entirely, which may in turn bring two
/// more turns of one face next to each other. Moves of different faces are
/// never reordered, so the result always has the same effect as the input.
pub fn simplify(moves: &[Move]) -> Vec<Move> {
    let mut out: Vec<Move> = Vec::with_capacity(moves.len());

    for &mv in moves {
        match out.last() {
            Some(&last) if last.face() == mv.face() => {
                out.pop();
                if let Some(merged) = Move::new(mv.face(), last.turns() + mv.turns()) {
                    out.push(merged);
                }
            }
            _ => out.push(mv),
        }
    }

    out
}
