use super::{
    SolveContext, SolveError, StageOutcome,
    algorithm::{LEFT_INSERT, RIGHT_INSERT},
    outcome_for,
};
use crate::{
    face::{Color, Face},
    slots::{EdgeSlot, Piece, locate_edge},
    state::PuzzleState,
};

/// Places the four middle-layer edges between their two side faces.
pub(super) fn solve_edges(ctx: &mut SolveContext) -> Result<StageOutcome, SolveError> {
    let mut missing = vec![];

    'pieces: for side in Face::SIDES {
        let right = side.right();
        let colors = [ctx.center(side), ctx.center(right)];
        let mut attempts = 0;

        loop {
            let Some(slot) = locate_edge(ctx.state(), colors) else {
                ctx.piece_not_found(Piece::Edge(colors), &mut missing);
                continue 'pieces;
            };

            let shows = |face: Face, color: Color| {
                slot.sticker_on(face)
                    .is_some_and(|sticker| sticker.color(ctx.state()) == color)
            };
            if shows(side, colors[0]) && shows(right, colors[1]) {
                break;
            }
            ctx.spend(&mut attempts)?;

            if !slot.touches(Face::U) {
                // Lift it out of the wrong middle slot.
                ctx.perform(RIGHT_INSERT, slot.left_face());
                continue;
            }

            ctx.turn_up_until(|state| {
                locate_edge(state, colors).is_some_and(|slot| front_matches(state, slot))
            })?;

            let Some(slot) = locate_edge(ctx.state(), colors) else {
                continue;
            };
            let Some(up) = slot.sticker_on(Face::U) else {
                continue;
            };
            let front = slot.other(up).face;

            if up.color(ctx.state()) == ctx.center(front.right()) {
                ctx.perform(RIGHT_INSERT, front);
            } else {
                ctx.perform(LEFT_INSERT, front);
            }
        }
    }

    Ok(outcome_for(missing))
}

/// Whether a top-layer edge's side sticker matches the center below it.
fn front_matches(state: &PuzzleState, slot: EdgeSlot) -> bool {
    slot.sticker_on(Face::U).is_some_and(|up| {
        let side = slot.other(up);
        side.color(state) == state.center(side.face)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{Stage, cross::solve_cross, first_layer::solve_corners};

    #[test_log::test]
    fn fills_middle_layer() {
        let mut rng = fastrand::Rng::with_seed(5);
        for _ in 0..50 {
            let mut state = PuzzleState::new();
            state.scramble(30, &mut rng);
            let mut ctx = SolveContext::new(state, 50);
            solve_cross(&mut ctx).unwrap();
            solve_corners(&mut ctx).unwrap();
            assert_eq!(solve_edges(&mut ctx), Ok(StageOutcome::Completed));
            assert!(Stage::SecondLayerEdges.verify(ctx.state()));
        }
    }

    #[test]
    fn flipped_middle_edge_is_reinserted() {
        let mut state = PuzzleState::new();
        // Front-right edge flipped in place, everything else intact.
        state
            .apply_notation("F' U' F U R U R' U F' U F U R U' R'")
            .unwrap();
        assert_eq!(state.facelet(Face::F, 1, 2), Color::Red);
        let mut ctx = SolveContext::new(state, 50);
        solve_cross(&mut ctx).unwrap();
        solve_corners(&mut ctx).unwrap();
        assert_eq!(solve_edges(&mut ctx), Ok(StageOutcome::Completed));
        assert!(Stage::SecondLayerEdges.verify(ctx.state()));
    }
}
