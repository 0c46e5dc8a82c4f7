use super::{
    SolveContext, SolveError, StageOutcome,
    algorithm::{CORNER_DROP, SEXY},
    outcome_for,
};
use crate::{
    face::{Color, Face},
    slots::{Piece, locate_corner},
    state::PuzzleState,
};

/// Repeating `R U R' U'` cycles a corner through its six placements.
const SEAT_LIMIT: usize = 6;

/// Seats the four D corners, each below its two side colors.
pub(super) fn solve_corners(ctx: &mut SolveContext) -> Result<StageOutcome, SolveError> {
    let down = ctx.center(Face::D);
    let mut missing = vec![];

    'pieces: for side in Face::SIDES {
        let right = side.right();
        let colors = [down, ctx.center(side), ctx.center(right)];
        let mut attempts = 0;

        loop {
            let Some(slot) = locate_corner(ctx.state(), colors) else {
                ctx.piece_not_found(Piece::Corner(colors), &mut missing);
                continue 'pieces;
            };

            if is_seated(ctx.state(), colors, side) {
                break;
            }
            ctx.spend(&mut attempts)?;

            if slot.touches(Face::D) {
                // Kick the corner out of the wrong bottom slot.
                if let Some(front) = slot.left_side() {
                    ctx.perform(CORNER_DROP, front);
                }
                continue;
            }

            ctx.turn_up_until(|state| {
                locate_corner(state, colors).is_some_and(|slot| slot.is_between([Face::U, side, right]))
            })?;
            ctx.repeat_until(
                SEAT_LIMIT,
                |state| is_seated(state, colors, side),
                |ctx| ctx.perform(SEXY, side),
            )?;
        }
    }

    Ok(outcome_for(missing))
}

fn is_seated(state: &PuzzleState, colors: [Color; 3], side: Face) -> bool {
    locate_corner(state, colors).is_some_and(|slot| {
        slot.is_between([Face::D, side, side.right()])
            && slot
                .sticker_showing(state, colors[0])
                .is_some_and(|sticker| sticker.face == Face::D)
    })
}
