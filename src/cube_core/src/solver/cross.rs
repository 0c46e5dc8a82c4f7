use super::{
    SolveContext, SolveError, StageOutcome,
    algorithm::{EDGE_FLIP, SEXY},
    outcome_for,
};
use crate::{
    face::{Color, Face},
    moves::Move,
    slots::{Piece, locate_edge},
    state::PuzzleState,
};

/// Places the four D edges, each under the side face of its other color.
pub(super) fn solve_cross(ctx: &mut SolveContext) -> Result<StageOutcome, SolveError> {
    let down = ctx.center(Face::D);
    let mut missing = vec![];

    'pieces: for side in Face::SIDES {
        let colors = [down, ctx.center(side)];
        let mut attempts = 0;

        loop {
            let Some(slot) = locate_edge(ctx.state(), colors) else {
                ctx.piece_not_found(Piece::Edge(colors), &mut missing);
                continue 'pieces;
            };
            let Some(down_sticker) = slot.sticker_showing(ctx.state(), down) else {
                ctx.piece_not_found(Piece::Edge(colors), &mut missing);
                continue 'pieces;
            };
            let other = slot.other(down_sticker);

            if down_sticker.face == Face::D && other.face == side {
                break;
            }
            ctx.spend(&mut attempts)?;

            if down_sticker.face == Face::U {
                ctx.turn_up_until(|state| side_color_on(state, colors, side))?;
                ctx.apply(Move::half(side));
            } else if slot.touches(Face::U) {
                ctx.perform(EDGE_FLIP, down_sticker.face);
            } else if slot.touches(Face::D) {
                let side_face = if down_sticker.face == Face::D {
                    other.face
                } else {
                    down_sticker.face
                };
                ctx.apply(Move::half(side_face));
            } else {
                ctx.perform(SEXY, slot.left_face());
            }
        }
    }

    Ok(outcome_for(missing))
}

/// Whether the edge's side color currently sits on `side`.
fn side_color_on(state: &PuzzleState, colors: [Color; 2], side: Face) -> bool {
    locate_edge(state, colors)
        .and_then(|slot| slot.sticker_showing(state, colors[1]))
        .is_some_and(|sticker| sticker.face == side)
}
