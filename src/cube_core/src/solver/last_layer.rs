//! The four last-layer stages. None of them look pieces up; they read the U
//! layer facelets directly.

use log::{debug, warn};

use super::{
    SolveContext, SolveError, StageOutcome,
    algorithm::{A_PERM, EDGE_FLIP, H_PERM, L_SHAPE, SUNE, U_PERM},
};
use crate::{face::Face, moves::Move, slots::Sticker};

const BACK_EDGE: Sticker = Sticker::new(Face::U, 0, 1);
const LEFT_EDGE: Sticker = Sticker::new(Face::U, 1, 0);
const RIGHT_EDGE: Sticker = Sticker::new(Face::U, 1, 2);
const FRONT_EDGE: Sticker = Sticker::new(Face::U, 2, 1);

const TOP_CORNERS: [Sticker; 4] = [
    Sticker::new(Face::U, 0, 0),
    Sticker::new(Face::U, 0, 2),
    Sticker::new(Face::U, 2, 0),
    Sticker::new(Face::U, 2, 2),
];

/// Orients the top edges so U shows a cross.
pub(super) fn solve_cross(ctx: &mut SolveContext) -> Result<StageOutcome, SolveError> {
    let up = ctx.center(Face::U);
    let mut attempts = 0;

    loop {
        let [back, left, right, front] =
            [BACK_EDGE, LEFT_EDGE, RIGHT_EDGE, FRONT_EDGE].map(|sticker| sticker.color(ctx.state()) == up);
        let oriented = [back, left, right, front].into_iter().filter(|&b| b).count();

        match oriented {
            4 => return Ok(StageOutcome::Completed),
            0 | 2 => {}
            _ => {
                debug!(target: "solver", "{oriented} top edges oriented, no algorithm applies");
                return Ok(StageOutcome::Incomplete);
            }
        }
        ctx.spend(&mut attempts)?;

        if oriented == 0 {
            ctx.perform(EDGE_FLIP, Face::F);
        } else if (left && right) || (back && front) {
            if back && front {
                ctx.apply(Move::clockwise(Face::U));
            }
            ctx.perform(EDGE_FLIP, Face::F);
        } else {
            ctx.turn_up_until(|state| {
                BACK_EDGE.color(state) == up && LEFT_EDGE.color(state) == up
            })?;
            ctx.perform(L_SHAPE, Face::F);
        }
    }
}

/// Turns the whole top face to U color with repeated Sune. Running out of
/// attempts here is reported rather than fatal.
pub(super) fn orient_corners(ctx: &mut SolveContext) -> Result<StageOutcome, SolveError> {
    let up = ctx.center(Face::U);
    let mut attempts = 0;

    loop {
        let oriented = TOP_CORNERS
            .iter()
            .filter(|sticker| sticker.color(ctx.state()) == up)
            .count();
        if oriented == 4 {
            return Ok(StageOutcome::Completed);
        }
        if attempts >= ctx.budget() {
            warn!(target: "solver", "Top corners still unoriented after {attempts} attempts");
            return Ok(StageOutcome::Incomplete);
        }
        attempts += 1;

        let target = match oriented {
            1 => Sticker::new(Face::U, 2, 0),
            0 => Sticker::new(Face::L, 0, 2),
            _ => Sticker::new(Face::F, 0, 0),
        };
        ctx.turn_up_until(|state| target.color(state) == up)?;
        ctx.perform(SUNE, Face::F);
    }
}

/// Puts the top corners in place, then turns U so they match the centers.
pub(super) fn permute_corners(ctx: &mut SolveContext) -> Result<StageOutcome, SolveError> {
    let mut attempts = 0;

    loop {
        let headlights = Face::SIDES
            .into_iter()
            .filter(|&side| {
                ctx.state().facelet(side, 0, 0) == ctx.state().facelet(side, 0, 2)
            })
            .collect::<Vec<_>>();

        if headlights.len() == 4 {
            let front = ctx.center(Face::F);
            ctx.turn_up_until(|state| state.facelet(Face::F, 0, 0) == front)?;
            return Ok(StageOutcome::Completed);
        }
        ctx.spend(&mut attempts)?;

        // With a matched pair at the back the algorithm finishes the rest.
        let front = headlights.first().map_or(Face::F, |side| side.opposite());
        ctx.perform(A_PERM, front);
    }
}

/// Cycles or swaps the top edges into place.
pub(super) fn permute_edges(ctx: &mut SolveContext) -> Result<StageOutcome, SolveError> {
    let mut attempts = 0;

    loop {
        let solved = Face::SIDES
            .into_iter()
            .filter(|&side| ctx.state().facelet(side, 0, 1) == ctx.center(side))
            .collect::<Vec<_>>();

        match solved.as_slice() {
            [_, _, _, _] => return Ok(StageOutcome::Completed),
            [side] => {
                let back = *side;
                ctx.spend(&mut attempts)?;
                ctx.perform(U_PERM, back.opposite());
            }
            [] => {
                ctx.spend(&mut attempts)?;
                if ctx.state().facelet(Face::F, 0, 1) == ctx.center(Face::B) {
                    ctx.perform(H_PERM, Face::F);
                } else {
                    ctx.perform(U_PERM, Face::F);
                }
            }
            _ => {
                debug!(target: "solver", "{} top edges in place, no algorithm applies", solved.len());
                return Ok(StageOutcome::Incomplete);
            }
        }
    }
}
