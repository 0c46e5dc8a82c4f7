//! Seven stage layer-by-layer solver.
//!
//! The first layer is built on the D face and the last layer on U. Every stage
//! works on a private copy of the caller's state and records each move it
//! makes. Corrective loops are bounded: running out of attempts aborts the
//! whole solve with [`SolveError::IterationBudgetExceeded`], except for the
//! corner orientation stage, which gives up softly.

use std::{fmt, time::Instant};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    face::{Color, Face},
    moves::Move,
    simplify::simplify,
    slots::{EDGE_SLOTS, Piece},
    state::PuzzleState,
};

mod algorithm;
mod cross;
mod first_layer;
mod last_layer;
mod second_layer;

pub use algorithm::Algorithm;

/// Upper bound on top-face turns while waiting for a piece to line up. Four
/// turns bring the layer back to where it started.
const ALIGN_LIMIT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// How many corrective passes a single piece or stage may take.
    pub max_iterations_per_step: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_iterations_per_step: 50,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Cross,
    FirstLayerCorners,
    SecondLayerEdges,
    LastLayerCross,
    LastLayerCornerOrientation,
    LastLayerCornerPermutation,
    LastLayerEdgePermutation,
}

impl Stage {
    pub const ALL: [Self; 7] = [
        Stage::Cross,
        Stage::FirstLayerCorners,
        Stage::SecondLayerEdges,
        Stage::LastLayerCross,
        Stage::LastLayerCornerOrientation,
        Stage::LastLayerCornerPermutation,
        Stage::LastLayerEdgePermutation,
    ];

    /// Whether `state` satisfies everything this stage and the ones before it
    /// are meant to achieve.
    pub fn verify(self, state: &PuzzleState) -> bool {
        let row_home = |face: Face, row: usize| {
            (0..3).all(|col| state.facelet(face, row, col) == state.center(face))
        };

        match self {
            Stage::Cross => Face::SIDES.into_iter().all(|side| {
                EDGE_SLOTS
                    .iter()
                    .find(|slot| slot.touches(Face::D) && slot.touches(side))
                    .is_some_and(|slot| {
                        slot.stickers()
                            .iter()
                            .all(|sticker| sticker.color(state) == state.center(sticker.face))
                    })
            }),
            Stage::FirstLayerCorners => {
                (0..3).all(|row| row_home(Face::D, row))
                    && Face::SIDES.into_iter().all(|side| row_home(side, 2))
            }
            Stage::SecondLayerEdges => {
                Stage::FirstLayerCorners.verify(state)
                    && Face::SIDES.into_iter().all(|side| row_home(side, 1))
            }
            Stage::LastLayerCross => {
                let up = state.center(Face::U);
                Stage::SecondLayerEdges.verify(state)
                    && [(0, 1), (1, 0), (1, 2), (2, 1)]
                        .into_iter()
                        .all(|(row, col)| state.facelet(Face::U, row, col) == up)
            }
            Stage::LastLayerCornerOrientation => {
                Stage::SecondLayerEdges.verify(state) && (0..3).all(|row| row_home(Face::U, row))
            }
            Stage::LastLayerCornerPermutation => {
                Stage::LastLayerCornerOrientation.verify(state)
                    && Face::SIDES.into_iter().all(|side| {
                        state.facelet(side, 0, 0) == state.center(side)
                            && state.facelet(side, 0, 2) == state.center(side)
                    })
            }
            Stage::LastLayerEdgePermutation => state.is_solved(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Cross => "cross",
            Stage::FirstLayerCorners => "first layer corners",
            Stage::SecondLayerEdges => "second layer edges",
            Stage::LastLayerCross => "last layer cross",
            Stage::LastLayerCornerOrientation => "last layer corner orientation",
            Stage::LastLayerCornerPermutation => "last layer corner permutation",
            Stage::LastLayerEdgePermutation => "last layer edge permutation",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Completed,
    /// The stage ran but the listed pieces could not be found anywhere.
    PartiallyCompleted(Vec<Piece>),
    /// The stage stopped in a position none of its algorithms handle.
    Incomplete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    pub outcome: StageOutcome,
    /// Whether the stage's goal actually holds afterwards.
    pub verified: bool,
    /// Moves recorded by this stage, before simplification.
    pub moves: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("The {stage} stage did not converge within {budget} iterations")]
    IterationBudgetExceeded { stage: Stage, budget: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveWarning {
    #[error("Could not find the {piece} during the {stage} stage")]
    PieceNotFound { stage: Stage, piece: Piece },
    #[error("The solution does not fully solve the cube")]
    UnsolvedAfterPipeline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// The simplified moves to replay on the input state.
    pub moves: Vec<Move>,
    /// How many moves the stages recorded before simplification.
    pub raw_move_count: usize,
    pub reports: Vec<StageReport>,
    pub warnings: Vec<SolveWarning>,
}

impl Solution {
    /// Whether replaying the moves is known to leave the cube solved.
    pub fn is_complete(&self) -> bool {
        !self.warnings.contains(&SolveWarning::UnsolvedAfterPipeline)
    }

    pub fn verified_stages(&self) -> usize {
        self.reports.iter().filter(|report| report.verified).count()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Solver {
        Solver { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves a copy of `state` and returns the moves that solve `state` itself.
    ///
    /// Pieces that cannot be found are skipped and reported as warnings on
    /// the returned solution, as is a final state that is still not solved.
    ///
    /// # Errors
    ///
    /// Fails when a corrective loop runs out of attempts. No moves are
    /// returned in that case.
    pub fn solve(&self, state: &PuzzleState) -> Result<Solution, SolveError> {
        info!(start!("Solving cube"));
        let start = Instant::now();

        let mut ctx = SolveContext::new(state.clone(), self.config.max_iterations_per_step);
        let mut reports = Vec::with_capacity(Stage::ALL.len());

        for stage in Stage::ALL {
            ctx.stage = stage;
            let before = ctx.log.len();
            debug!(target: "solver", working!("Running the {} stage"), stage);

            let outcome = match stage {
                Stage::Cross => cross::solve_cross(&mut ctx)?,
                Stage::FirstLayerCorners => first_layer::solve_corners(&mut ctx)?,
                Stage::SecondLayerEdges => second_layer::solve_edges(&mut ctx)?,
                Stage::LastLayerCross => last_layer::solve_cross(&mut ctx)?,
                Stage::LastLayerCornerOrientation => last_layer::orient_corners(&mut ctx)?,
                Stage::LastLayerCornerPermutation => last_layer::permute_corners(&mut ctx)?,
                Stage::LastLayerEdgePermutation => last_layer::permute_edges(&mut ctx)?,
            };

            let verified = stage.verify(&ctx.state);
            let moves = ctx.log.len() - before;
            debug!(
                target: "solver",
                "Finished the {stage} stage with {moves} moves: {outcome:?}, verified: {verified}"
            );

            reports.push(StageReport {
                stage,
                outcome,
                verified,
                moves,
            });
        }

        let moves = simplify(&ctx.log);
        let mut warnings = ctx.warnings;

        let mut replay = state.clone();
        replay.apply_all(moves.iter().copied());
        if !replay.is_solved() {
            warn!(target: "solver", "{}", SolveWarning::UnsolvedAfterPipeline);
            warnings.push(SolveWarning::UnsolvedAfterPipeline);
        }

        let solution = Solution {
            moves,
            raw_move_count: ctx.log.len(),
            reports,
            warnings,
        };

        info!(
            success!("Solved in {:.3}s with {} moves ({} before simplifying), {}/{} stages verified"),
            start.elapsed().as_secs_f64(),
            solution.moves.len(),
            solution.raw_move_count,
            solution.verified_stages(),
            Stage::ALL.len(),
        );

        Ok(solution)
    }
}

/// Solves `state` with the default configuration.
///
/// # Errors
///
/// See [`Solver::solve`].
pub fn solve(state: &PuzzleState) -> Result<Solution, SolveError> {
    Solver::default().solve(state)
}

/// The working copy every stage mutates, plus everything recorded so far.
pub(crate) struct SolveContext {
    state: PuzzleState,
    log: Vec<Move>,
    warnings: Vec<SolveWarning>,
    budget: usize,
    stage: Stage,
}

impl SolveContext {
    fn new(state: PuzzleState, budget: usize) -> SolveContext {
        SolveContext {
            state,
            log: vec![],
            warnings: vec![],
            budget,
            stage: Stage::Cross,
        }
    }

    pub(crate) fn state(&self) -> &PuzzleState {
        &self.state
    }

    pub(crate) fn center(&self, face: Face) -> Color {
        self.state.center(face)
    }

    pub(crate) fn apply(&mut self, mv: Move) {
        self.state.apply(mv);
        self.log.push(mv);
    }

    pub(crate) fn perform(&mut self, algorithm: Algorithm, front: Face) {
        for mv in algorithm.oriented(front) {
            self.apply(mv);
        }
    }

    /// Counts one corrective pass against the per-step budget.
    pub(crate) fn spend(&self, attempts: &mut usize) -> Result<(), SolveError> {
        if *attempts >= self.budget {
            return Err(self.exceeded(self.budget));
        }
        *attempts += 1;
        Ok(())
    }

    pub(crate) fn budget(&self) -> usize {
        self.budget
    }

    /// Turns U clockwise until `done` holds.
    pub(crate) fn turn_up_until(
        &mut self,
        done: impl Fn(&PuzzleState) -> bool,
    ) -> Result<(), SolveError> {
        self.repeat_until(ALIGN_LIMIT, done, |ctx| {
            ctx.apply(Move::clockwise(Face::U));
        })
    }

    /// Runs `step` until `done` holds, at most `limit` times.
    pub(crate) fn repeat_until(
        &mut self,
        limit: usize,
        done: impl Fn(&PuzzleState) -> bool,
        mut step: impl FnMut(&mut Self),
    ) -> Result<(), SolveError> {
        let mut steps = 0;
        while !done(&self.state) {
            if steps >= limit {
                return Err(self.exceeded(limit));
            }
            step(self);
            steps += 1;
        }
        Ok(())
    }

    fn exceeded(&self, budget: usize) -> SolveError {
        warn!(target: "solver", "The {} stage ran out of attempts ({budget})", self.stage);
        SolveError::IterationBudgetExceeded {
            stage: self.stage,
            budget,
        }
    }

    pub(crate) fn piece_not_found(&mut self, piece: Piece, missing: &mut Vec<Piece>) {
        let warning = SolveWarning::PieceNotFound {
            stage: self.stage,
            piece,
        };
        warn!(target: "solver", "{warning}");
        self.warnings.push(warning);
        missing.push(piece);
    }
}

fn outcome_for(missing: Vec<Piece>) -> StageOutcome {
    if missing.is_empty() {
        StageOutcome::Completed
    } else {
        StageOutcome::PartiallyCompleted(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn solved_cube_needs_no_moves() {
        let solution = solve(&PuzzleState::new()).unwrap();
        assert!(solution.moves.is_empty());
        assert!(solution.warnings.is_empty());
        assert_eq!(solution.verified_stages(), 7);
        assert!(
            solution
                .reports
                .iter()
                .all(|report| report.outcome == StageOutcome::Completed)
        );
    }

    #[test]
    fn verification_is_cumulative() {
        let mut state = PuzzleState::new();
        state.apply(Move::clockwise(Face::U));
        assert!(Stage::LastLayerCornerOrientation.verify(&state));
        assert!(!Stage::LastLayerCornerPermutation.verify(&state));

        state.apply_notation("U' R").unwrap();
        assert!(!Stage::Cross.verify(&state));
        assert!(!Stage::LastLayerEdgePermutation.verify(&state));
    }

    #[test]
    fn spend_stops_at_budget() {
        let ctx = SolveContext::new(PuzzleState::new(), 2);
        let mut attempts = 0;
        assert!(ctx.spend(&mut attempts).is_ok());
        assert!(ctx.spend(&mut attempts).is_ok());
        assert_eq!(
            ctx.spend(&mut attempts),
            Err(SolveError::IterationBudgetExceeded {
                stage: Stage::Cross,
                budget: 2
            })
        );
    }
}
