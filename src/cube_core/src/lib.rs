#![warn(clippy::pedantic)]

//! Facelet model and layer-by-layer solver for the 3x3x3 cube.
//!
//! The cube is a 54-entry color array; every one of the 18 face turns is a
//! fixed permutation of those entries, built once and shared for the life of
//! the process. The solver runs seven fixed stages against a private clone of
//! the caller's state and hands back a compressed move sequence.

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}

pub mod face;
pub mod move_table;
pub mod moves;
pub mod permutation;
pub mod playback;
pub mod simplify;
pub mod slots;
pub mod solver;
pub mod state;
pub mod worker;

pub use face::{Color, Face};
pub use moves::{Move, MoveParseError, format_sequence, parse_sequence};
pub use playback::Playback;
pub use simplify::simplify;
pub use slots::{CornerSlot, EdgeSlot, Piece, Sticker};
pub use solver::{
    Solution, SolveError, SolveWarning, Solver, SolverConfig, Stage, StageOutcome, StageReport,
    solve,
};
pub use state::PuzzleState;
pub use worker::{PendingSolve, SolveWorker, WorkerError};
