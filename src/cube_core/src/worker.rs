//! Runs a solve off the calling thread, one at a time.

use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

use crossbeam_channel::{Receiver, TryRecvError, bounded};
use log::{debug, info};
use thiserror::Error;

use crate::{
    solver::{Solution, SolveError, Solver, SolverConfig},
    state::PuzzleState,
};

pub type SolveResult = Result<Solution, SolveError>;

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("A solve is already in progress")]
    Busy,
    #[error("The solve worker stopped without publishing a result")]
    Disconnected,
    #[error("Could not start the solve worker: {0}")]
    Spawn(#[from] io::Error),
}

/// Hands solves to a background thread. A second request while one is still
/// running is rejected, never queued.
#[derive(Debug, Clone, Default)]
pub struct SolveWorker {
    solver: Solver,
    busy: Arc<AtomicBool>,
}

/// The single result slot of a submitted solve.
#[derive(Debug)]
pub struct PendingSolve {
    receiver: Receiver<SolveResult>,
}

/// Clears the in-flight flag when the worker thread finishes, panics, or is
/// never started.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SolveWorker {
    pub fn new(config: SolverConfig) -> SolveWorker {
        SolveWorker {
            solver: Solver::new(config),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Starts solving a copy of `state` in the background.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Busy`] while an earlier solve is still running,
    /// or [`WorkerError::Spawn`] if the thread could not be created.
    pub fn submit(&self, state: &PuzzleState) -> Result<PendingSolve, WorkerError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!(target: "worker", "Rejected a solve request while busy");
            return Err(WorkerError::Busy);
        }

        let guard = BusyGuard(Arc::clone(&self.busy));
        let (sender, receiver) = bounded(1);
        let solver = self.solver;
        let state = state.clone();

        thread::Builder::new()
            .name("cube-solve".to_owned())
            .spawn(move || {
                let result = solver.solve(&state);
                drop(guard);
                if sender.send(result).is_err() {
                    info!(target: "worker", "Solve finished but nobody is waiting for it");
                }
            })?;

        debug!(target: "worker", working!("Solve started in the background"));

        Ok(PendingSolve { receiver })
    }
}

impl PendingSolve {
    /// Returns the result if the solve has finished.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Disconnected`] if the worker died, or if the
    /// result was already taken.
    pub fn try_take(&self) -> Result<Option<SolveResult>, WorkerError> {
        match self.receiver.try_recv() {
            Ok(result) => Ok(Some(result)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(WorkerError::Disconnected),
        }
    }

    /// Blocks until the solve finishes.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Disconnected`] if the worker died first.
    pub fn wait(self) -> Result<SolveResult, WorkerError> {
        self.receiver
            .recv()
            .map_err(|_| WorkerError::Disconnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn solves_in_background() {
        let worker = SolveWorker::default();
        let mut state = PuzzleState::new();
        state.scramble(20, &mut fastrand::Rng::with_seed(1));

        let pending = worker.submit(&state).unwrap();
        let solution = pending.wait().unwrap().unwrap();
        assert!(!worker.is_busy());

        state.apply_all(solution.moves);
        assert!(state.is_solved());
    }

    #[test]
    fn rejects_second_request_while_busy() {
        let worker = SolveWorker::default();
        worker.busy.store(true, Ordering::Release);
        assert!(matches!(
            worker.submit(&PuzzleState::new()),
            Err(WorkerError::Busy)
        ));

        worker.busy.store(false, Ordering::Release);
        let pending = worker.submit(&PuzzleState::new()).unwrap();
        assert!(pending.wait().unwrap().unwrap().moves.is_empty());
    }

    #[test]
    fn result_is_taken_once() {
        let worker = SolveWorker::default();
        let pending = worker.submit(&PuzzleState::new()).unwrap();

        let result = loop {
            if let Some(result) = pending.try_take().unwrap() {
                break result;
            }
            thread::yield_now();
        };
        assert!(result.is_ok());

        // The worker drops its end right after publishing.
        let after = loop {
            match pending.try_take() {
                Ok(None) => thread::yield_now(),
                other => break other,
            }
        };
        assert!(matches!(after, Err(WorkerError::Disconnected)));
    }
}
