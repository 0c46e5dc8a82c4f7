#![warn(clippy::pedantic)]

mod config;

use std::{path::PathBuf, time::Instant};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{OptionExt, eyre};
use config::CliConfig;
use cube_core::{
    Move, PuzzleState, SolveWorker, Solver, format_sequence, parse_sequence, start, success,
    working,
};
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, debug, info, warn};

/// Scrambles and solves a 3x3x3 cube layer by layer
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Solver and scramble settings, in TOML format.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    log_level: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a random scramble and the cube it produces.
    Scramble {
        /// Number of moves; defaults to the configured scramble length.
        #[arg(long, short = 'n')]
        length: Option<usize>,
        /// Seed for a reproducible scramble.
        #[arg(long, short)]
        seed: Option<u64>,
    },
    /// Apply a move sequence to a solved cube and print the result.
    Apply {
        /// The moves to apply, e.g. "R U' F2".
        sequence: String,
        /// Treat an unknown modifier as a plain clockwise turn instead of
        /// rejecting it.
        #[arg(long)]
        lenient: bool,
    },
    /// Solve the cube produced by a scramble sequence.
    Solve {
        /// The scramble to solve, e.g. "R U' F2".
        scramble: String,
    },
    /// Solve many random scrambles and report how many end up solved.
    Bench {
        /// How many scrambles to solve.
        #[arg(long, short = 'n', default_value_t = 100)]
        count: usize,
        /// Seed for the scramble generator.
        #[arg(long, short, default_value_t = 0)]
        seed: u64,
        /// Moves per scramble; defaults to the configured scramble length.
        #[arg(long, short)]
        length: Option<usize>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.log_level {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let config = CliConfig::load(cli.config.as_deref())?;
    debug!(target: "config", "{config:?}");

    match cli.command {
        Commands::Scramble { length, seed } => {
            let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
            let mut state = PuzzleState::new();
            let moves = state.scramble(length.unwrap_or(config.scramble.length), &mut rng);

            println!("{}", format_sequence(&moves));
            println!();
            print!("{state}");
        }
        Commands::Apply { sequence, lenient } => {
            let moves = if lenient {
                parse_lenient(&sequence)?
            } else {
                parse_sequence(&sequence)?
            };

            let mut state = PuzzleState::new();
            state.apply_all(moves);
            print!("{state}");
            println!("Solved: {}", state.is_solved());
        }
        Commands::Solve { scramble } => {
            let mut state = PuzzleState::new();
            state.apply_notation(&scramble)?;

            let worker = SolveWorker::new(config.solver);
            let solution = worker
                .submit(&state)?
                .wait()?
                .map_err(|e| eyre!("No solution: {e}"))?;

            println!("{}", format_sequence(&solution.moves));
            println!();
            for report in &solution.reports {
                println!(
                    "{:<32} {:>3} moves  {}  {:?}",
                    report.stage.to_string(),
                    report.moves,
                    if report.verified { "ok" } else { "--" },
                    report.outcome,
                );
            }
            println!(
                "{} moves ({} before simplifying), {}/{} stages verified",
                solution.moves.len(),
                solution.raw_move_count,
                solution.verified_stages(),
                solution.reports.len(),
            );

            for warning in &solution.warnings {
                warn!("{warning}");
            }

            state.apply_all(solution.moves.iter().copied());
            println!("Replay solves the cube: {}", state.is_solved());
        }
        Commands::Bench {
            count,
            seed,
            length,
        } => bench(
            Solver::new(config.solver),
            count,
            seed,
            length.unwrap_or(config.scramble.length),
        ),
    }

    Ok(())
}

fn parse_lenient(sequence: &str) -> color_eyre::Result<Vec<Move>> {
    sequence
        .split_whitespace()
        .map(|token| -> color_eyre::Result<Move> {
            let mv = Move::parse_lenient(token)
                .ok_or_eyre(format!("`{token}` does not start with a face letter"))?;
            if mv.to_string() != token {
                warn!("Read `{token}` as `{mv}`");
            }
            Ok(mv)
        })
        .collect()
}

fn bench(solver: Solver, count: usize, seed: u64, length: usize) {
    info!(start!("Solving {} scrambles of length {}"), count, length);
    let start = Instant::now();

    let mut rng = fastrand::Rng::with_seed(seed);
    let mut solved = 0;
    let mut failed = vec![];
    let mut move_counts = vec![];

    for _ in 0..count {
        let mut state = PuzzleState::new();
        let scramble = state.scramble(length, &mut rng);

        match solver.solve(&state) {
            Ok(solution) => {
                state.apply_all(solution.moves.iter().copied());
                if state.is_solved() {
                    solved += 1;
                    move_counts.push(solution.moves.len());
                } else {
                    failed.push(scramble);
                }
            }
            Err(e) => {
                debug!(working!("{}: {}"), format_sequence(&scramble), e);
                failed.push(scramble);
            }
        }
    }

    let (shortest, longest) = move_counts
        .iter()
        .minmax()
        .into_option()
        .map_or((0, 0), |(a, b)| (*a, *b));
    #[allow(clippy::cast_precision_loss)]
    let average = move_counts.iter().sum::<usize>() as f64 / move_counts.len().max(1) as f64;

    info!(
        success!("Finished in {:.3}s"),
        start.elapsed().as_secs_f64()
    );
    println!("{solved}/{count} solved");
    println!("Solution length: min {shortest}, max {longest}, mean {average:.1}");
    for scramble in failed {
        println!("Not solved: {}", format_sequence(&scramble));
    }
}
