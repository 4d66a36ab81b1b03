//! Headless simulator for Monte Carlo runs of the game.
//!
//! Plays many sessions with the autopilot to check:
//! - How far the controller gets at each epoch
//! - Where deaths cluster by score
//! - That spacing and gap bounds hold under irregular frame times
//!
//! The simulator drives the same `game::tick` as the interactive binary,
//! so results match real gameplay behavior.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{run_simulation, simulate_single_run, RunOutcome, RunStats};
