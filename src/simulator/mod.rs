//! Roster simulator for Monte Carlo win-rate tables.
//!
//! Pits every pair of selected monsters against each other for a fixed
//! number of battles and reports how often each side wins.

mod config;
mod report;
mod runner;

pub use config::{SimConfig, DEFAULT_ITERATIONS};
pub use report::{format_rate, RosterReport};
pub use runner::{run_matchup, run_roster};
