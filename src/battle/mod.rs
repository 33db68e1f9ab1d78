//! Battle engine: single battles and Monte Carlo matchups.

mod engine;
mod outcome;

pub use engine::{BattleConfig, BattleEngine, TurnLimitPolicy, DEFAULT_MAX_TURNS};
pub use outcome::{BattleOutcome, MatchupResult, Side};
