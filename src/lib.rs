//! Monster Duel - Monte Carlo win-rate estimation for monster battles
//!
//! Monsters fight turn-based battles driven by recursively subdivided skill
//! trees. Running many independent battles per pair yields a win-rate table
//! for a whole roster.

pub mod battle;
pub mod combat;
pub mod definitions;
pub mod error;
pub mod simulator;

pub use error::{DuelError, Result};
