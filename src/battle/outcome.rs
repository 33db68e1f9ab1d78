//! Results of single battles and of whole matchups.

use serde::{Deserialize, Serialize};

/// Which of the two monsters in a matchup. `Left` is `monster0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Trial parity decides who moves first: even trials start with
    /// `Left`, odd trials with `Right`.
    pub fn first_mover_for_trial(trial: u32) -> Side {
        if trial % 2 == 0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// Result of one battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleOutcome {
    /// `None` when the turn cap ended the battle without a winner.
    pub winner: Option<Side>,
    pub turns: u64,
    pub first_mover: Side,
    /// The turn cap was reached.
    pub capped: bool,
    pub left_hp: i32,
    pub right_hp: i32,
    /// Battle transcript; empty unless log recording is enabled.
    pub log: Vec<String>,
}

/// Aggregate of many battles between the same two monsters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupResult {
    pub left: String,
    pub right: String,
    pub iterations: u32,
    pub left_wins: u32,
    pub right_wins: u32,
    pub draws: u32,
    /// Battles ended by the turn cap (decided or not).
    pub capped: u32,
    pub total_turns: u64,
}

impl MatchupResult {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            iterations: 0,
            left_wins: 0,
            right_wins: 0,
            draws: 0,
            capped: 0,
            total_turns: 0,
        }
    }

    pub fn record(&mut self, outcome: &BattleOutcome) {
        self.iterations += 1;
        self.total_turns += outcome.turns;
        if outcome.capped {
            self.capped += 1;
        }
        match outcome.winner {
            Some(Side::Left) => self.left_wins += 1,
            Some(Side::Right) => self.right_wins += 1,
            None => self.draws += 1,
        }
    }

    /// Fraction of battles won by the left monster. Draws count as losses.
    pub fn win_rate(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.left_wins as f64 / self.iterations as f64
    }

    pub fn average_turns(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.iterations as f64
    }
}
