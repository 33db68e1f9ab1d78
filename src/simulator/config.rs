//! Simulation configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::battle::BattleConfig;
use crate::error::{DuelError, Result};

/// Battles per matchup when nothing else is configured.
pub const DEFAULT_ITERATIONS: u32 = 10_000;

/// Configuration for a roster run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of battles per matchup
    pub iterations: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Turn cap and log settings for every battle
    pub battle: BattleConfig,

    /// Run matchups on a thread pool
    pub parallel: bool,

    /// Monsters to pit against each other (empty = every registered monster)
    pub entries: Vec<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            battle: BattleConfig::default(),
            parallel: false,
            entries: Vec::new(),
        }
    }
}

impl SimConfig {
    /// Quick config for a rough look at a roster
    pub fn quick() -> Self {
        Self {
            iterations: 500,
            ..Default::default()
        }
    }

    /// Seeded config whose results repeat exactly
    pub fn reproducible(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Read a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| DuelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| DuelError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
