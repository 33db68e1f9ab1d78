//! Pairwise roster runner.
//!
//! Every matchup spawns its own monster instances and its own RNG, so
//! matchups share nothing mutable and may run on separate threads.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use super::config::SimConfig;
use super::report::RosterReport;
use crate::battle::{BattleEngine, MatchupResult};
use crate::combat::{MonsterRegistry, RngSource};
use crate::error::Result;

/// Simulate every unordered pair of entries and collect a report.
///
/// Pairs run in row-major upper-triangle order: (0,1), (0,2), .., (1,2), ..
pub fn run_roster(registry: &MonsterRegistry, config: &SimConfig) -> Result<RosterReport> {
    let names = resolve_entries(registry, config)?;
    let pairs = pair_indices(names.len());
    info!(
        monsters = names.len(),
        matchups = pairs.len(),
        iterations = config.iterations,
        "Starting roster run"
    );

    let matchups = if config.parallel {
        run_parallel(registry, config, &names, &pairs)?
    } else {
        pairs
            .iter()
            .enumerate()
            .map(|(k, &(i, j))| run_matchup(registry, config, &names[i], &names[j], k as u64))
            .collect::<Result<Vec<_>>>()?
    };

    Ok(RosterReport::new(names, config.iterations, matchups))
}

/// Run one matchup with fresh monsters.
///
/// With a seed, matchup `k` uses `seed + k`, so a roster run repeats
/// exactly whatever order the matchups execute in.
pub fn run_matchup(
    registry: &MonsterRegistry,
    config: &SimConfig,
    left: &str,
    right: &str,
    matchup_index: u64,
) -> Result<MatchupResult> {
    let rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(matchup_index)),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut rng = RngSource::new(rng);

    let mut left = registry.spawn(left)?;
    let mut right = registry.spawn(right)?;

    BattleEngine::with_config(registry, config.battle.clone()).execute(
        &mut left,
        &mut right,
        config.iterations,
        &mut rng,
    )
}

fn resolve_entries(registry: &MonsterRegistry, config: &SimConfig) -> Result<Vec<String>> {
    if config.entries.is_empty() {
        return Ok(registry.names().map(str::to_string).collect());
    }
    config
        .entries
        .iter()
        .map(|name| registry.require(name).map(|t| t.name.clone()))
        .collect()
}

fn pair_indices(n: usize) -> Vec<(usize, usize)> {
    (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect()
}

#[cfg(feature = "parallel")]
fn run_parallel(
    registry: &MonsterRegistry,
    config: &SimConfig,
    names: &[String],
    pairs: &[(usize, usize)],
) -> Result<Vec<MatchupResult>> {
    use rayon::prelude::*;

    pairs
        .par_iter()
        .enumerate()
        .map(|(k, &(i, j))| run_matchup(registry, config, &names[i], &names[j], k as u64))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_parallel(
    registry: &MonsterRegistry,
    config: &SimConfig,
    names: &[String],
    pairs: &[(usize, usize)],
) -> Result<Vec<MatchupResult>> {
    tracing::warn!("Built without the `parallel` feature; running matchups sequentially");
    pairs
        .iter()
        .enumerate()
        .map(|(k, &(i, j))| run_matchup(registry, config, &names[i], &names[j], k as u64))
        .collect()
}
