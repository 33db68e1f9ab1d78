//! Turn-by-turn battle resolution and the Monte Carlo loop.
//!
//! Each turn draws one sample `r`. The acting monster's temporary ailments
//! tick, then `r` resolves both its permanent-ailment tree and its skill
//! tree. The two resolutions share the sample on purpose: an ailment leaf
//! and a skill leaf in the same position of their trees always fire
//! together.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use super::outcome::{BattleOutcome, MatchupResult, Side};
use crate::combat::{Monster, MonsterRegistry, RandomSource};
use crate::error::Result;

/// Default turn cap. Battles between monsters that cannot hurt each other
/// would otherwise never end.
pub const DEFAULT_MAX_TURNS: u64 = 10_000;

/// How a battle that hits the turn cap is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnLimitPolicy {
    /// No winner.
    #[default]
    Draw,
    /// The monster with more HP wins; equal HP is a draw.
    HigherHealth,
}

/// Per-battle settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// `None` runs until a monster falls, however long that takes.
    pub max_turns: Option<u64>,
    pub turn_limit: TurnLimitPolicy,
    /// Keep each battle's transcript in its outcome.
    pub record_log: bool,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_turns: Some(DEFAULT_MAX_TURNS),
            turn_limit: TurnLimitPolicy::Draw,
            record_log: false,
        }
    }
}

impl BattleConfig {
    /// No turn cap.
    pub fn unbounded() -> Self {
        Self {
            max_turns: None,
            ..Default::default()
        }
    }

    pub fn capped(max_turns: u64) -> Self {
        Self {
            max_turns: Some(max_turns),
            ..Default::default()
        }
    }
}

/// Runs battles between monsters resolved against one registry.
#[derive(Debug, Clone)]
pub struct BattleEngine<'a> {
    registry: &'a MonsterRegistry,
    config: BattleConfig,
}

impl<'a> BattleEngine<'a> {
    pub fn new(registry: &'a MonsterRegistry) -> Self {
        Self::with_config(registry, BattleConfig::default())
    }

    pub fn with_config(registry: &'a MonsterRegistry, config: BattleConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Fight one battle to completion.
    ///
    /// Both monsters are hard reset first and left in their final state
    /// afterwards. Errors only on a transform to an unregistered monster.
    pub fn fight(
        &self,
        left: &mut Monster,
        right: &mut Monster,
        first_mover: Side,
        rng: &mut impl RandomSource,
    ) -> Result<BattleOutcome> {
        left.reset(true);
        right.reset(true);

        let (mut caster, mut target) = match first_mover {
            Side::Left => (&mut *left, &mut *right),
            Side::Right => (&mut *right, &mut *left),
        };
        let mut caster_side = first_mover;
        let mut log = Vec::new();
        let mut turns: u64 = 0;

        let (winner, capped) = loop {
            if self.config.max_turns.is_some_and(|max| turns >= max) {
                let (left_hp, right_hp) = match caster_side {
                    Side::Left => (caster.hp(), target.hp()),
                    Side::Right => (target.hp(), caster.hp()),
                };
                debug!(turns, left_hp, right_hp, "Turn cap reached");
                break (self.resolve_turn_limit(left_hp, right_hp), true);
            }

            let r = rng.sample();

            caster.tick();

            let ailment_tree = caster.permanent_ailment();
            let ailment_line = ailment_tree.get(r).apply(caster, target, self.registry, rng)?;

            let skill_tree = caster.skill_tree();
            let skill_line = skill_tree.get(r).apply(caster, target, self.registry, rng)?;

            trace!(
                turn = turns,
                caster = caster.name(),
                caster_hp = caster.hp(),
                target_hp = target.hp(),
                ailment = ailment_line.as_deref().unwrap_or(""),
                skill = skill_line.as_deref().unwrap_or(""),
            );
            if self.config.record_log {
                for line in ailment_line.into_iter().chain(skill_line) {
                    log.push(format!("{turns}: {line}"));
                }
            }
            turns += 1;

            if caster.is_down() {
                break (Some(caster_side.opponent()), false);
            }
            if target.is_down() {
                break (Some(caster_side), false);
            }

            std::mem::swap(&mut caster, &mut target);
            caster_side = caster_side.opponent();
        };

        let outcome = BattleOutcome {
            winner,
            turns,
            first_mover,
            capped,
            left_hp: left.hp(),
            right_hp: right.hp(),
            log,
        };
        debug!(
            winner = ?outcome.winner,
            turns,
            "{} vs {} finished",
            left.name(),
            right.name()
        );
        Ok(outcome)
    }

    /// Run `iterations` independent battles, alternating the first mover by
    /// trial parity, and tally the results. Both monsters are hard reset
    /// when the run ends, whether or not it succeeded.
    pub fn execute(
        &self,
        left: &mut Monster,
        right: &mut Monster,
        iterations: u32,
        rng: &mut impl RandomSource,
    ) -> Result<MatchupResult> {
        let started = Instant::now();
        let outcome = self.run_trials(left, right, iterations, rng);

        left.reset(true);
        right.reset(true);

        let result = outcome?;
        if result.capped > 0 {
            warn!(
                capped = result.capped,
                policy = ?self.config.turn_limit,
                "{} vs {}: battles stopped at the turn cap",
                result.left,
                result.right
            );
        }
        info!(
            "{} vs {} -> {}:{} ({} draws, {}[ms])",
            result.left,
            result.right,
            result.left_wins,
            result.right_wins,
            result.draws,
            started.elapsed().as_millis()
        );
        Ok(result)
    }

    fn run_trials(
        &self,
        left: &mut Monster,
        right: &mut Monster,
        iterations: u32,
        rng: &mut impl RandomSource,
    ) -> Result<MatchupResult> {
        let mut result = MatchupResult::new(
            left.initial_template().name.clone(),
            right.initial_template().name.clone(),
        );

        for trial in 0..iterations {
            let outcome = self.fight(left, right, Side::first_mover_for_trial(trial), rng)?;
            result.record(&outcome);
        }

        Ok(result)
    }

    fn resolve_turn_limit(&self, left_hp: i32, right_hp: i32) -> Option<Side> {
        match self.config.turn_limit {
            TurnLimitPolicy::Draw => None,
            TurnLimitPolicy::HigherHealth => match left_hp.cmp(&right_hp) {
                std::cmp::Ordering::Greater => Some(Side::Left),
                std::cmp::Ordering::Less => Some(Side::Right),
                std::cmp::Ordering::Equal => None,
            },
        }
    }
}
