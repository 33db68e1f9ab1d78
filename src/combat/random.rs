//! Random-source seam for the battle engine.
//!
//! Battles draw one uniform sample per turn; a few skills also roll dice or
//! pick among options. Production runs wrap a `rand` generator, tests replay
//! a fixed script.

use rand::Rng;

/// Source of every random decision a battle makes.
pub trait RandomSource {
    /// Uniform sample in [0, 1).
    fn sample(&mut self) -> f64;

    /// Uniform die roll in 1..=6.
    fn roll_d6(&mut self) -> u8;

    /// Uniform index in 0..len. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Adapts any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn sample(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn roll_d6(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays fixed sequences, cycling each one when exhausted.
///
/// An empty sequence yields `0.0`, a die of `1` and index `0` respectively.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    samples: Vec<f64>,
    dice: Vec<u8>,
    picks: Vec<usize>,
    sample_pos: usize,
    dice_pos: usize,
    pick_pos: usize,
}

impl ScriptedSource {
    pub fn new(samples: Vec<f64>) -> Self {
        Self {
            samples,
            ..Default::default()
        }
    }

    pub fn with_dice(mut self, dice: Vec<u8>) -> Self {
        self.dice = dice;
        self
    }

    pub fn with_picks(mut self, picks: Vec<usize>) -> Self {
        self.picks = picks;
        self
    }

    /// Number of samples drawn so far.
    pub fn samples_drawn(&self) -> usize {
        self.sample_pos
    }

    fn next<T: Copy>(values: &[T], pos: &mut usize, fallback: T) -> T {
        if values.is_empty() {
            return fallback;
        }
        let value = values[*pos % values.len()];
        *pos += 1;
        value
    }
}

impl RandomSource for ScriptedSource {
    fn sample(&mut self) -> f64 {
        Self::next(&self.samples, &mut self.sample_pos, 0.0)
    }

    fn roll_d6(&mut self) -> u8 {
        Self::next(&self.dice, &mut self.dice_pos, 1)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        Self::next(&self.picks, &mut self.pick_pos, 0) % len.max(1)
    }
}
