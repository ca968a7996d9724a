/// Stochastic mechanics: unit-interval sources and uniform integer draws.
/// Note: any `rand_core::RngCore` (e.g. `bevy_prng::WyRand`) is a source;
/// tests can swap in `FixedUnit` / `ScriptedUnits` for exact values.
use std::collections::VecDeque;

use bevy_prng::WyRand;
use rand_core::{RngCore, SeedableRng};

use crate::error::{Error, Result};

/// Yields floats in `[0, 1)`.
pub trait UnitSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> UnitSource for R {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        ((self.next_u64() >> 11) as f64) / ((1u64 << 53) as f64)
    }
}

/// Always returns the same value (clamped into `[0, 1)`).
#[derive(Clone, Copy, Debug)]
pub struct FixedUnit(pub f64);

impl UnitSource for FixedUnit {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        unit_clamp(self.0)
    }
}

/// Replays a script of values, then repeats the last one (or 0.0 if empty).
#[derive(Clone, Debug, Default)]
pub struct ScriptedUnits {
    queue: VecDeque<f64>,
    last: f64,
}

impl ScriptedUnits {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self { queue: values.into_iter().collect(), last: 0.0 }
    }
}

impl UnitSource for ScriptedUnits {
    fn next_unit(&mut self) -> f64 {
        if let Some(v) = self.queue.pop_front() {
            self.last = unit_clamp(v);
        }
        self.last
    }
}

#[inline]
fn unit_clamp(u: f64) -> f64 {
    if u.is_nan() { 0.0 } else { u.clamp(0.0, 1.0 - f64::EPSILON) }
}

/// Uniform integer in `[min, max]` inclusive: `floor(u * (max-min+1)) + min`.
/// A reversed pair collapses to `min`.
#[inline]
pub fn uniform_int<S: UnitSource + ?Sized>(src: &mut S, min: u32, max: u32) -> u32 {
    if max <= min {
        return min;
    }
    let span = u64::from(max - min) + 1;
    let off = (src.next_unit() * span as f64).floor() as u64;
    min + off.min(span - 1) as u32
}

/// Deterministic WyRand for tests and replays.
pub fn seeded(seed: u64) -> WyRand {
    WyRand::from_seed(seed.to_le_bytes())
}

/// WyRand seeded from the OS entropy pool.
pub fn from_entropy() -> Result<WyRand> {
    WyRand::try_from_os_rng().map_err(|e| Error::Entropy(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_int_hits_both_ends() {
        assert_eq!(uniform_int(&mut FixedUnit(0.0), 50, 90), 50);
        assert_eq!(uniform_int(&mut FixedUnit(0.999_999), 50, 90), 90);
        assert_eq!(uniform_int(&mut FixedUnit(1.0), 50, 90), 90);
        assert_eq!(uniform_int(&mut FixedUnit(0.5), 7, 7), 7);
    }

    #[test]
    fn seeded_draws_stay_in_range() {
        let mut rng = seeded(42);
        for _ in 0..10_000 {
            let u = rng.next_unit();
            assert!((0.0..1.0).contains(&u));
            let v = uniform_int(&mut rng, 10, 25);
            assert!((10..=25).contains(&v));
        }
    }

    #[test]
    fn script_repeats_last_value() {
        let mut s = ScriptedUnits::new([0.1, 0.7]);
        assert_eq!(s.next_unit(), 0.1);
        assert_eq!(s.next_unit(), 0.7);
        assert_eq!(s.next_unit(), 0.7);
    }
}
