/// Bonus mechanics: additive petal adjustments from in-game performance.
/// Each helper is independently capped; absent inputs contribute zero.

/// Stepped bonus: `min(floor(value/step) * points, cap)`.
#[inline]
pub fn stepped(value: u32, step: u32, points: u32, cap: u32) -> u32 {
    if step == 0 {
        return 0;
    }
    (value / step).saturating_mul(points).min(cap)
}

/// Combo bonus: every `step` combo hits are worth `points`, up to `cap`.
#[inline]
pub fn combo(combo: u32, step: u32, points: u32, cap: u32) -> u32 {
    stepped(combo, step, points, cap)
}

/// Accuracy bonus: `floor((accuracy - threshold) * scale)` above the threshold.
///
/// Evaluated as exact decimal arithmetic, not the raw IEEE result: with the
/// default knobs 0.9 pays 10 and 1.0 pays 20 (plain f64 math gives 9 and 19).
/// Accuracy above 1.0 counts as 1.0.
#[inline]
pub fn accuracy(accuracy: f64, threshold: f64, scale: f64) -> u32 {
    if !accuracy.is_finite() || accuracy <= threshold {
        return 0;
    }
    let raw = (accuracy.min(1.0) - threshold) * scale;
    (raw + 1e-9).floor().max(0.0) as u32
}

/// Waves-cleared bonus: `min(waves * per_wave, cap)`.
#[inline]
pub fn waves(waves: u32, per_wave: u32, cap: u32) -> u32 {
    waves.saturating_mul(per_wave).min(cap)
}

/// Score bonus: `min(floor(score/step) * points, cap)`. Negative or NaN → 0.
#[inline]
pub fn score(score: f64, step: f64, points: u32, cap: u32) -> u32 {
    if score.is_nan() || score <= 0.0 || step.is_nan() || step <= 0.0 {
        return 0;
    }
    let steps = (score / step).floor().min(f64::from(u32::MAX)) as u32;
    steps.saturating_mul(points).min(cap)
}
