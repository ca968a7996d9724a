/// Control mechanics: reward floors and ceilings.

/// Overdrive ceiling: `floor(max * ratio)`, never below `max`.
#[inline]
pub fn overdrive_ceiling(max: u32, ratio: f64) -> u32 {
    let raw = (f64::from(max) * ratio).floor();
    if raw.is_finite() {
        (raw.min(f64::from(u32::MAX)) as u32).max(max)
    } else {
        max
    }
}

/// Clamp a raw reward into `[floor, ceiling]`.
#[inline]
pub fn clamp_reward(raw: u32, floor: u32, ceiling: u32) -> u32 {
    raw.clamp(floor, ceiling.max(floor))
}
