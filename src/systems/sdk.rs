// src/systems/sdk.rs

//! # Systems SDK
//!
//! Shared building blocks for **systems** (self-contained decision units such
//! as game rewards, achievement grants and the content gate). A *system* owns
//! its own tuning tables and exposes pure functions over them; callers pass
//! the tables in explicitly instead of reaching for globals.
//!
//! ## When to create a new system
//! Create a system when a rule can be evaluated in isolation with a clear set
//! of inputs/outputs, e.g.:
//! - **game_reward**: game outcome → petals
//! - **achievement**: achievement points → petals
//! - **content_policy**: viewer consent + owner preference → visible?
//!
//! Systems should be **genre-neutral**; genres compose systems, not vice versa.
//!
//! ## What this SDK gives you
//! - [`RewardRange`]: an inclusive `[min, max]` petal span whose `min <= max`
//!   invariant is checked on construction *and* on deserialization.
//! - [`Payout`]: either a fixed amount or a range to draw from.
//!
//! ## Determinism & purity
//! - Draws go through [`UnitSource`]; inject a seeded `WyRand` or a
//!   `FixedUnit` in tests, an OS-seeded `WyRand` in production.
//! - Systems never log at `info` or above on the hot path. Use `debug!`/`trace!`.
//!
//! ## Testing a system
//! - Integration tests at `tests/<system>.rs`. Prefer seeded loops that
//!   assert bounds over exact draws.

// -----------------------------------------------------------------------------
// Implementation
// -----------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mechanics::{control, stoch, UnitSource};

/// Inclusive petal range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RangeRepr")]
pub struct RewardRange {
    min: u32,
    max: u32,
}

#[derive(Deserialize)]
struct RangeRepr {
    min: u32,
    max: u32,
}

impl TryFrom<RangeRepr> for RewardRange {
    type Error = Error;
    fn try_from(r: RangeRepr) -> Result<Self> {
        Self::new(r.min, r.max)
    }
}

impl RewardRange {
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min > max {
            return Err(Error::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Unchecked constructor for built-in tables.
    pub(crate) const fn span(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn min(&self) -> u32 { self.min }
    #[inline]
    pub fn max(&self) -> u32 { self.max }

    #[inline]
    pub fn contains(&self, v: u32) -> bool {
        v >= self.min && v <= self.max
    }

    /// Uniform draw in `[min, max]`.
    #[inline]
    pub fn draw<S: UnitSource + ?Sized>(&self, src: &mut S) -> u32 {
        stoch::uniform_int(src, self.min, self.max)
    }

    /// Highest amount bonuses may lift a draw to.
    #[inline]
    pub fn ceiling(&self, overdrive_ratio: f64) -> u32 {
        control::overdrive_ceiling(self.max, overdrive_ratio)
    }
}

/// Fixed amount or a range to draw from.
///
/// Serialized untagged: `10` or `{"min": 25, "max": 50}`. A reversed range
/// fails with the `InvalidRange` message rather than a bare variant mismatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, try_from = "PayoutRepr")]
pub enum Payout {
    Fixed(u32),
    Range(RewardRange),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PayoutRepr {
    Fixed(u32),
    Range(RangeRepr),
}

impl TryFrom<PayoutRepr> for Payout {
    type Error = Error;
    fn try_from(r: PayoutRepr) -> Result<Self> {
        match r {
            PayoutRepr::Fixed(v) => Ok(Payout::Fixed(v)),
            PayoutRepr::Range(r) => RewardRange::try_from(r).map(Payout::Range),
        }
    }
}

impl Payout {
    #[inline]
    pub fn resolve<S: UnitSource + ?Sized>(&self, src: &mut S) -> u32 {
        match self {
            Payout::Fixed(v) => *v,
            Payout::Range(r) => r.draw(src),
        }
    }

    /// Smallest and largest amount this payout can produce.
    pub fn bounds(&self) -> (u32, u32) {
        match self {
            Payout::Fixed(v) => (*v, *v),
            Payout::Range(r) => (r.min(), r.max()),
        }
    }
}
