//! Achievement system: achievement points → tier → petals.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::mechanics::UnitSource;
use crate::systems::sdk::{Payout, RewardRange};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementTier {
    Small = 0,
    Progress = 1,
    Milestone = 2,
    Ultra = 3,
}

impl AchievementTier {
    pub fn as_str(self) -> &'static str {
        match self {
            AchievementTier::Small => "small",
            AchievementTier::Progress => "progress",
            AchievementTier::Milestone => "milestone",
            AchievementTier::Ultra => "ultra",
        }
    }
}

impl fmt::Display for AchievementTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AchievementTier {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "small" => Ok(AchievementTier::Small),
            "progress" => Ok(AchievementTier::Progress),
            "milestone" => Ok(AchievementTier::Milestone),
            "ultra" => Ok(AchievementTier::Ultra),
            other => Err(Error::UnknownTier(other.to_string())),
        }
    }
}

/// Upper point bounds (inclusive) for the first three tiers.
pub const SMALL_MAX_POINTS: u32 = 25;
pub const PROGRESS_MAX_POINTS: u32 = 100;
pub const MILESTONE_MAX_POINTS: u32 = 500;

/// Tier → payout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementTable {
    pub small: Payout,
    pub progress: Payout,
    pub milestone: Payout,
    pub ultra: Payout,
}

impl Default for AchievementTable {
    fn default() -> Self {
        Self {
            small: Payout::Fixed(10),
            progress: Payout::Range(RewardRange::span(25, 50)),
            milestone: Payout::Range(RewardRange::span(75, 150)),
            ultra: Payout::Fixed(300),
        }
    }
}

impl AchievementTable {
    pub fn payout(&self, tier: AchievementTier) -> Payout {
        match tier {
            AchievementTier::Small => self.small,
            AchievementTier::Progress => self.progress,
            AchievementTier::Milestone => self.milestone,
            AchievementTier::Ultra => self.ultra,
        }
    }
}

pub fn get_achievement_reward<S: UnitSource + ?Sized>(
    table: &AchievementTable,
    tier: AchievementTier,
    rng: &mut S,
) -> u32 {
    table.payout(tier).resolve(rng)
}

#[inline]
pub fn get_achievement_tier_from_points(points: u32) -> AchievementTier {
    if points <= SMALL_MAX_POINTS {
        AchievementTier::Small
    } else if points <= PROGRESS_MAX_POINTS {
        AchievementTier::Progress
    } else if points <= MILESTONE_MAX_POINTS {
        AchievementTier::Milestone
    } else {
        AchievementTier::Ultra
    }
}

/// Prefers a previously granted amount so replays pay the same.
pub fn get_achievement_reward_from_points<S: UnitSource + ?Sized>(
    table: &AchievementTable,
    points: u32,
    existing_reward: Option<u32>,
    rng: &mut S,
) -> u32 {
    if let Some(amount) = existing_reward {
        return amount;
    }
    let tier = get_achievement_tier_from_points(points);
    let amount = get_achievement_reward(table, tier, rng);
    debug!(points, %tier, amount, "achievement reward drawn");
    amount
}
