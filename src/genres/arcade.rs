// src/genres/arcade.rs
#![cfg(feature = "genre-arcade")]

//! Arcade genre: the storefront's mini-game hub.
//!
//! Coordinates neutral systems:
//! - game_reward     → petals for a finished game
//! - achievement     → petals for unlocked achievements
//! - content_policy  → whether adult-rated game art may be shown
//!
//! [`ArcadeEconomy`] owns the tuning, the policy switches and a random
//! source, so a request handler only forwards primitive inputs. The systems
//! stay callable directly for anyone who wants to manage those themselves.

use std::path::Path;

use bevy_prng::WyRand;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config;
use crate::error::Result;
use crate::mechanics::{stoch, UnitSource};
use crate::systems::achievement::{self as ach, AchievementTable, AchievementTier};
use crate::systems::content_policy::{
    self as cp, Consent, ContentOwner, ContentRating, PolicyDecision, PolicySettings, Viewer,
    Visibility,
};
use crate::systems::game_reward::{self as gr, GameMetadata, RewardBreakdown, RewardTuning, TuningWarning};

/// Every static table the arcade needs. Missing sections fall back to defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeTuning {
    pub games: RewardTuning,
    pub achievements: AchievementTable,
}

impl ArcadeTuning {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        config::from_json_str(raw)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let tuning: Self = config::load_json(path)?;
        info!(path = %path.display(), games = tuning.games.durations.len(), "arcade tuning loaded");
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<Vec<TuningWarning>> {
        self.games.validate()
    }
}

pub struct ArcadeEconomy<R: UnitSource = WyRand> {
    tuning: ArcadeTuning,
    policy: PolicySettings,
    rng: R,
}

impl ArcadeEconomy<WyRand> {
    /// Production setup: OS-seeded RNG.
    pub fn from_entropy(tuning: ArcadeTuning, policy: PolicySettings) -> Result<Self> {
        Ok(Self::new(tuning, policy, stoch::from_entropy()?))
    }

    /// Reproducible setup for tests and replays.
    pub fn seeded(tuning: ArcadeTuning, policy: PolicySettings, seed: u64) -> Self {
        Self::new(tuning, policy, stoch::seeded(seed))
    }
}

impl<R: UnitSource> ArcadeEconomy<R> {
    pub fn new(tuning: ArcadeTuning, policy: PolicySettings, rng: R) -> Self {
        Self { tuning, policy, rng }
    }

    pub fn tuning(&self) -> &ArcadeTuning { &self.tuning }
    pub fn policy(&self) -> &PolicySettings { &self.policy }

    /// Swap the site switches (e.g. after the admin toggles content).
    pub fn set_policy(&mut self, policy: PolicySettings) {
        self.policy = policy;
    }

    pub fn settle_game(
        &mut self,
        game_id: &str,
        did_win: bool,
        score: f64,
        metadata: Option<&GameMetadata>,
    ) -> RewardBreakdown {
        gr::calculate_game_reward_detailed(&self.tuning.games, game_id, did_win, score, metadata, &mut self.rng)
    }

    pub fn achievement_reward(&mut self, tier: AchievementTier) -> u32 {
        ach::get_achievement_reward(&self.tuning.achievements, tier, &mut self.rng)
    }

    pub fn grant_achievement(&mut self, points: u32, existing_reward: Option<u32>) -> u32 {
        ach::get_achievement_reward_from_points(&self.tuning.achievements, points, existing_reward, &mut self.rng)
    }

    pub fn resolve(&self, consent: &Consent<'_>) -> PolicyDecision {
        cp::resolve_policy(consent, self.policy.global_override)
    }

    pub fn visibility(&self, rating: ContentRating, viewer: &Viewer<'_>, owner: &ContentOwner<'_>) -> Visibility {
        cp::evaluate_visibility(rating, viewer, owner, &self.policy)
    }

    pub fn may_view(&self, rating: ContentRating, viewer: &Viewer<'_>, owner: &ContentOwner<'_>) -> bool {
        self.visibility(rating, viewer, owner).is_visible()
    }
}
