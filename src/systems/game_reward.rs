//! Game reward system: game outcome → petals.
//!
//! A game id is bucketed into a [`DurationClass`], the class picks a win or
//! lose [`RewardRange`], a base amount is drawn from it and, for wins only,
//! performance bonuses are stacked on top. The total is clamped to
//! `[range.min, floor(range.max * overdrive_ratio)]`.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::mechanics::{bonus, control, UnitSource};
use crate::systems::sdk::RewardRange;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationClass {
    #[default]
    Short,
    Medium,
    Long,
}

impl DurationClass {
    pub const ALL: [DurationClass; 3] = [DurationClass::Short, DurationClass::Medium, DurationClass::Long];

    pub fn as_str(self) -> &'static str {
        match self {
            DurationClass::Short => "short",
            DurationClass::Medium => "medium",
            DurationClass::Long => "long",
        }
    }
}

impl fmt::Display for DurationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DurationClass {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "short" => Ok(DurationClass::Short),
            "medium" => Ok(DurationClass::Medium),
            "long" => Ok(DurationClass::Long),
            other => Err(Error::UnknownDurationClass(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Win,
    Lose,
}

impl From<bool> for GameOutcome {
    fn from(did_win: bool) -> Self {
        if did_win { GameOutcome::Win } else { GameOutcome::Lose }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRanges {
    pub win: RewardRange,
    pub lose: RewardRange,
}

impl OutcomeRanges {
    #[inline]
    pub fn get(&self, outcome: GameOutcome) -> RewardRange {
        match outcome {
            GameOutcome::Win => self.win,
            GameOutcome::Lose => self.lose,
        }
    }
}

/// Duration class → win/lose ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTable {
    pub short: OutcomeRanges,
    pub medium: OutcomeRanges,
    pub long: OutcomeRanges,
}

impl Default for RewardTable {
    fn default() -> Self {
        Self {
            short: OutcomeRanges { win: RewardRange::span(50, 90), lose: RewardRange::span(10, 25) },
            medium: OutcomeRanges { win: RewardRange::span(80, 140), lose: RewardRange::span(20, 40) },
            long: OutcomeRanges { win: RewardRange::span(120, 200), lose: RewardRange::span(30, 60) },
        }
    }
}

impl RewardTable {
    pub fn ranges(&self, class: DurationClass) -> &OutcomeRanges {
        match class {
            DurationClass::Short => &self.short,
            DurationClass::Medium => &self.medium,
            DurationClass::Long => &self.long,
        }
    }

    #[inline]
    pub fn range(&self, class: DurationClass, outcome: GameOutcome) -> RewardRange {
        self.ranges(class).get(outcome)
    }
}

/// Game id → duration class. Unknown ids are `Short`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DurationTable(HashMap<String, DurationClass>);

impl Default for DurationTable {
    fn default() -> Self {
        use DurationClass::*;
        [
            ("memory-match", Short),
            ("puzzle-reveal", Short),
            ("petal-collection", Short),
            ("quick-math", Short),
            ("petal-samurai", Medium),
            ("bubble-girl", Medium),
            ("rhythm-beat", Medium),
            ("blossomware", Medium),
            ("otaku-beat-em-up", Long),
            ("maid-cafe-manager", Long),
            ("thigh-coliseum", Long),
        ]
        .into_iter()
        .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, DurationClass)> for DurationTable {
    fn from_iter<I: IntoIterator<Item = (K, DurationClass)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl DurationTable {
    #[inline]
    pub fn classify(&self, game_id: &str) -> DurationClass {
        self.0.get(game_id).copied().unwrap_or_default()
    }

    pub fn insert(&mut self, game_id: impl Into<String>, class: DurationClass) -> Option<DurationClass> {
        self.0.insert(game_id.into(), class)
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

/// Knobs for the win-only performance bonuses.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BonusRules {
    pub combo_step: u32,
    pub combo_points: u32,
    pub combo_cap: u32,
    pub accuracy_threshold: f64,
    pub accuracy_scale: f64,
    pub wave_points: u32,
    pub wave_cap: u32,
    pub hard_bonus: u32,
    pub medium_bonus: u32,
    pub score_step: f64,
    pub score_points: u32,
    pub score_cap: u32,
    /// Ceiling multiplier on the nominal range max.
    pub overdrive_ratio: f64,
}

impl Default for BonusRules {
    fn default() -> Self {
        Self {
            combo_step: 10,
            combo_points: 2,
            combo_cap: 20,
            accuracy_threshold: 0.8,
            accuracy_scale: 100.0,
            wave_points: 3,
            wave_cap: 30,
            hard_bonus: 15,
            medium_bonus: 5,
            score_step: 1000.0,
            score_points: 2,
            score_cap: 10,
            overdrive_ratio: 1.5,
        }
    }
}

impl BonusRules {
    pub fn evaluate(&self, score: f64, meta: Option<&GameMetadata>) -> BonusBreakdown {
        let meta = meta.cloned().unwrap_or_default();
        BonusBreakdown {
            combo: meta
                .combo
                .map_or(0, |c| bonus::combo(c, self.combo_step, self.combo_points, self.combo_cap)),
            accuracy: meta
                .accuracy
                .map_or(0, |a| bonus::accuracy(a, self.accuracy_threshold, self.accuracy_scale)),
            waves: meta
                .waves_cleared
                .map_or(0, |w| bonus::waves(w, self.wave_points, self.wave_cap)),
            difficulty: match meta.difficulty.as_deref() {
                Some("hard") => self.hard_bonus,
                Some("medium") => self.medium_bonus,
                _ => 0,
            },
            score: bonus::score(score, self.score_step, self.score_points, self.score_cap),
        }
    }
}

/// Optional per-game performance bag, as forwarded by the game client.
///
/// Each field parses on its own: a wrong type or out-of-range value reads as
/// `None` (no bonus) without costing the other fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameMetadata {
    #[serde(deserialize_with = "lenient::count")]
    pub combo: Option<u32>,
    #[serde(deserialize_with = "lenient::fraction")]
    pub accuracy: Option<f64>,
    #[serde(deserialize_with = "lenient::count")]
    pub waves_cleared: Option<u32>,
    #[serde(deserialize_with = "lenient::text")]
    pub difficulty: Option<String>,
}

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Non-negative number, floored; fractions like `12.5` read as `12`.
    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n
                .as_f64()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v.floor().min(f64::from(u32::MAX)) as u32),
            _ => None,
        })
    }

    pub fn fraction<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            _ => None,
        })
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            _ => None,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusBreakdown {
    pub combo: u32,
    pub accuracy: u32,
    pub waves: u32,
    pub difficulty: u32,
    pub score: u32,
}

impl BonusBreakdown {
    pub fn total(&self) -> u32 {
        self.combo
            .saturating_add(self.accuracy)
            .saturating_add(self.waves)
            .saturating_add(self.difficulty)
            .saturating_add(self.score)
    }
}

/// Everything that went into one settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardBreakdown {
    pub duration: DurationClass,
    pub outcome: GameOutcome,
    pub range: RewardRange,
    pub base: u32,
    pub bonuses: BonusBreakdown,
    pub ceiling: u32,
    pub total: u32,
}

/// Which side of a range a tuning warning is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeBound {
    Min,
    Max,
}

/// Suspicious but legal tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TuningWarning {
    /// Losing can pay more than winning on this bound.
    LossOutpaysWin { class: DurationClass, bound: RangeBound, win: u32, lose: u32 },
}

/// Static reward configuration, passed to every call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardTuning {
    pub durations: DurationTable,
    pub rewards: RewardTable,
    pub bonuses: BonusRules,
}

impl RewardTuning {
    /// Hard errors for unusable knobs; warnings (logged, never corrected)
    /// for loss ranges that outpay win ranges.
    pub fn validate(&self) -> Result<Vec<TuningWarning>> {
        let r = self.bonuses.overdrive_ratio;
        if !r.is_finite() || r < 1.0 {
            return Err(Error::InvalidOverdrive(r));
        }

        let mut warnings = Vec::new();
        for class in DurationClass::ALL {
            let OutcomeRanges { win, lose } = *self.rewards.ranges(class);
            if win.min() < lose.min() {
                warnings.push(TuningWarning::LossOutpaysWin {
                    class,
                    bound: RangeBound::Min,
                    win: win.min(),
                    lose: lose.min(),
                });
            }
            if win.max() < lose.max() {
                warnings.push(TuningWarning::LossOutpaysWin {
                    class,
                    bound: RangeBound::Max,
                    win: win.max(),
                    lose: lose.max(),
                });
            }
        }
        for w in &warnings {
            let TuningWarning::LossOutpaysWin { class, bound, win, lose } = w;
            warn!(%class, ?bound, win, lose, "loss range outpays win range");
        }
        Ok(warnings)
    }
}

/// Petals for one finished game. See [`calculate_game_reward_detailed`].
pub fn calculate_game_reward<S: UnitSource + ?Sized>(
    tuning: &RewardTuning,
    game_id: &str,
    did_win: bool,
    score: f64,
    metadata: Option<&GameMetadata>,
    rng: &mut S,
) -> u32 {
    calculate_game_reward_detailed(tuning, game_id, did_win, score, metadata, rng).total
}

/// Classify, draw a base, add win-only bonuses, clamp to the overdrive ceiling.
pub fn calculate_game_reward_detailed<S: UnitSource + ?Sized>(
    tuning: &RewardTuning,
    game_id: &str,
    did_win: bool,
    score: f64,
    metadata: Option<&GameMetadata>,
    rng: &mut S,
) -> RewardBreakdown {
    let duration = tuning.durations.classify(game_id);
    let outcome = GameOutcome::from(did_win);
    let range = tuning.rewards.range(duration, outcome);

    let base = range.draw(rng);
    let bonuses = match outcome {
        GameOutcome::Win => tuning.bonuses.evaluate(score, metadata),
        GameOutcome::Lose => BonusBreakdown::default(),
    };
    let ceiling = range.ceiling(tuning.bonuses.overdrive_ratio);
    let total = control::clamp_reward(base.saturating_add(bonuses.total()), range.min(), ceiling);

    debug!(game_id, %duration, ?outcome, base, bonus = bonuses.total(), ceiling, total, "game reward settled");

    RewardBreakdown { duration, outcome, range, base, bonuses, ceiling, total }
}
