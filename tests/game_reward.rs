// tests/game_reward.rs
use petal_economy::mechanics::stoch::{seeded, FixedUnit, ScriptedUnits};
use petal_economy::systems::game_reward::*;
use petal_economy::systems::sdk::RewardRange;
use petal_economy::{calculate_game_reward, Error};

const SEEDS: u64 = 2_000;

fn hard_combo() -> GameMetadata {
    GameMetadata {
        combo: Some(30),
        difficulty: Some("hard".into()),
        ..GameMetadata::default()
    }
}

fn loaded() -> GameMetadata {
    GameMetadata {
        combo: Some(500),
        accuracy: Some(1.0),
        waves_cleared: Some(99),
        difficulty: Some("hard".into()),
    }
}

#[test]
fn losses_stay_inside_overdrive_window() {
    let t = RewardTuning::default();
    let mut rng = seeded(7);
    for game in ["memory-match", "petal-samurai", "otaku-beat-em-up", "no-such-game"] {
        let class = t.durations.classify(game);
        let lose = t.rewards.range(class, GameOutcome::Lose);
        for _ in 0..SEEDS {
            let r = calculate_game_reward(&t, game, false, 99_999.0, Some(&loaded()), &mut rng);
            assert!(r >= lose.min() && r <= lose.max() * 3 / 2, "{game}: {r}");
        }
    }
}

#[test]
fn losses_never_collect_bonuses() {
    let t = RewardTuning::default();
    let b = calculate_game_reward_detailed(&t, "memory-match", false, 99_999.0, Some(&loaded()), &mut FixedUnit(0.0));
    assert_eq!(b.bonuses, BonusBreakdown::default());
    assert_eq!(b.total, 10);
}

#[test]
fn plain_win_stays_inside_nominal_range() {
    let t = RewardTuning::default();
    let mut rng = seeded(11);
    for game in ["memory-match", "rhythm-beat", "maid-cafe-manager"] {
        let win = t.rewards.range(t.durations.classify(game), GameOutcome::Win);
        for _ in 0..SEEDS {
            let r = calculate_game_reward(&t, game, true, 0.0, None, &mut rng);
            assert!(win.contains(r), "{game}: {r}");
        }
    }
}

#[test]
fn unknown_games_are_short() {
    let t = RewardTuning::default();
    for _ in 0..3 {
        assert_eq!(t.durations.classify("definitely-not-a-game"), DurationClass::Short);
    }
    let b = calculate_game_reward_detailed(&t, "", true, 0.0, None, &mut FixedUnit(0.0));
    assert_eq!(b.duration, DurationClass::Short);
    assert_eq!(b.range, t.rewards.short.win);
}

#[test]
fn memory_match_scenario() {
    let t = RewardTuning::default();
    assert_eq!(t.durations.classify("memory-match"), DurationClass::Short);

    let low = calculate_game_reward_detailed(&t, "memory-match", true, 5000.0, Some(&hard_combo()), &mut FixedUnit(0.0));
    assert_eq!(low.base, 50);
    assert_eq!(
        low.bonuses,
        BonusBreakdown { combo: 6, accuracy: 0, waves: 0, difficulty: 15, score: 10 }
    );
    assert_eq!(low.ceiling, 135);
    assert_eq!(low.total, 81);

    let high = calculate_game_reward_detailed(&t, "memory-match", true, 5000.0, Some(&hard_combo()), &mut FixedUnit(0.999_999));
    assert_eq!(high.base, 90);
    assert_eq!(high.total, 121);

    let mut rng = seeded(3);
    for _ in 0..SEEDS {
        let r = calculate_game_reward(&t, "memory-match", true, 5000.0, Some(&hard_combo()), &mut rng);
        assert!((81..=135).contains(&r), "{r}");
    }
}

#[test]
fn stacked_bonuses_hit_the_ceiling() {
    let t = RewardTuning::default();
    let b = calculate_game_reward_detailed(&t, "otaku-beat-em-up", true, 1e9, Some(&loaded()), &mut FixedUnit(0.5));
    assert_eq!(b.bonuses.total(), 20 + 20 + 30 + 15 + 10);
    assert_eq!(b.ceiling, 300);
    assert_eq!(b.total, 160 + 95);

    let top = calculate_game_reward_detailed(&t, "otaku-beat-em-up", true, 1e9, Some(&loaded()), &mut FixedUnit(0.999));
    assert_eq!(top.total, 200 + 95);
}

#[test]
fn metadata_fields_contribute_independently() {
    let rules = BonusRules::default();
    let waves = GameMetadata { waves_cleared: Some(4), ..GameMetadata::default() };
    assert_eq!(rules.evaluate(0.0, Some(&waves)).total(), 12);

    let medium = GameMetadata { difficulty: Some("medium".into()), ..GameMetadata::default() };
    assert_eq!(rules.evaluate(0.0, Some(&medium)).difficulty, 5);

    let odd = GameMetadata { difficulty: Some("HARD".into()), accuracy: Some(0.5), ..GameMetadata::default() };
    assert_eq!(rules.evaluate(0.0, Some(&odd)).total(), 0);

    assert_eq!(rules.evaluate(-5.0, None).total(), 0);
    assert_eq!(rules.evaluate(2500.0, None).score, 4);
}

#[test]
fn combo_bonus_monotone_and_capped() {
    let rules = BonusRules::default();
    let mut prev = 0;
    for combo in 0..=100 {
        let meta = GameMetadata { combo: Some(combo), ..GameMetadata::default() };
        let c = rules.evaluate(0.0, Some(&meta)).combo;
        assert!(c >= prev);
        prev = c;
    }
    assert_eq!(prev, 20);
    let meta = GameMetadata { combo: Some(10_000), ..GameMetadata::default() };
    assert_eq!(rules.evaluate(0.0, Some(&meta)).combo, 20);
}

#[test]
fn metadata_parses_camel_case_and_ignores_unknowns() {
    let meta: GameMetadata =
        serde_json::from_str(r#"{"combo": 12, "wavesCleared": 3, "difficulty": "hard", "skin": "sakura"}"#).unwrap();
    assert_eq!(meta.combo, Some(12));
    assert_eq!(meta.waves_cleared, Some(3));
    assert_eq!(meta.accuracy, None);
}

#[test]
fn tuning_loads_partial_json() {
    let raw = r#"{
        "durations": {"memory-match": "long", "new-game": "medium"},
        "bonuses": {"overdriveRatio": 2.0}
    }"#;
    let t: RewardTuning = petal_economy::config::from_json_str(raw).unwrap();
    assert_eq!(t.durations.classify("memory-match"), DurationClass::Long);
    assert_eq!(t.durations.classify("petal-samurai"), DurationClass::Short);
    assert_eq!(t.bonuses.overdrive_ratio, 2.0);
    assert_eq!(t.bonuses.combo_cap, 20);
    assert_eq!(t.rewards, RewardTable::default());
    assert!(t.validate().unwrap().is_empty());
}

#[test]
fn reversed_range_rejected_on_load() {
    let raw = r#"{"rewards": {
        "short":  {"win": {"min": 90, "max": 50}, "lose": {"min": 10, "max": 25}},
        "medium": {"win": {"min": 80, "max": 140}, "lose": {"min": 20, "max": 40}},
        "long":   {"win": {"min": 120, "max": 200}, "lose": {"min": 30, "max": 60}}
    }}"#;
    let err = petal_economy::config::from_json_str::<RewardTuning>(raw).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
    assert!(matches!(RewardRange::new(9, 3), Err(Error::InvalidRange { min: 9, max: 3 })));
}

#[test]
fn inverted_win_lose_is_flagged_not_fixed() {
    let mut t = RewardTuning::default();
    t.rewards.medium.lose = RewardRange::new(100, 200).unwrap();
    let warnings = t.validate().unwrap();
    assert_eq!(
        warnings,
        vec![
            TuningWarning::LossOutpaysWin { class: DurationClass::Medium, bound: RangeBound::Min, win: 80, lose: 100 },
            TuningWarning::LossOutpaysWin { class: DurationClass::Medium, bound: RangeBound::Max, win: 140, lose: 200 },
        ]
    );
    assert_eq!(t.rewards.medium.lose, RewardRange::new(100, 200).unwrap());

    let b = calculate_game_reward_detailed(&t, "petal-samurai", false, 0.0, None, &mut FixedUnit(0.0));
    assert_eq!(b.total, 100);
}

#[test]
fn bad_overdrive_is_an_error() {
    let mut t = RewardTuning::default();
    t.bonuses.overdrive_ratio = 0.5;
    assert!(matches!(t.validate(), Err(Error::InvalidOverdrive(_))));
    t.bonuses.overdrive_ratio = f64::NAN;
    assert!(t.validate().is_err());
}

#[test]
fn scripted_draws_walk_the_range() {
    let t = RewardTuning::default();
    let mut src = ScriptedUnits::new([0.0, 0.5, 0.99]);
    let got: Vec<u32> = (0..3)
        .map(|_| calculate_game_reward(&t, "memory-match", false, 0.0, None, &mut src))
        .collect();
    assert_eq!(got, vec![10, 18, 25]);
}

#[test]
fn breakdown_serializes_for_the_ledger() {
    let t = RewardTuning::default();
    let b = calculate_game_reward_detailed(&t, "memory-match", true, 0.0, None, &mut FixedUnit(0.0));
    let v = serde_json::to_value(b).unwrap();
    assert_eq!(v["duration"], "short");
    assert_eq!(v["outcome"], "win");
    assert_eq!(v["total"], 50);
    assert_eq!(v["range"]["max"], 90);
}

#[test]
fn duration_class_names() {
    assert_eq!("medium".parse::<DurationClass>().unwrap(), DurationClass::Medium);
    assert!(matches!("epic".parse::<DurationClass>(), Err(Error::UnknownDurationClass(_))));
    assert_eq!(DurationClass::Long.to_string(), "long");
}

#[test]
fn bad_metadata_fields_only_drop_their_own_bonus() {
    let rules = BonusRules::default();

    let meta: GameMetadata = serde_json::from_str(r#"{"combo": 30, "difficulty": 3}"#).unwrap();
    assert_eq!(meta.combo, Some(30));
    assert_eq!(meta.difficulty, None);
    let b = rules.evaluate(0.0, Some(&meta));
    assert_eq!((b.combo, b.difficulty), (6, 0));

    let meta: GameMetadata = serde_json::from_str(r#"{"combo": 30, "accuracy": "high"}"#).unwrap();
    assert_eq!((meta.combo, meta.accuracy), (Some(30), None));

    let meta: GameMetadata = serde_json::from_str(r#"{"combo": -3, "difficulty": "hard"}"#).unwrap();
    assert_eq!(meta.combo, None);
    assert_eq!(rules.evaluate(0.0, Some(&meta)).total(), 15);

    let meta: GameMetadata =
        serde_json::from_str(r#"{"combo": 12.5, "wavesCleared": 4.9, "accuracy": null, "difficulty": "hard"}"#).unwrap();
    assert_eq!(meta.combo, Some(12));
    assert_eq!(meta.waves_cleared, Some(4));
    assert_eq!(meta.accuracy, None);

    let meta: GameMetadata = serde_json::from_str(r#"{"combo": [1, 2], "wavesCleared": {"n": 2}}"#).unwrap();
    assert_eq!(meta, GameMetadata::default());
}

#[test]
fn accuracy_pays_decimal_not_float_result() {
    let rules = BonusRules::default();
    let at = |a: f64| rules.evaluate(0.0, Some(&GameMetadata { accuracy: Some(a), ..GameMetadata::default() })).accuracy;
    assert_eq!(at(0.9), 10);
    assert_eq!(at(1.0), 20);
    assert_eq!(at(0.8), 0);
}
