// tests/achievement.rs
use petal_economy::mechanics::stoch::{seeded, FixedUnit};
use petal_economy::systems::achievement::*;
use petal_economy::systems::sdk::{Payout, RewardRange};
use petal_economy::Error;

#[test]
fn tier_thresholds_are_inclusive() {
    let cases = [
        (0, AchievementTier::Small),
        (25, AchievementTier::Small),
        (26, AchievementTier::Progress),
        (100, AchievementTier::Progress),
        (101, AchievementTier::Milestone),
        (500, AchievementTier::Milestone),
        (501, AchievementTier::Ultra),
        (u32::MAX, AchievementTier::Ultra),
    ];
    for (points, tier) in cases {
        assert_eq!(get_achievement_tier_from_points(points), tier, "{points} pts");
    }
}

#[test]
fn fixed_tiers_pay_their_constant() {
    let table = AchievementTable::default();
    let mut rng = seeded(1);
    for _ in 0..100 {
        assert_eq!(get_achievement_reward(&table, AchievementTier::Small, &mut rng), 10);
        assert_eq!(get_achievement_reward(&table, AchievementTier::Ultra, &mut rng), 300);
    }
}

#[test]
fn range_tiers_draw_inside_their_range() {
    let table = AchievementTable::default();
    let mut rng = seeded(99);
    for tier in [AchievementTier::Progress, AchievementTier::Milestone] {
        let (lo, hi) = table.payout(tier).bounds();
        let mut seen_lo = u32::MAX;
        let mut seen_hi = 0;
        for _ in 0..5_000 {
            let v = get_achievement_reward(&table, tier, &mut rng);
            assert!((lo..=hi).contains(&v), "{tier}: {v}");
            seen_lo = seen_lo.min(v);
            seen_hi = seen_hi.max(v);
        }
        assert_eq!((seen_lo, seen_hi), (lo, hi), "{tier} never reached an endpoint");
    }
}

#[test]
fn existing_reward_is_replayed() {
    let table = AchievementTable::default();
    assert_eq!(get_achievement_reward_from_points(&table, 1000, Some(42), &mut FixedUnit(0.0)), 42);
    assert_eq!(get_achievement_reward_from_points(&table, 1000, Some(0), &mut FixedUnit(0.0)), 0);
    assert_eq!(get_achievement_reward_from_points(&table, 1000, None, &mut FixedUnit(0.0)), 300);
    assert_eq!(get_achievement_reward_from_points(&table, 60, None, &mut FixedUnit(0.0)), 25);
    assert_eq!(get_achievement_reward_from_points(&table, 60, None, &mut FixedUnit(0.999)), 50);
}

#[test]
fn table_loads_mixed_payouts() {
    let raw = r#"{"small": 5, "ultra": {"min": 400, "max": 600}}"#;
    let table: AchievementTable = petal_economy::config::from_json_str(raw).unwrap();
    assert_eq!(table.small, Payout::Fixed(5));
    assert_eq!(table.ultra, Payout::Range(RewardRange::new(400, 600).unwrap()));
    assert_eq!(table.progress, AchievementTable::default().progress);

    let bad = r#"{"milestone": {"min": 9, "max": 1}}"#;
    let err = petal_economy::config::from_json_str::<AchievementTable>(bad).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
    assert!(err.to_string().contains("min 9 exceeds max 1"), "{err}");
}

#[test]
fn tier_names_round_trip_through_str() {
    for tier in [
        AchievementTier::Small,
        AchievementTier::Progress,
        AchievementTier::Milestone,
        AchievementTier::Ultra,
    ] {
        assert_eq!(tier.as_str().parse::<AchievementTier>().unwrap(), tier);
    }
    assert!(matches!("legendary".parse::<AchievementTier>(), Err(Error::UnknownTier(_))));
    assert!(AchievementTier::Ultra > AchievementTier::Small);
}
