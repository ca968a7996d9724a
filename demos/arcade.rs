// demos/arcade.rs
// Run with:
//   RUST_LOG=petal_economy=debug cargo run --example arcade
//   RUST_LOG=debug cargo run --example arcade -- path/to/tuning.json

use petal_economy::genres::arcade::{ArcadeEconomy, ArcadeTuning};
use petal_economy::systems::content_policy::{
    Consent, ContentOwner, ContentRating, OwnerVisibility, PolicySettings, Viewer,
};
use petal_economy::systems::game_reward::GameMetadata;
use tracing_subscriber::EnvFilter;

fn main() -> petal_economy::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let tuning = match std::env::args().nth(1) {
        Some(path) => ArcadeTuning::load(path)?,
        None => ArcadeTuning::default(),
    };
    tuning.validate()?;

    // Site setting would come from the database; assume on.
    let policy = PolicySettings::from_env(true);
    let mut arcade = ArcadeEconomy::from_entropy(tuning, policy)?;

    let meta = GameMetadata {
        combo: Some(30),
        difficulty: Some("hard".into()),
        ..GameMetadata::default()
    };
    let win = arcade.settle_game("memory-match", true, 5000.0, Some(&meta));
    println!("== Game ==");
    println!("win  -> {:?}", win);
    let loss = arcade.settle_game("otaku-beat-em-up", false, 120.0, None);
    println!("loss -> {:?}", loss);

    println!("== Achievements ==");
    for points in [10, 80, 400, 1000] {
        println!("{points:>5} pts -> {} petals", arcade.grant_achievement(points, None));
    }

    println!("== Content ==");
    let owner = ContentOwner { user_id: "artist-1", visibility: OwnerVisibility::On };
    let verified = Viewer::signed_in("fan-7", Consent::new(Some("enabled"), true));
    let anonymous = Viewer::anonymous(Consent::default());
    for rating in [ContentRating::Sfw, ContentRating::Spicy, ContentRating::NsfwHard] {
        println!(
            "{:<18} verified={:?} anonymous={:?}",
            rating.as_str(),
            arcade.visibility(rating, &verified, &owner),
            arcade.visibility(rating, &anonymous, &owner),
        );
    }
    Ok(())
}
