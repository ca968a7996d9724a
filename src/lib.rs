/*!
`petal_economy`: petal rewards and the adult-content gate for a gamified storefront.

What it does
- Turns a finished mini-game into petals: the game id picks a duration class,
  the class picks a win/lose range, a base is drawn from it and wins stack
  capped performance bonuses (combo, accuracy, waves, difficulty, score).
- Turns achievement points into a tier and the tier into petals, replaying a
  previously granted amount when one is supplied.
- Decides whether a viewer may see adult-rated content from their opt-in
  cookie, verified-adult flag, the operator override and the owner's
  visibility preference.

How to use (call surface only)
- Load or default a `RewardTuning` / `AchievementTable` and `PolicySettings`.
- Call `calculate_game_reward`, `get_achievement_reward_from_points`,
  `resolve_policy` or `should_show_content`, passing a random source where a
  draw is involved (`mechanics::stoch::seeded` / `from_entropy`).
- Or build a `genres::ArcadeEconomy` that owns all of the above.

What it does NOT do
- No persistence, no caps on accumulated balances, no cookie parsing, no
  identity checks. Callers record results and present them.
*/

pub mod config;
pub mod error;
pub mod mechanics;
pub mod systems;
pub mod genres;

pub use error::{Error, Result};

#[cfg(feature = "system-game_reward")]
pub use systems::game_reward::{calculate_game_reward, calculate_game_reward_detailed};
#[cfg(feature = "system-achievement")]
pub use systems::achievement::{
    get_achievement_reward, get_achievement_reward_from_points, get_achievement_tier_from_points,
};
#[cfg(feature = "system-content_policy")]
pub use systems::content_policy::{resolve_policy, should_show_content};
