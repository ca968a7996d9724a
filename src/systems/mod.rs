pub mod sdk;
#[cfg(feature="system-game_reward")]    pub mod game_reward;
#[cfg(feature="system-achievement")]    pub mod achievement;
#[cfg(feature="system-content_policy")] pub mod content_policy;
