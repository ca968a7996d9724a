pub mod bonus;
pub mod control;
pub mod stoch;

pub use control::*;
pub use stoch::*;
