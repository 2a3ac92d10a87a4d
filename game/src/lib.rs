//! Headless "Super Fireman": flames drift towards the players, who put them
//! out with the characters they transform into.

pub mod config;
pub mod error;
pub mod replay;
pub mod runtime;
pub mod script;

pub use config::{ArenaConfig, GameConfig, RulesConfig, WaveConfig};
pub use error::{GameError, Result};
pub use replay::ReplaySummary;
pub use runtime::{FiremanGame, Flame, GameStatus, TickReport};
pub use script::ScriptedSkeleton;
