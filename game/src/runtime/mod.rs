pub mod core;
pub mod flame;
pub mod waves;

pub use self::core::{FiremanGame, GameStatus, TickReport};
pub use flame::Flame;
pub use waves::{WaveParams, WaveSpawner};
