use pose::PoseError;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Script error: {0}")]
    Script(String),

    #[error("Pose error: {0}")]
    Pose(#[from] PoseError),
}

pub type Result<T> = std::result::Result<T, GameError>;
