/// Errors produced by configuration checks and checked geometry helpers.
///
/// Per-tick detection never returns these: missing joints and degenerate
/// limbs degrade to "pose not detected".
#[derive(Debug, thiserror::Error)]
pub enum PoseError {
    #[error("invalid pose config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("unknown character '{0}'")]
    UnknownCharacter(String),

    #[error("zero-length vector in {context}")]
    DegenerateVector { context: &'static str },
}

impl PoseError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        PoseError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PoseError>;
