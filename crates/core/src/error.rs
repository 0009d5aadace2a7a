use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum DashError {
    #[error("cannot add stream: limit of {max} streams reached")]
    CapacityExceeded { max: usize },

    #[error("cannot remove stream: at least {min} stream must remain")]
    MinimumStreamsViolation { min: usize },

    #[error("unknown stream id {0}")]
    UnknownStream(u32),

    #[error("config error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl DashError {
    /// `true` for the rejections that are reported to the user through the
    /// alert queue rather than only logged.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::CapacityExceeded { .. } | Self::MinimumStreamsViolation { .. }
        )
    }
}

pub type Result<T, E = DashError> = std::result::Result<T, E>;
