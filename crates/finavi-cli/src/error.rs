use finavi_core::{ApiError, HistoryError, ValidationError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("cannot format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Api(ApiError::Application { .. }) => 3,
            Self::Api(ApiError::InvalidUrl { .. }) => 2,
            Self::Api(_) => 4,
            Self::History(_) => 5,
            Self::Timestamp(_) | Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}
