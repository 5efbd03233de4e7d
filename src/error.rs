//! Error type shared by the library modules.

use crate::models::Channel;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScatterError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("required column `{0}` is missing from the dataset")]
    MissingColumn(String),

    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("channel {0} is fixed and cannot be rebound")]
    ChannelNotRebindable(Channel),

    #[error("dataset has no rows")]
    EmptyTable,
}

pub type Result<T> = std::result::Result<T, ScatterError>;
