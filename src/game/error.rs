use crate::render::ParseColorError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Color(#[from] ParseColorError),
    #[error("invalid stage: {0}")]
    Config(String),
    #[error("unknown language '{0}'")]
    UnknownLanguage(String),
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("save does not fit the stage: {0}")]
    SaveMismatch(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
