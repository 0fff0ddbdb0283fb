use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to decode dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dataset contains no records")]
    EmptyDataset,

    #[error("failed to write markup: {0}")]
    Markup(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
