/// Everything that can go wrong while driving a page controller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("element not found: #{0}")]
    MissingElement(String),

    #[error("invalid match id: {0:?}")]
    InvalidMatchId(String),

    #[error("form field missing: {0}")]
    MissingField(String),

    #[error("server responded with {status}: {body}")]
    Http { status: u16, body: String },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("DOM error: {0}")]
    Dom(String),
}

pub type Result<T> = std::result::Result<T, Error>;
