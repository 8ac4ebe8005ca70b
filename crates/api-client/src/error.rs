#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("api base URL is required")]
    MissingBaseUrl,
}

pub type Result<T> = std::result::Result<T, Error>;
