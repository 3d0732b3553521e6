use thiserror::Error;

#[derive(Error, Debug)]
pub enum HolidayApiError {
    #[error("holiday API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("holiday API answered with status code {0}")]
    UnexpectedStatus(u16),

    #[error("holiday API response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid holiday API base URL {0:?}")]
    InvalidBaseUrl(String),
}
