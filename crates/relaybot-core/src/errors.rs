use std::time::Duration;

/// Core error type.
///
/// Adapter crates map their specific errors into this type so the flows can
/// tell a rate-limit signal apart from every other platform failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("rate limited: retry after {0:?}")]
    RateLimited(Duration),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("external error: {0}")]
    External(String),
}

impl Error {
    /// Wait duration requested by the platform, if this is a rate-limit signal.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::RateLimited(d) => Some(*d),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
