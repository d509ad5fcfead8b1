use chrono::{DateTime, TimeZone, Utc};

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Invalid search parameters: {0}")]
    Validation(String),
    #[error("Rate limit exceeded. Reset at {}", .reset.as_deref().unwrap_or("unknown"))]
    RateLimited { reset: Option<String> },
    #[error("Github api responded with status {status}")]
    Upstream { status: u16 },
    #[error("Malformed github api response: {0}")]
    MalformedResponse(String),
    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    /// Parses the `x-ratelimit-reset` value (epoch seconds) of a rate limit error.
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        match self {
            SearchError::RateLimited { reset: Some(reset) } => {
                let timestamp = reset.trim().parse::<i64>().ok()?;
                Utc.timestamp_opt(timestamp, 0).single()
            }
            _ => None,
        }
    }
}
