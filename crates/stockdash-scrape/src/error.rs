use reqwest::StatusCode;

/// Everything that can go wrong between sending a request and holding a parsed table.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with {status}")]
    Status { url: String, status: StatusCode },

    #[error("no <table> found in the page")]
    NoTable,

    #[error("failed to parse page: {0}")]
    Parse(String),

    #[error("page contained no {0}")]
    Empty(&'static str),
}

impl ScrapeError {
    /// Short machine-readable tag, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            ScrapeError::Network { .. } => "network",
            ScrapeError::Status { .. } => "status",
            ScrapeError::NoTable => "no_table",
            ScrapeError::Parse(_) => "parse",
            ScrapeError::Empty(_) => "empty",
        }
    }

    /// True when the failure happened before any HTML was read.
    pub fn is_upstream(&self) -> bool {
        matches!(self, ScrapeError::Network { .. } | ScrapeError::Status { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
