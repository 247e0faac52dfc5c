use thiserror::Error;

/// Failure of a single request attempt before a status was received.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),

    /// The request could not be built or its redirects could not be followed.
    #[error("invalid request: {0}")]
    Invalid(String),
}

impl TransportError {
    /// Only these are retried by the fetcher.
    pub fn is_transient(&self) -> bool {
        !matches!(self, TransportError::Invalid(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else if err.is_builder() || err.is_redirect() {
            TransportError::Invalid(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("unexpected status code {code} from {url}\nResponse body: {body}")]
    BadStatus { url: String, code: u16, body: String },

    #[error("request to {url} failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        #[source]
        source: TransportError,
    },

    #[error("request to {url} was rejected without retry: {source}")]
    Rejected {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("failed to decode JSON response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("leaderboard request failed: {0}")]
    Upstream(#[from] FetchError),

    #[error("no users found in response for rank {rank}")]
    EmptyResult { rank: u64 },

    #[error("invalid leaderboard URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("percentile #{index} ({value}) must be in (0, 1]")]
    InvalidPercentile { index: usize, value: f64 },

    #[error("failed to get total participants: {0}")]
    TotalsUnavailable(#[source] ClientError),

    #[error("failed to get total points for rank {rank} (top {percentile}): {source}")]
    LookupFailed {
        rank: u64,
        percentile: f64,
        #[source]
        source: ClientError,
    },

    #[error("lookup task for rank {rank} (top {percentile}) did not complete: {message}")]
    TaskAborted {
        rank: u64,
        percentile: f64,
        message: String,
    },
}

impl ResolveError {
    /// Rank the failure refers to, if it came from a rank lookup.
    pub fn rank(&self) -> Option<u64> {
        match self {
            ResolveError::LookupFailed { rank, .. } | ResolveError::TaskAborted { rank, .. } => {
                Some(*rank)
            }
            _ => None,
        }
    }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
