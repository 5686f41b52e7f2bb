//! Failure taxonomy shared by the HTTP client, the session store and the
//! domain API modules.

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP 401. The session has already been cleared when this is returned.
    #[error("unauthorized: session expired or missing")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
    /// No response arrived: connect failure, timeout or a dropped body.
    #[error("network error: {0}")]
    Network(String),
    /// The backend rejected the request with a message meant for the user.
    #[error("{0}")]
    Validation(String),
    #[error("i/o error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Maps a non-2xx transport status and the server-provided message (if
    /// any) onto the taxonomy.
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        match status.as_u16() {
            401 => Error::Unauthorized,
            403 => Error::Forbidden,
            404 => Error::NotFound,
            code @ 500..=599 => Error::Server {
                status: code,
                message: message.unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("internal server error")
                        .to_string()
                }),
            },
            _ => Error::Validation(message.unwrap_or_else(|| "unknown error".to_string())),
        }
    }

    /// True for failures produced by the HTTP layer rather than local storage
    /// or configuration.
    pub fn is_http(&self) -> bool {
        !matches!(
            self,
            Error::Storage(_) | Error::Serialization(_) | Error::Config(_)
        )
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Config(err.to_string())
    }
}
