use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can happen while building or sending requests. None of these
/// escape the endpoint methods on `Client`; they are turned into an `Envelope`
/// at that boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// We couldn't parse a URL, for example if the base URL was invalid.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// We couldn't talk to the server at all, for example because it was
    /// offline or the request was blocked.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server sent back something that wasn't the JSON we expected.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A form declared a method that isn't an HTTP verb.
    #[error("invalid HTTP method: {0:?}")]
    Method(String),
}
