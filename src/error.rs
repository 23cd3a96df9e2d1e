//! Standard errors used by all functions in the crate.

use std::fmt;

/// Error collecting all possible failures of the Heidelpay client.
///
/// Note that a transaction rejected by the payment gateway (`PROCESSING.RESULT=NOK`)
/// is **not** an error: the gateway answered, and the answer is available as a
/// [`Response`](crate::apis::response::Response) whose `is_error()` returns `true`.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Reqwest error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    /// The payment gateway answered with a non successful HTTP status.
    #[error("{0}")]
    ApiError(#[from] ApiError),
    /// The request is missing mandatory data and cannot be sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// The gateway response could not be interpreted.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    /// The `CRITERION.SECRET` returned by the gateway does not match the expected one.
    ///
    /// This usually means the response was not generated for the transaction the caller expected.
    #[error("Security hash of the response does not match")]
    SecurityHashMismatch,
    /// Catch-all variant for unexpected errors.
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<reqwest_middleware::Error> for Error {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(e) => Error::HttpError(e),
            reqwest_middleware::Error::Middleware(e) => {
                e.downcast::<Error>().unwrap_or_else(Error::Other)
            }
        }
    }
}

impl From<Error> for reqwest_middleware::Error {
    fn from(e: Error) -> Self {
        reqwest_middleware::Error::Middleware(e.into())
    }
}

/// HTTP level failure returned by the payment gateway.
#[derive(thiserror::Error, Debug)]
pub struct ApiError {
    /// HTTP status returned by the server.
    pub status: u16,
    /// Canonical reason of the HTTP status, if known.
    pub title: String,
    /// Body returned by the server, if any.
    pub detail: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Heidelpay HTTP error {}: {}", self.status, self.title)?;

        if let Some(ref detail) = self.detail {
            write!(f, "\nAdditional details: {}", detail)?;
        }

        Ok(())
    }
}
