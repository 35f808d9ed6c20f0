use thiserror::Error;

/// Errors that escape the client's call surface.
///
/// Ordinary HTTP failures do not appear here: a non-2xx response is reported
/// through [`crate::client::CallStatus`] (or an empty read sentinel) so the
/// caller can decide what to do with the status code. Only transport-level
/// failures, bad configuration, and broken event streams are errors.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network, DNS, TLS, or body-decoding failure from the HTTP layer.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("configuration error: {detail}")]
    Config { detail: String },

    /// A live-update stream could not be opened or broke mid-stream.
    #[error("stream error: {detail}")]
    Stream { detail: String },
}

impl ClientError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn stream(detail: impl Into<String>) -> Self {
        Self::Stream {
            detail: detail.into(),
        }
    }
}
