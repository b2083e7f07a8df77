use thiserror::Error;

/// Failure taxonomy for upstream API interaction.
///
/// Every operation surfaces errors as a structured `Result` rather than
/// panicking; the only bounded retry in the crate is the availability
/// poll loop.
#[derive(Debug, Error)]
pub enum Error {
    /// Network/transport-level failure before an HTTP response existed.
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The response body was empty or not JSON.
    #[error("Unable to decode response (HTTP {status})")]
    Decode { status: u16 },

    /// The API answered but reported failure, either `success: false`
    /// or a non-2xx status. Validation details are folded into the
    /// message by the transport.
    #[error("{message}")]
    Api { message: String, status: Option<u16> },

    /// A domain, zone or product lookup yielded no match.
    #[error("{0}")]
    NotFound(String),

    /// Operation intentionally not implemented by the upstream API.
    #[error("{0}")]
    Unsupported(&'static str),

    /// Malformed input, e.g. a DNS record missing type or value.
    #[error("{0}")]
    Validation(String),

    /// The bounded availability poll loop ran out of attempts.
    #[error("{0}")]
    Timeout(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
