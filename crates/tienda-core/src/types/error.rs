use thiserror::Error;

/// Error taxonomy for the whole system.
///
/// The first five variants map one-to-one onto HTTP statuses at the request
/// boundary (400/404/401/403/400); the rest surface as 500 with a generic
/// message.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid input (400)
    #[error("{0}")]
    Validation(String),

    /// Unknown id (404)
    #[error("{0}")]
    NotFound(String),

    /// Bad credentials or missing bearer token (401)
    #[error("{0}")]
    Auth(String),

    /// Valid request, insufficient rights or bad/expired token (403)
    #[error("{0}")]
    Forbidden(String),

    /// Duplicate email, deleting a referenced user (400)
    #[error("{0}")]
    Conflict(String),

    /// Data file read/write failure
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed data file or unserializable state
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Password hashing failure
    #[error("password hashing error: {0}")]
    Password(#[from] bcrypt::BcryptError),

    /// Token issuance failure; verification failures are mapped to
    /// [`Error::Forbidden`] at the request boundary instead
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;
