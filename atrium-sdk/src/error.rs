#![forbid(unsafe_code)]

use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified failure taxonomy for the request pipeline and its utilities.
///
/// Callers can match on the kind instead of parsing message strings:
/// guard rejections never reach the network, `SessionExpired` means the
/// credential store has already been invalidated, and `Business` carries the
/// backend's own code/message pair.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("duplicate submission: {0}")]
    DuplicateSubmission(String),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("session expired: {0}")]
    SessionExpired(String),
    #[error("business error (code {code}): {msg}")]
    Business { code: i64, msg: String },
    #[error("transport error: {msg}")]
    Transport { status: Option<u16>, msg: String },
    #[error("cycle detected in tree input at id {0}")]
    CycleDetected(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("crypto error: {0}")]
    Crypto(#[from] atrium_crypto::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl Error {
    pub fn protocol(msg: impl Into<String>) -> Self {
        Error::Protocol(msg.into())
    }
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
    pub fn business(code: i64, msg: impl Into<String>) -> Self {
        Error::Business { code, msg: msg.into() }
    }
    pub fn transport(status: Option<u16>, msg: impl Into<String>) -> Self {
        Error::Transport { status, msg: msg.into() }
    }

    /// The message a user-facing surface would show for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Error::DuplicateSubmission(m)
            | Error::Protocol(m)
            | Error::SessionExpired(m)
            | Error::Config(m) => m.clone(),
            Error::Business { msg, .. } => msg.clone(),
            Error::Transport { msg, .. } => msg.clone(),
            other => other.to_string(),
        }
    }
}
