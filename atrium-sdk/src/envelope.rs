#![forbid(unsafe_code)]

//! Business response envelopes.
//!
//! Every well-formed backend reply wraps its payload in `{code, data, msg}`
//! (paged listings use `{code, total, rows, msg}`). The business code is
//! distinct from the HTTP transport status; a reply without one is a
//! protocol violation.

use serde::Deserialize;

/// Business code of a successful reply.
pub const CODE_OK: i64 = 200;
/// Business code signalling an expired or invalid session.
pub const CODE_UNAUTHORIZED: i64 = 401;

#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub msg: String,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, treating an absent `data` field as a protocol
    /// violation for endpoints that always carry one.
    pub fn into_data(self) -> crate::error::Result<T> {
        self.data
            .ok_or_else(|| crate::error::Error::protocol("envelope carried no data"))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageEnvelope<T> {
    pub code: i64,
    #[serde(default)]
    pub total: i64,
    #[serde(default = "Vec::new")]
    pub rows: Vec<T>,
    #[serde(default)]
    pub msg: String,
}
