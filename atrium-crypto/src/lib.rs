//!
//! Atrium cryptography primitives (unsafe-forbid, pure Rust).
//! - AEAD: AES-256-GCM body cipher with zeroizing data keys
//! - Seal: per-request data keys sealed to a recipient X25519 public key
//!   (ephemeral ECDH + HKDF-SHA256 + AES-256-GCM), base64 wire form
//!
//! Every data key is generated fresh for a single request and dropped
//! afterwards; nothing in this crate persists key material.
#![forbid(unsafe_code)]

/// Authenticated encryption (AES-256-GCM) utilities.
pub mod aead;
/// Sealed-key envelopes for the `encrypt-key` request header.
pub mod seal;

/// Error type for cryptographic operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("Cryptographic operation failed: {0}")]
    /// Cryptographic operation failed
    Crypto(String),
    #[error("Invalid key: {0}")]
    /// Invalid key material or format
    InvalidKey(String),
    #[error("Malformed envelope: {0}")]
    /// Sealed envelope does not have the expected shape
    Envelope(String),
}

/// Convenient Result alias for this crate.
pub type Result<T> = core::result::Result<T, Error>;

pub use aead::{BodyCipher, CipherSuite, DataKey};
pub use seal::{open_data_key, seal_data_key, RecipientPublic, RecipientSecret};
