#![forbid(unsafe_code)]

//! Sealed-key envelopes for the `encrypt-key` request header.
//!
//! A fresh [`DataKey`] encrypts one request body; the key itself is sealed to
//! the backend's X25519 public key via ephemeral ECDH + HKDF-SHA256 +
//! AES-256-GCM and shipped base64-encoded. Only the holder of the matching
//! secret key can recover the data key.
//!
//! Wire form (before base64): `ephemeral_pk(32) || nonce(12) || ciphertext`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hkdf::Hkdf;
use rand_core::OsRng;
use sha2::Sha256;
use x25519_dalek::{EphemeralSecret, PublicKey, StaticSecret};

use crate::aead::{BodyCipher, CipherSuite, DataKey, NONCE_LEN};
use crate::{Error, Result};

const SEAL_INFO: &[u8] = b"atrium-seal-v1";

/// Recipient public key requests are sealed to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipientPublic([u8; 32]);

impl RecipientPublic {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let pk: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::InvalidKey(format!("expected 32 bytes, got {}", bytes.len())))?;
        Ok(Self(pk))
    }

    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| Error::InvalidKey(format!("base64 decode: {e}")))?;
        Self::from_bytes(&bytes)
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Recipient secret key. Held by the backend (and by tests); the client
/// only ever sees [`RecipientPublic`].
pub struct RecipientSecret(StaticSecret);

impl RecipientSecret {
    pub fn generate() -> Self {
        Self(StaticSecret::random_from_rng(OsRng))
    }

    pub fn public(&self) -> RecipientPublic {
        RecipientPublic(PublicKey::from(&self.0).to_bytes())
    }
}

fn derive_kek(shared: &[u8; 32], ephemeral_pk: &[u8; 32], recipient_pk: &[u8; 32]) -> Result<DataKey> {
    let mut salt = Vec::with_capacity(64);
    salt.extend_from_slice(ephemeral_pk);
    salt.extend_from_slice(recipient_pk);
    let hk = Hkdf::<Sha256>::new(Some(&salt), shared);
    let mut kek = [0u8; 32];
    hk.expand(SEAL_INFO, &mut kek)
        .map_err(|_| Error::Crypto("hkdf expand failed".into()))?;
    Ok(DataKey(kek))
}

/// Seal a data key to `recipient`, returning the base64 header value.
pub fn seal_data_key(recipient: &RecipientPublic, key: &DataKey) -> Result<String> {
    let ephemeral = EphemeralSecret::random_from_rng(OsRng);
    let ephemeral_pk = PublicKey::from(&ephemeral).to_bytes();
    let shared = ephemeral.diffie_hellman(&PublicKey::from(*recipient.as_bytes()));
    let kek = derive_kek(shared.as_bytes(), &ephemeral_pk, recipient.as_bytes())?;
    let sealed = BodyCipher::new(CipherSuite::default(), kek).seal(&key.0)?;
    tracing::debug!(len = sealed.len(), "sealed fresh data key to recipient");
    let mut out = Vec::with_capacity(32 + sealed.len());
    out.extend_from_slice(&ephemeral_pk);
    out.extend_from_slice(&sealed);
    Ok(BASE64.encode(out))
}

/// Recover a data key from a base64 envelope using the recipient secret.
pub fn open_data_key(secret: &RecipientSecret, sealed: &str) -> Result<DataKey> {
    let blob = BASE64
        .decode(sealed.trim())
        .map_err(|e| Error::Envelope(format!("base64 decode: {e}")))?;
    if blob.len() < 32 + NONCE_LEN {
        return Err(Error::Envelope("sealed key shorter than header".into()));
    }
    let (eph, rest) = blob.split_at(32);
    let ephemeral_pk: [u8; 32] = eph
        .try_into()
        .map_err(|_| Error::Envelope("bad ephemeral key".into()))?;
    let recipient_pk = PublicKey::from(&secret.0).to_bytes();
    let shared = secret.0.diffie_hellman(&PublicKey::from(ephemeral_pk));
    let kek = derive_kek(shared.as_bytes(), &ephemeral_pk, &recipient_pk)?;
    let key = BodyCipher::new(CipherSuite::default(), kek).open(rest)?;
    DataKey::from_bytes(&key)
}
