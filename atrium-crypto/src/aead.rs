#![forbid(unsafe_code)]

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand_core::{OsRng, RngCore};
use zeroize::Zeroize;

use crate::{Error, Result};

/// Nonce length for AES-GCM (96-bit).
pub const NONCE_LEN: usize = 12;

/// AEAD suite (keep room for extension)
#[derive(Clone, Copy, Debug, Default)]
pub enum CipherSuite {
    #[default]
    Aes256Gcm,
}

/// Per-request data key (zeroized on drop)
#[derive(Clone)]
pub struct DataKey(pub [u8; 32]);

impl Drop for DataKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl DataKey {
    /// Fresh random key from the OS RNG. One key per request, never reused.
    pub fn generate() -> Self {
        let mut k = [0u8; 32];
        OsRng.fill_bytes(&mut k);
        Self(k)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let k: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::InvalidKey(format!("expected 32 bytes, got {}", bytes.len())))?;
        Ok(Self(k))
    }
}

pub struct BodyCipher {
    suite: CipherSuite,
    key: DataKey,
}

impl BodyCipher {
    pub fn new(suite: CipherSuite, key: DataKey) -> Self {
        Self { suite, key }
    }

    /// Encrypt `plaintext`, returning `nonce || ciphertext` with a random nonce.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        match self.suite {
            CipherSuite::Aes256Gcm => {
                let key = Key::<Aes256Gcm>::from_slice(&self.key.0);
                let cipher = Aes256Gcm::new(key);
                let mut nonce = [0u8; NONCE_LEN];
                OsRng.fill_bytes(&mut nonce);
                let ct = cipher
                    .encrypt(
                        Nonce::from_slice(&nonce),
                        Payload {
                            msg: plaintext,
                            aad: b"",
                        },
                    )
                    .map_err(|_| Error::Crypto("aead seal failed".into()))?;
                let mut out = Vec::with_capacity(NONCE_LEN + ct.len());
                out.extend_from_slice(&nonce);
                out.extend_from_slice(&ct);
                Ok(out)
            }
        }
    }

    /// Decrypt a `nonce || ciphertext` blob produced by [`BodyCipher::seal`].
    pub fn open(&self, sealed: &[u8]) -> Result<Vec<u8>> {
        if sealed.len() < NONCE_LEN {
            return Err(Error::Envelope("sealed body shorter than nonce".into()));
        }
        let (nonce, ct) = sealed.split_at(NONCE_LEN);
        match self.suite {
            CipherSuite::Aes256Gcm => {
                let key = Key::<Aes256Gcm>::from_slice(&self.key.0);
                let cipher = Aes256Gcm::new(key);
                cipher
                    .decrypt(
                        Nonce::from_slice(nonce),
                        Payload { msg: ct, aad: b"" },
                    )
                    .map_err(|_| Error::Crypto("aead open failed".into()))
            }
        }
    }
}
