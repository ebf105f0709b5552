//! Ed25519 key pair generation.
//!
//! Key material is hex-encoded at the storage boundary. The signing key is
//! zeroized on drop to prevent private key leakage.

use ed25519_dalek::{SigningKey, VerifyingKey};
use zeroize::Zeroize;

use crate::error::{LockerError, Result};

/// An Ed25519 key pair for identity records.
pub struct Ed25519KeyPair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl Ed25519KeyPair {
    /// Generate a new random Ed25519 key pair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Reconstruct a key pair from a hex-encoded signing key.
    pub fn from_private_hex(encoded: &str) -> Result<Self> {
        let bytes = hex::decode(encoded)
            .map_err(|e| LockerError::InvalidKey(format!("invalid hex signing key: {e}")))?;
        let mut key_bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| LockerError::InvalidKey("signing key must be 32 bytes".to_string()))?;

        let signing_key = SigningKey::from_bytes(&key_bytes);
        key_bytes.zeroize();
        let verifying_key = signing_key.verifying_key();
        Ok(Self {
            signing_key,
            verifying_key,
        })
    }

    /// Return the signing (private) key as lowercase hex.
    pub fn private_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    /// Return the verifying (public) key as lowercase hex.
    pub fn public_hex(&self) -> String {
        hex::encode(self.verifying_key.to_bytes())
    }

    /// Return the verifying key bytes.
    pub fn verifying_key_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }
}

impl Drop for Ed25519KeyPair {
    fn drop(&mut self) {
        // SigningKey stores bytes internally; zeroize via conversion
        let mut bytes = self.signing_key.to_bytes();
        bytes.zeroize();
    }
}
