//! Decentralized identities — DID generation and identity records.
//!
//! A DID is a namespaced random token: `did:locker:` + 16 hex characters
//! (64 bits of entropy). The full identity record, private key included, is
//! persisted server-side. That is a demo-grade simplification; the record
//! type isolates key custody so an external vault can replace the
//! `private_key` field without touching the rest of the system.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::crypto::{random, Ed25519KeyPair};

/// Fixed scheme string prefixed to every generated DID.
pub const DID_SCHEME: &str = "did:locker:";

/// A decentralized identifier string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Did(pub String);

impl Did {
    /// Generate a fresh DID with 64 bits of entropy.
    pub fn generate() -> Self {
        Self(format!("{DID_SCHEME}{}", random::random_token::<8>()))
    }

    /// Return the DID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A full identity record: DID plus hex-encoded key pair.
///
/// Immutable once created; rotation is out of scope. The private key is
/// zeroized on drop and redacted from `Debug` output.
#[derive(Clone, Serialize, Deserialize)]
pub struct DecentralizedIdentity {
    pub did: Did,
    /// Hex-encoded Ed25519 public key (64 chars).
    pub public_key: String,
    /// Hex-encoded Ed25519 private key (64 chars). Server-side custody is a
    /// demo-grade simplification.
    pub private_key: String,
}

impl DecentralizedIdentity {
    /// Create a new identity with a fresh key pair and random DID.
    pub fn generate() -> Self {
        let key_pair = Ed25519KeyPair::generate();
        Self {
            did: Did::generate(),
            public_key: key_pair.public_hex(),
            private_key: key_pair.private_hex(),
        }
    }

    /// Public view of the record: DID and public key only.
    pub fn summary(&self) -> IdentitySummary {
        IdentitySummary {
            did: self.did.clone(),
            public_key: self.public_key.clone(),
        }
    }
}

impl Drop for DecentralizedIdentity {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

impl std::fmt::Debug for DecentralizedIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecentralizedIdentity")
            .field("did", &self.did)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Shareable identity view returned by `create_identity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentitySummary {
    pub did: Did,
    pub public_key: String,
}

/// Generate a throwaway `did:example:` identifier for a given role.
///
/// Compatibility helper: nothing is persisted and no key pair exists for
/// the returned DID.
pub fn ephemeral_did(role: &str) -> String {
    format!("did:example:{role}-{}", random::random_token::<4>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_did_format() {
        let did = Did::generate();
        assert!(did.as_str().starts_with(DID_SCHEME));
        let token = &did.as_str()[DID_SCHEME.len()..];
        assert_eq!(token.len(), 16);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_did_unique() {
        assert_ne!(Did::generate(), Did::generate());
    }

    #[test]
    fn test_identity_has_distinct_keys() {
        let identity = DecentralizedIdentity::generate();
        assert_eq!(identity.public_key.len(), 64);
        assert_eq!(identity.private_key.len(), 64);
        assert_ne!(identity.public_key, identity.private_key);
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let identity = DecentralizedIdentity::generate();
        let debug = format!("{identity:?}");
        assert!(!debug.contains(&identity.private_key));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains(identity.did.as_str()));
    }

    #[test]
    fn test_summary_omits_private_key() {
        let identity = DecentralizedIdentity::generate();
        let summary = identity.summary();
        assert_eq!(summary.did, identity.did);
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("private_key").is_none());
    }

    #[test]
    fn test_ephemeral_did_format() {
        let did = ephemeral_did("holder");
        assert!(did.starts_with("did:example:holder-"));
        assert_ne!(did, ephemeral_did("holder"));
    }
}
