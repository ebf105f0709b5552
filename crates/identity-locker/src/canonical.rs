//! Content addressing — canonical bytes and cid derivation.
//!
//! A credential's identifier (`cid`) is the lowercase hex SHA-256 of its
//! canonical byte form. Canonicalization uses RFC 8785 (JSON Canonicalization
//! Scheme): sorted object keys, compact separators, deterministic number
//! formatting. Key order in the input therefore never affects the cid.
//!
//! The self-referential `id` field is set to JSON `null` before hashing and
//! the null placeholder is **included** in the hashed bytes. `compute_cid`
//! nulls the field itself so the identifier can never depend on its own
//! value.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::credential::VC_URN_PREFIX;
use crate::error::{LockerError, Result};

/// Content identifier for a stored credential.
///
/// Format: 64 lowercase hex characters (SHA-256 of canonical bytes).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cid(pub String);

impl Cid {
    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover a cid from a `urn:vc:`-prefixed credential id.
    ///
    /// A bare cid (no prefix) is accepted unchanged.
    pub fn from_vc_id(vc_id: &str) -> Self {
        Self(vc_id.strip_prefix(VC_URN_PREFIX).unwrap_or(vc_id).to_string())
    }

    /// Short prefix used for synthetic anchor transaction ids.
    pub fn short_prefix(&self) -> &str {
        &self.0[..self.0.len().min(8)]
    }
}

impl std::fmt::Display for Cid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compute the content identifier of a structured document.
///
/// Pure function: no side effects. Identical documents (modulo key order)
/// always yield the same cid; any change to any field value changes it.
///
/// # Errors
///
/// Returns `LockerError::Serialization` if the document cannot be
/// canonicalized (RFC 8785 rejects some values, e.g. non-finite numbers).
pub fn compute_cid(document: &Value) -> Result<Cid> {
    let mut scrubbed = document.clone();
    if let Value::Object(map) = &mut scrubbed {
        // Null the self-referential field regardless of its current value.
        map.insert("id".to_string(), Value::Null);
    }

    let bytes = serde_jcs::to_vec(&scrubbed)
        .map_err(|e| LockerError::Serialization(format!("canonicalization failed: {e}")))?;

    Ok(Cid(hex::encode(Sha256::digest(&bytes))))
}
