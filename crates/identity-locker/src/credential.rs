//! Credential and presentation data models.
//!
//! A `Credential` is a structured claim document linked to an issuer and
//! subject. Its `id` is absent until the document has been stored and
//! content-addressed; the stored copy on disk predates the assignment and is
//! persisted with `"id": null`. Amendment means issuing a new credential —
//! no in-place update exists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::time;

/// Schema URI present in every issued credential's `context`.
pub const CREDENTIAL_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// Type tags assigned to every issued credential, in order.
pub const CREDENTIAL_TYPES: [&str; 2] = ["VerifiableCredential", "IdentityCredential"];

/// Prefix of assigned credential ids: `urn:vc:<cid>`.
pub const VC_URN_PREFIX: &str = "urn:vc:";

/// A verifiable-credential-like document.
///
/// Field names follow the W3C VC vocabulary on the wire (`issuanceDate`,
/// `credentialSubject`, ...). Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    /// Ordered sequence of schema URIs.
    pub context: Vec<String>,
    /// Assigned only after storage: `urn:vc:<cid>`. Serialized as `null`
    /// until then, and never part of the hashed bytes.
    pub id: Option<String>,
    /// Ordered sequence of type tags.
    #[serde(rename = "type")]
    pub types: Vec<String>,
    /// DID of the issuing identity.
    pub issuer: String,
    /// ISO-8601 UTC issuance timestamp.
    #[serde(rename = "issuanceDate")]
    pub issuance_date: String,
    /// ISO-8601 UTC expiration timestamp.
    #[serde(rename = "expirationDate")]
    pub expiration_date: String,
    /// Arbitrary key-value claims about the subject.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: Value,
}

impl Credential {
    /// Build a new, not-yet-stored credential document (`id` unset).
    pub fn new(
        issuer: &str,
        credential_subject: Value,
        issued_at: &DateTime<Utc>,
        expires_at: &DateTime<Utc>,
    ) -> Self {
        Self {
            context: vec![CREDENTIAL_CONTEXT.to_string()],
            id: None,
            types: CREDENTIAL_TYPES.iter().map(|t| t.to_string()).collect(),
            issuer: issuer.to_string(),
            issuance_date: time::to_iso8601(issued_at),
            expiration_date: time::to_iso8601(expires_at),
            credential_subject,
        }
    }
}

/// A presentation submitted for verification.
///
/// Must carry `vc_id` and `nonce`; extra fields are tolerated and ignored.
/// The nonce is accepted but not cryptographically checked — verification is
/// presence-based only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Presentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vc_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// Additional presentation fields, carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Presentation {
    /// Build a minimal presentation from a credential id and nonce.
    pub fn new(vc_id: &str, nonce: &str) -> Self {
        Self {
            vc_id: Some(vc_id.to_string()),
            nonce: Some(nonce.to_string()),
            extra: serde_json::Map::new(),
        }
    }
}
