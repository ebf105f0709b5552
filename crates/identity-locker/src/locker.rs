//! Credential lifecycle orchestrator.
//!
//! Composes the content addresser, stores, identity issuer, and anchoring
//! strategy into the issue / verify / revoke operations. Per credential the
//! state machine is `Issued -> Revoked`, one-directional, with no other
//! states: expiry is recorded but not enforced here, and there is no
//! un-revoke.
//!
//! Ordering invariant: anchoring happens strictly after the credential is
//! durably stored and holds no store lock, so a slow or failed anchor can
//! never lose a credential. A storage failure, by contrast, aborts issuance
//! — an unstored credential must never appear issued.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::anchor::{self, Anchor, AnchorReceipt};
use crate::canonical::Cid;
use crate::config::LockerConfig;
use crate::credential::{Credential, Presentation, VC_URN_PREFIX};
use crate::error::{LockerError, Result};
use crate::identity::{DecentralizedIdentity, IdentitySummary};
use crate::storage::{
    CredentialStore, IdentityStore, RevocationLog, RevocationRecord, DEFAULT_REVOCATION_REASON,
};
use crate::time;

/// Expiry applied when an issuance request does not specify one.
pub const DEFAULT_EXPIRES_IN_DAYS: i64 = 365;

/// A credential-issuance request with already-validated fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRequest {
    pub holder_did: String,
    pub issuer_did: String,
    pub credential_subject: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in_days: Option<i64>,
}

/// Result of a successful issuance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueOutcome {
    /// The credential with its assigned `urn:vc:` id.
    pub vc: Credential,
    pub cid: Cid,
    /// Anchoring result — possibly error-shaped, never fatal.
    pub anchor: AnchorReceipt,
}

/// Result of a verification that reached a decision.
///
/// Missing presentation fields and unknown credentials are errors
/// (`InvalidRequest` / `NotFound`), not outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOutcome {
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vc: Option<Credential>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Result of a revoke call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeOutcome {
    pub revoked: bool,
}

/// Result of a revocation-status read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevocationStatus {
    pub cid: Cid,
    pub revoked: bool,
}

/// The credential lifecycle orchestrator.
///
/// Thread-safe for request-parallel use: stores serialize their own
/// writers, and the anchoring strategy is stateless per call.
pub struct Locker {
    credentials: CredentialStore,
    revocations: RevocationLog,
    identities: IdentityStore,
    anchor: Box<dyn Anchor>,
}

impl Locker {
    /// Open a locker with the anchoring strategy selected by `config`.
    pub fn open(config: &LockerConfig) -> Result<Self> {
        Self::with_anchor(config, anchor::from_config(config))
    }

    /// Open a locker with an explicit anchoring strategy.
    ///
    /// This is the substitution seam: tests and embedders can inject any
    /// `Anchor` implementation regardless of configuration.
    pub fn with_anchor(config: &LockerConfig, anchor: Box<dyn Anchor>) -> Result<Self> {
        Ok(Self {
            credentials: CredentialStore::new(&config.data_dir)?,
            revocations: RevocationLog::new(&config.data_dir)?,
            identities: IdentityStore::new(&config.data_dir)?,
            anchor,
        })
    }

    /// Create and persist a new decentralized identity.
    ///
    /// Returns the public view only; the full record (private key
    /// included) stays in the identity store.
    pub fn create_identity(&self) -> Result<IdentitySummary> {
        let identity = DecentralizedIdentity::generate();
        self.identities.save(&identity)?;
        log::info!("created identity {}", identity.did);
        Ok(identity.summary())
    }

    /// Issue a credential: build, store, assign id, anchor.
    ///
    /// Anchoring failure degrades to an error receipt in the outcome; only
    /// storage failure aborts the operation.
    pub fn issue(&self, request: &IssueRequest) -> Result<IssueOutcome> {
        let expires_in_days = request.expires_in_days.unwrap_or(DEFAULT_EXPIRES_IN_DAYS);
        let issued_at = time::now_utc();
        let expires_at = chrono::Duration::try_days(expires_in_days)
            .and_then(|days| issued_at.checked_add_signed(days))
            .ok_or_else(|| {
                LockerError::InvalidRequest(format!(
                    "expires_in_days out of range: {expires_in_days}"
                ))
            })?;

        let mut vc = Credential::new(
            &request.issuer_did,
            request.credential_subject.clone(),
            &issued_at,
            &expires_at,
        );

        let cid = self.credentials.put(&vc)?;
        vc.id = Some(format!("{VC_URN_PREFIX}{cid}"));

        let anchor = self.anchor.anchor(&cid);
        match &anchor.tx_hash {
            Some(tx_hash) => log::info!(
                "issued credential cid={cid} holder={} anchored tx={tx_hash}",
                request.holder_did
            ),
            None => log::warn!(
                "issued credential cid={cid} holder={} without anchor: {}",
                request.holder_did,
                anchor.error.as_deref().unwrap_or("unknown")
            ),
        }

        Ok(IssueOutcome { vc, cid, anchor })
    }

    /// Verify a presentation against the store and revocation ledger.
    ///
    /// # Errors
    ///
    /// Returns `LockerError::InvalidRequest` if `vc_id` or `nonce` is
    /// missing, and `LockerError::NotFound` if the credential was never
    /// stored. A revoked credential is a decided outcome, not an error.
    pub fn verify(&self, presentation: &Presentation) -> Result<VerifyOutcome> {
        let vc_id = presentation
            .vc_id
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                LockerError::InvalidRequest("presentation must include vc_id and nonce".to_string())
            })?;
        presentation
            .nonce
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                LockerError::InvalidRequest("presentation must include vc_id and nonce".to_string())
            })?;
        // The nonce is accepted but not bound to a freshness check.

        let cid = Cid::from_vc_id(vc_id);
        let vc = self
            .credentials
            .get(&cid)?
            .ok_or_else(|| LockerError::NotFound(format!("credential not found: {cid}")))?;

        if self.revocations.is_revoked(&cid)? {
            log::info!("verify cid={cid}: revoked");
            return Ok(VerifyOutcome {
                verified: false,
                vc: None,
                reason: Some("revoked".to_string()),
            });
        }

        log::info!("verify cid={cid}: verified");
        Ok(VerifyOutcome {
            verified: true,
            vc: Some(vc),
            reason: None,
        })
    }

    /// Append a revocation for `cid`.
    ///
    /// Always succeeds, including for unknown or already-revoked cids —
    /// an unknown cid is logged, not rejected.
    pub fn revoke(&self, cid: &Cid, reason: Option<&str>) -> Result<RevokeOutcome> {
        if self.credentials.get(cid)?.is_none() {
            log::warn!("revoking cid {cid} that was never issued");
        }

        let record = RevocationRecord {
            cid: cid.clone(),
            reason: reason.unwrap_or(DEFAULT_REVOCATION_REASON).to_string(),
            revoked_at: time::to_iso8601(&time::now_utc()),
        };
        self.revocations.append(&record)?;
        log::info!("revoked cid={cid} reason={}", record.reason);

        Ok(RevokeOutcome { revoked: true })
    }

    /// Pure read-through revocation check.
    pub fn check_revocation(&self, cid: &Cid) -> Result<RevocationStatus> {
        Ok(RevocationStatus {
            cid: cid.clone(),
            revoked: self.revocations.is_revoked(cid)?,
        })
    }
}
