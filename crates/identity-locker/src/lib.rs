//! Identity Locker — verifiable-credential issuance, storage, and anchoring.
//!
//! Issues, stores, verifies, and revokes verifiable-credential-like
//! documents, optionally anchoring each credential's content hash to an
//! external ledger. Credentials are content-addressed (cid = SHA-256 of
//! canonical bytes), revocation is an append-only ledger, and anchoring is
//! pluggable between an offline stub and an out-of-process ledger client.

pub mod anchor;
pub mod canonical;
pub mod config;
pub mod credential;
pub mod crypto;
pub mod error;
pub mod identity;
pub mod locker;
pub mod storage;
pub mod time;

// Re-export primary types
pub use anchor::{Anchor, AnchorMode, AnchorReceipt, ExternalAnchor, ExternalAnchorConfig, StubAnchor};
pub use canonical::{compute_cid, Cid};
pub use config::LockerConfig;
pub use credential::{Credential, Presentation, VC_URN_PREFIX};
pub use error::{LockerError, Result};
pub use identity::{ephemeral_did, DecentralizedIdentity, Did, IdentitySummary};
pub use locker::{
    IssueOutcome, IssueRequest, Locker, RevocationStatus, RevokeOutcome, VerifyOutcome,
    DEFAULT_EXPIRES_IN_DAYS,
};
pub use storage::{CredentialStore, IdentityStore, RevocationLog, RevocationRecord};
