//! Anchoring strategies — recording a credential hash for tamper evidence.
//!
//! Anchoring is polymorphic over two variants selected once at startup:
//!
//! - [`StubAnchor`] — offline simulation producing a synthetic transaction
//!   id; always succeeds.
//! - [`ExternalAnchor`] — delegates to an out-of-process ledger client with
//!   a bounded timeout.
//!
//! Contract: `anchor` is infallible at the type level. Every failure mode
//! (timeout, crash, garbage output) degrades to an error-shaped
//! [`AnchorReceipt`] embedded in the issuance response, so a slow or broken
//! ledger can never fail an issuance.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::canonical::Cid;
use crate::config::LockerConfig;
use crate::error::LockerError;

pub mod external;
pub mod stub;

pub use external::{ExternalAnchor, ExternalAnchorConfig};
pub use stub::StubAnchor;

/// Which anchoring variant produced a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorMode {
    Stub,
    External,
}

impl AnchorMode {
    /// Return a stable string representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Stub => "stub",
            Self::External => "external",
        }
    }
}

impl FromStr for AnchorMode {
    type Err = LockerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stub" => Ok(Self::Stub),
            "external" => Ok(Self::External),
            other => Err(LockerError::Config(format!(
                "unknown anchor mode '{other}' (expected 'stub' or 'external')"
            ))),
        }
    }
}

impl std::fmt::Display for AnchorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an anchoring attempt.
///
/// Success carries `tx_hash` and `anchored_at` (Unix seconds); failure
/// carries `error`. `mode` is always present. Not persisted — computed per
/// issuance and returned in the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorReceipt {
    pub mode: AnchorMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchored_at: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnchorReceipt {
    /// Build a success receipt.
    pub fn success(mode: AnchorMode, tx_hash: String, anchored_at: u64) -> Self {
        Self {
            mode,
            tx_hash: Some(tx_hash),
            anchored_at: Some(anchored_at),
            error: None,
        }
    }

    /// Build an error-shaped receipt.
    pub fn failure(mode: AnchorMode, error: String) -> Self {
        Self {
            mode,
            tx_hash: None,
            anchored_at: None,
            error: Some(error),
        }
    }

    /// `true` iff the anchoring attempt produced a transaction reference.
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.tx_hash.is_some()
    }
}

/// An anchoring strategy.
///
/// Implementations must not hold any store lock while anchoring; the
/// orchestrator invokes them strictly after the credential is durably
/// stored.
pub trait Anchor: Send + Sync {
    /// The variant this strategy reports in its receipts.
    fn mode(&self) -> AnchorMode;

    /// Anchor a credential hash. Never fails: errors become receipts.
    fn anchor(&self, cid: &Cid) -> AnchorReceipt;
}

/// Build the process-wide anchoring strategy from configuration.
pub fn from_config(config: &LockerConfig) -> Box<dyn Anchor> {
    match config.anchor_mode {
        AnchorMode::Stub => Box::new(StubAnchor),
        AnchorMode::External => Box::new(ExternalAnchor::new(config.external.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_mode_parse() {
        assert_eq!("stub".parse::<AnchorMode>().unwrap(), AnchorMode::Stub);
        assert_eq!(
            "external".parse::<AnchorMode>().unwrap(),
            AnchorMode::External
        );
        assert!(matches!(
            "polkadot".parse::<AnchorMode>(),
            Err(LockerError::Config(_))
        ));
    }

    #[test]
    fn test_receipt_serialization_omits_absent_fields() {
        let ok = AnchorReceipt::success(AnchorMode::Stub, "tx_1".to_string(), 42);
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value["mode"], "stub");
        assert_eq!(value["tx_hash"], "tx_1");
        assert_eq!(value["anchored_at"], 42);
        assert!(value.get("error").is_none());

        let err = AnchorReceipt::failure(AnchorMode::External, "timed out".to_string());
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["mode"], "external");
        assert_eq!(value["error"], "timed out");
        assert!(value.get("tx_hash").is_none());
    }
}
