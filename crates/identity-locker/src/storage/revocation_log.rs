//! Append-only revocation ledger.
//!
//! One JSON record per line in `revocations.log`. Records are only ever
//! appended — revocation never mutates or deletes stored credentials, and
//! duplicate entries for the same cid are tolerated. Appends are serialized
//! under a mutex and fsynced before returning, so concurrent revokes never
//! lose entries and a completed call is durably visible.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::canonical::Cid;
use crate::error::{LockerError, Result};

const REVOCATION_LOG_FILE: &str = "revocations.log";

/// Reason recorded when a revoke call supplies none.
pub const DEFAULT_REVOCATION_REASON: &str = "revoked";

/// A single revocation ledger entry. Never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevocationRecord {
    /// Identifier of the target credential.
    pub cid: Cid,
    /// Free-text reason.
    pub reason: String,
    /// ISO-8601 UTC timestamp of the revoke call.
    pub revoked_at: String,
}

/// Filesystem-backed append-only revocation ledger.
pub struct RevocationLog {
    path: PathBuf,
    append_lock: Mutex<()>,
}

impl RevocationLog {
    /// Create a ledger rooted at `base_dir`.
    ///
    /// The log file itself is created lazily on first append; an absent
    /// file reads as an empty ledger.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self {
            path: base_dir.join(REVOCATION_LOG_FILE),
            append_lock: Mutex::new(()),
        })
    }

    /// Append a revocation record to the ledger.
    ///
    /// Always succeeds for well-formed records, whether or not the cid was
    /// ever issued or is already revoked. The write is flushed to disk
    /// before returning.
    ///
    /// # Errors
    ///
    /// Returns `LockerError::Serialization` if the record cannot be
    /// serialized, or `LockerError::Io` on write failure.
    pub fn append(&self, record: &RevocationRecord) -> Result<()> {
        let line = serde_json::to_string(record)
            .map_err(|e| LockerError::Serialization(e.to_string()))?;

        let _guard = self
            .append_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        file.sync_data()?;

        Ok(())
    }

    /// Return `true` iff at least one record exists for `cid`.
    pub fn is_revoked(&self, cid: &Cid) -> Result<bool> {
        Ok(self.records()?.iter().any(|r| &r.cid == cid))
    }

    /// Read all ledger entries in append order.
    ///
    /// A line that fails to parse (e.g. a torn write from a crash) is
    /// skipped with a warning rather than poisoning the whole ledger.
    pub fn records(&self) -> Result<Vec<RevocationRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let mut records = Vec::new();

        for line in contents.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<RevocationRecord>(line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    log::warn!("skipping malformed revocation record: {e}");
                }
            }
        }

        Ok(records)
    }
}
