//! Content-addressed credential persistence.
//!
//! One JSON file per credential under `creds/`, keyed by cid. The stored
//! document always carries `"id": null` — the `urn:vc:` identifier is
//! assigned on the in-memory copy after storage and never reaches the
//! hashed or persisted bytes.

use std::path::PathBuf;

use serde_json::Value;

use crate::canonical::{compute_cid, Cid};
use crate::credential::Credential;
use crate::error::{LockerError, Result};

const CREDS_DIR: &str = "creds";

/// Filesystem-backed store mapping cid to credential document.
pub struct CredentialStore {
    base_dir: PathBuf,
}

impl CredentialStore {
    /// Create a store rooted at `base_dir`, creating `creds/` if needed.
    ///
    /// # Errors
    ///
    /// Returns `LockerError::Io` if the directory cannot be created.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(base_dir.join(CREDS_DIR))?;
        Ok(Self { base_dir })
    }

    /// Persist a credential and return its content identifier.
    ///
    /// Idempotent: storing identical content again yields the same cid and
    /// rewrites the record with identical bytes. Concurrent puts of
    /// different content land in different files and cannot corrupt each
    /// other.
    ///
    /// # Errors
    ///
    /// Returns `LockerError::Serialization` if the document cannot be
    /// serialized or canonicalized, or `LockerError::Io` on write failure.
    pub fn put(&self, credential: &Credential) -> Result<Cid> {
        let mut document = serde_json::to_value(credential)
            .map_err(|e| LockerError::Serialization(e.to_string()))?;
        if let Value::Object(map) = &mut document {
            map.insert("id".to_string(), Value::Null);
        }

        let cid = compute_cid(&document)?;

        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| LockerError::Serialization(e.to_string()))?;
        super::write_durable(&self.credential_path(&cid), json.as_bytes())?;

        Ok(cid)
    }

    /// Load a credential by cid, or `None` if it was never stored.
    ///
    /// # Errors
    ///
    /// Returns `LockerError::InvalidFileFormat` if the record exists but
    /// cannot be parsed, or `LockerError::Io` on read failure. A missing
    /// key is not an error.
    pub fn get(&self, cid: &Cid) -> Result<Option<Credential>> {
        let path = self.credential_path(cid);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = std::fs::read(&path)?;
        let credential: Credential = serde_json::from_slice(&bytes).map_err(|e| {
            LockerError::InvalidFileFormat(format!(
                "failed to parse credential file {}: {e}",
                path.display()
            ))
        })?;
        Ok(Some(credential))
    }

    /// List the cids of all stored credentials, in no particular order.
    pub fn list(&self) -> Result<Vec<Cid>> {
        let dir = self.base_dir.join(CREDS_DIR);
        let mut cids = Vec::new();

        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(stem) = name_str.strip_suffix(".json") {
                cids.push(Cid(stem.to_string()));
            }
        }

        Ok(cids)
    }

    /// Build the filesystem path for a cid: `{base_dir}/creds/{cid}.json`.
    fn credential_path(&self, cid: &Cid) -> PathBuf {
        self.base_dir.join(CREDS_DIR).join(format!("{cid}.json"))
    }
}
