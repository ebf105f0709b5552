//! Identity record persistence.
//!
//! One JSON file per identity under `identities/`, keyed by DID. Records
//! are written once at creation and never updated or deleted.

use std::path::PathBuf;

use crate::error::{LockerError, Result};
use crate::identity::{DecentralizedIdentity, Did};

const IDENTITIES_DIR: &str = "identities";

/// Filesystem-backed store for `DecentralizedIdentity` records.
pub struct IdentityStore {
    base_dir: PathBuf,
}

impl IdentityStore {
    /// Create a store rooted at `base_dir`, creating `identities/` if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(base_dir.join(IDENTITIES_DIR))?;
        Ok(Self { base_dir })
    }

    /// Persist a full identity record, private key included.
    pub fn save(&self, identity: &DecentralizedIdentity) -> Result<()> {
        let json = serde_json::to_string_pretty(identity)
            .map_err(|e| LockerError::Serialization(e.to_string()))?;
        super::write_durable(&self.identity_path(&identity.did), json.as_bytes())
    }

    /// Load an identity record by DID.
    ///
    /// # Errors
    ///
    /// Returns `LockerError::NotFound` if no record exists for `did`.
    pub fn load(&self, did: &Did) -> Result<DecentralizedIdentity> {
        let path = self.identity_path(did);
        if !path.exists() {
            return Err(LockerError::NotFound(format!("identity not found: {did}")));
        }

        let bytes = std::fs::read(&path)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            LockerError::InvalidFileFormat(format!(
                "failed to parse identity file {}: {e}",
                path.display()
            ))
        })
    }

    /// List the DIDs of all stored identities, in no particular order.
    pub fn list(&self) -> Result<Vec<Did>> {
        let dir = self.base_dir.join(IDENTITIES_DIR);
        let mut dids = Vec::new();

        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(stem) = name_str.strip_suffix(".json") {
                dids.push(Did(stem.to_string()));
            }
        }

        Ok(dids)
    }

    /// Build the filesystem path for a DID: `{base_dir}/identities/{did}.json`.
    fn identity_path(&self, did: &Did) -> PathBuf {
        self.base_dir.join(IDENTITIES_DIR).join(format!("{did}.json"))
    }
}
