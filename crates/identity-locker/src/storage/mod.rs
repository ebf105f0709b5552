//! Storage layer for credentials, revocations, and identity records.
//!
//! All durable state lives under a single data directory, one store per
//! sub-directory:
//!
//! ```text
//! {data_dir}/
//! ├── creds/
//! │   └── {cid}.json          — one file per stored credential
//! ├── identities/
//! │   └── {did}.json          — one file per identity record
//! └── revocations.log         — append-only ledger, one JSON record per line
//! ```
//!
//! Contract: every write is durably visible before the call returns, so an
//! immediate subsequent read succeeds. Credential and identity writes are
//! per-key and naturally non-conflicting; revocation appends are serialized
//! under a mutex so concurrent revokes never lose entries. Swapping to a
//! real database means reimplementing these three stores only.
//!
//! # Modules
//!
//! - [`credential_store`] — content-addressed credential persistence.
//! - [`revocation_log`] — append-only revocation ledger.
//! - [`identity_store`] — identity record persistence.

use std::io::Write;
use std::path::Path;

use crate::error::{LockerError, Result};

pub mod credential_store;
pub mod identity_store;
pub mod revocation_log;

pub use credential_store::CredentialStore;
pub use identity_store::IdentityStore;
pub use revocation_log::{RevocationLog, RevocationRecord, DEFAULT_REVOCATION_REASON};

/// Write `data` to `path` atomically and durably.
///
/// The bytes go to a uniquely named sibling temp file which is fsynced and
/// then renamed into place, so a crash mid-write never leaves a partial
/// record visible and a completed call implies the record is on disk. The
/// temp name is unique per call: concurrent writers of the same key each
/// get their own file, and whichever rename lands last wins whole.
pub(crate) fn write_durable(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(parent)?;

    let mut file = tempfile::NamedTempFile::new_in(parent)?;
    file.write_all(data)?;
    file.as_file().sync_all()?;

    file.persist(path)
        .map_err(|e| LockerError::Io(e.error))?;
    Ok(())
}
