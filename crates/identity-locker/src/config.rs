//! Process-wide configuration.
//!
//! Read once at startup and threaded explicitly through `Locker`
//! construction — never ambient global state — so tests can substitute a
//! stub anchoring strategy deterministically.

use std::path::PathBuf;
use std::time::Duration;

use crate::anchor::external::DEFAULT_ANCHOR_TIMEOUT;
use crate::anchor::{AnchorMode, ExternalAnchorConfig};
use crate::error::{LockerError, Result};

/// Environment variables read by [`LockerConfig::from_env`].
const ENV_DATA_DIR: &str = "LOCKER_DATA_DIR";
const ENV_ANCHOR_MODE: &str = "ANCHOR_MODE";
const ENV_ANCHOR_CLIENT: &str = "ANCHOR_CLIENT";
const ENV_ANCHOR_WS: &str = "ANCHOR_WS";
const ENV_ANCHOR_SURI: &str = "ANCHOR_SURI";
const ENV_ANCHOR_TIMEOUT_SECS: &str = "ANCHOR_TIMEOUT_SECS";

const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:9944";
const DEFAULT_SURI: &str = "//Alice";
const DEFAULT_CLIENT: &str = "anchor-client";

/// Locker configuration: data directory plus anchoring selection.
#[derive(Debug, Clone)]
pub struct LockerConfig {
    /// Root directory for all durable state.
    pub data_dir: PathBuf,
    /// Active anchoring variant, fixed for the process lifetime.
    pub anchor_mode: AnchorMode,
    /// External ledger connection parameters (ignored in stub mode).
    pub external: ExternalAnchorConfig,
}

impl LockerConfig {
    /// Build a stub-mode configuration rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            anchor_mode: AnchorMode::Stub,
            external: ExternalAnchorConfig {
                client: PathBuf::from(DEFAULT_CLIENT),
                endpoint: DEFAULT_ENDPOINT.to_string(),
                signing_seed: DEFAULT_SURI.to_string(),
                timeout: DEFAULT_ANCHOR_TIMEOUT,
            },
        }
    }

    /// Read configuration from the environment, once, at process start.
    ///
    /// Unset variables fall back to stub mode under
    /// `$HOME/.identity-locker` (or `./identity-locker-data` without a
    /// home directory).
    ///
    /// # Errors
    ///
    /// Returns `LockerError::Config` for an unrecognized anchor mode or a
    /// non-numeric timeout.
    pub fn from_env() -> Result<Self> {
        let data_dir = match std::env::var(ENV_DATA_DIR) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => match std::env::var("HOME") {
                Ok(home) => PathBuf::from(home).join(".identity-locker"),
                Err(_) => PathBuf::from("identity-locker-data"),
            },
        };

        let mut config = Self::new(data_dir);

        if let Ok(mode) = std::env::var(ENV_ANCHOR_MODE) {
            config.anchor_mode = mode.parse()?;
        }
        if let Ok(client) = std::env::var(ENV_ANCHOR_CLIENT) {
            config.external.client = PathBuf::from(client);
        }
        if let Ok(endpoint) = std::env::var(ENV_ANCHOR_WS) {
            config.external.endpoint = endpoint;
        }
        if let Ok(suri) = std::env::var(ENV_ANCHOR_SURI) {
            config.external.signing_seed = suri;
        }
        if let Ok(secs) = std::env::var(ENV_ANCHOR_TIMEOUT_SECS) {
            let secs: u64 = secs.parse().map_err(|_| {
                LockerError::Config(format!("{ENV_ANCHOR_TIMEOUT_SECS} must be an integer"))
            })?;
            config.external.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
