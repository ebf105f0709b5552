//! External anchoring — out-of-process ledger client.
//!
//! The configured client program is invoked once per anchor with the cid
//! and connection parameters passed as environment variables:
//!
//! - `ANCHOR_HASH` — the cid to anchor
//! - `ANCHOR_WS`   — ledger websocket endpoint
//! - `ANCHOR_SURI` — signing seed / key URI
//!
//! Protocol: the client prints one JSON object per line on stdout; the
//! last line is authoritative, earlier lines are diagnostic noise. The
//! authoritative line is either `{"tx_hash": ...}` or `{"error": ...}`.
//!
//! The wait is bounded by a configurable timeout (default 60s). Timeout,
//! non-zero exit, and unparsable output are each converted to an
//! error-shaped receipt; `anchor` never propagates a fatal error.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::canonical::Cid;
use crate::time;

use super::{Anchor, AnchorMode, AnchorReceipt};

/// How often the child process is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Default bound on a single ledger submission.
pub const DEFAULT_ANCHOR_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection parameters for the external ledger client.
#[derive(Debug, Clone)]
pub struct ExternalAnchorConfig {
    /// Program (or script) invoked per anchor.
    pub client: PathBuf,
    /// Ledger websocket endpoint, e.g. `ws://127.0.0.1:9944`.
    pub endpoint: String,
    /// Signing seed / key URI, e.g. `//Alice`.
    pub signing_seed: String,
    /// Bound on a single submission.
    pub timeout: Duration,
}

/// Failure kinds of a single ledger submission. Internal: every kind is
/// flattened into an error receipt before leaving this module.
#[derive(Debug, thiserror::Error)]
enum SubmitError {
    #[error("ledger client timed out after {0:?}")]
    Timeout(Duration),

    #[error("ledger client failed ({status}): {detail}")]
    ClientFailed { status: ExitStatus, detail: String },

    #[error("unparsable ledger client output: {0}")]
    MalformedOutput(String),

    #[error("failed to run ledger client: {0}")]
    Io(#[from] std::io::Error),
}

/// Authoritative payload printed by the client as its final stdout line.
#[derive(Debug, Deserialize)]
struct ClientPayload {
    #[serde(default)]
    tx_hash: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Anchoring via an external ledger client process.
pub struct ExternalAnchor {
    config: ExternalAnchorConfig,
}

impl ExternalAnchor {
    pub fn new(config: ExternalAnchorConfig) -> Self {
        Self { config }
    }

    /// Run one submission. Failure kinds are typed here and flattened into
    /// receipts by `anchor`.
    fn submit(&self, cid: &Cid) -> Result<AnchorReceipt, SubmitError> {
        let mut child = Command::new(&self.config.client)
            .env("ANCHOR_HASH", cid.as_str())
            .env("ANCHOR_WS", &self.config.endpoint)
            .env("ANCHOR_SURI", &self.config.signing_seed)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let status = wait_bounded(&mut child, self.config.timeout)?;

        // Protocol output is one JSON line; a client that floods the pipe
        // buffer instead will stall and hit the timeout.
        let stdout = read_pipe(child.stdout.take());
        let stderr = read_pipe(child.stderr.take());

        if !status.success() {
            let detail = last_nonempty_line(&stderr)
                .or_else(|| last_nonempty_line(&stdout))
                .unwrap_or("no output")
                .to_string();
            return Err(SubmitError::ClientFailed { status, detail });
        }

        let line = last_nonempty_line(&stdout)
            .ok_or_else(|| SubmitError::MalformedOutput("empty stdout".to_string()))?;
        let payload: ClientPayload = serde_json::from_str(line)
            .map_err(|e| SubmitError::MalformedOutput(format!("{e}: {line}")))?;

        if let Some(error) = payload.error {
            return Ok(AnchorReceipt::failure(AnchorMode::External, error));
        }
        match payload.tx_hash {
            Some(tx_hash) => Ok(AnchorReceipt::success(
                AnchorMode::External,
                tx_hash,
                time::unix_seconds(),
            )),
            None => Err(SubmitError::MalformedOutput(format!(
                "receipt line has neither tx_hash nor error: {line}"
            ))),
        }
    }
}

impl Anchor for ExternalAnchor {
    fn mode(&self) -> AnchorMode {
        AnchorMode::External
    }

    fn anchor(&self, cid: &Cid) -> AnchorReceipt {
        match self.submit(cid) {
            Ok(receipt) => receipt,
            Err(e) => {
                log::warn!("anchoring {cid} failed: {e}");
                AnchorReceipt::failure(AnchorMode::External, e.to_string())
            }
        }
    }
}

/// Wait for the child to exit, killing it once `timeout` elapses.
fn wait_bounded(child: &mut Child, timeout: Duration) -> Result<ExitStatus, SubmitError> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(SubmitError::Timeout(timeout));
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Drain a captured pipe to a string; a missing or unreadable pipe reads
/// as empty.
fn read_pipe(pipe: Option<impl Read>) -> String {
    let mut out = String::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_string(&mut out);
    }
    out
}

fn last_nonempty_line(output: &str) -> Option<&str> {
    output.lines().rev().map(str::trim).find(|l| !l.is_empty())
}
