//! Identity Locker CLI — `idlock` command.
//!
//! Thin inbound boundary over the core library: validates arguments, calls
//! the lifecycle orchestrator, and prints JSON outcomes. Configuration
//! (data directory, anchor mode, ledger connection) is read from the
//! environment once at startup; `--data-dir` overrides the directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

use identity_locker::{
    ephemeral_did, Cid, IssueRequest, Locker, LockerConfig, Presentation,
};

/// Identity Locker CLI — issue, verify, and revoke verifiable credentials.
#[derive(Parser, Debug)]
#[command(
    name = "idlock",
    about = "Identity Locker CLI",
    version,
    long_about = "idlock — Identity Locker CLI\n\nCreate decentralized identities, issue content-addressed credentials,\nverify presentations, and manage the revocation ledger."
)]
struct Cli {
    /// Root directory for durable state (default: $LOCKER_DATA_DIR or ~/.identity-locker)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create and persist a new decentralized identity
    CreateDid,

    /// Generate a throwaway did:example identifier (nothing persisted)
    EphemeralDid {
        /// Role label embedded in the identifier
        #[arg(long, default_value = "holder")]
        role: String,
    },

    /// Issue a credential and anchor its content hash
    Issue {
        /// Holder DID
        #[arg(long)]
        holder: String,
        /// Issuer DID
        #[arg(long)]
        issuer: String,
        /// Credential subject as a JSON object
        #[arg(long)]
        subject: String,
        /// Days until expiry (default 365)
        #[arg(long)]
        expires_in_days: Option<i64>,
    },

    /// Verify a presentation
    Verify {
        /// Credential id (urn:vc:<cid>)
        #[arg(long)]
        vc_id: String,
        /// Presentation nonce
        #[arg(long)]
        nonce: String,
    },

    /// Append a revocation for a cid
    Revoke {
        /// Content identifier of the credential
        cid: String,
        /// Free-text reason (default: "revoked")
        #[arg(long)]
        reason: Option<String>,
    },

    /// Check whether a cid has been revoked
    CheckRevocation {
        /// Content identifier of the credential
        cid: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = LockerConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    log::debug!(
        "data_dir={} anchor_mode={}",
        config.data_dir.display(),
        config.anchor_mode
    );

    let locker = Locker::open(&config).context("failed to open locker")?;

    match cli.command {
        Commands::CreateDid => {
            let summary = locker.create_identity()?;
            print_json(&serde_json::to_value(&summary)?)?;
        }

        Commands::EphemeralDid { role } => {
            print_json(&json!({ "did": ephemeral_did(&role) }))?;
        }

        Commands::Issue {
            holder,
            issuer,
            subject,
            expires_in_days,
        } => {
            let credential_subject =
                serde_json::from_str(&subject).context("--subject must be valid JSON")?;
            let outcome = locker.issue(&IssueRequest {
                holder_did: holder,
                issuer_did: issuer,
                credential_subject,
                expires_in_days,
            })?;
            print_json(&serde_json::to_value(&outcome)?)?;
        }

        Commands::Verify { vc_id, nonce } => {
            let outcome = locker.verify(&Presentation::new(&vc_id, &nonce))?;
            print_json(&serde_json::to_value(&outcome)?)?;
        }

        Commands::Revoke { cid, reason } => {
            let outcome = locker.revoke(&Cid(cid), reason.as_deref())?;
            print_json(&serde_json::to_value(&outcome)?)?;
        }

        Commands::CheckRevocation { cid } => {
            let status = locker.check_revocation(&Cid(cid))?;
            print_json(&serde_json::to_value(&status)?)?;
        }
    }

    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
