//! End-to-end credential lifecycle: identity creation, issuance with
//! anchoring, verification, revocation, and re-verification.

use serde_json::json;

use identity_locker::{
    AnchorMode, IssueRequest, Locker, LockerConfig, LockerError, Presentation,
};

fn open_locker(dir: &std::path::Path) -> Locker {
    Locker::open(&LockerConfig::new(dir)).expect("open locker")
}

#[test]
fn test_full_credential_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let locker = open_locker(dir.path());

    // Issue.
    let outcome = locker
        .issue(&IssueRequest {
            holder_did: "did:example:h1".to_string(),
            issuer_did: "did:example:i1".to_string(),
            credential_subject: json!({"name": "Alice"}),
            expires_in_days: None,
        })
        .expect("issue failed");

    let cid = outcome.cid.clone();
    assert_eq!(cid.as_str().len(), 64);
    assert!(cid.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(
        outcome.vc.id.as_deref(),
        Some(format!("urn:vc:{cid}").as_str())
    );
    assert_eq!(outcome.anchor.mode, AnchorMode::Stub);
    assert!(outcome.anchor.is_success());

    let vc_id = outcome.vc.id.clone().unwrap();

    // Verify.
    let verified = locker
        .verify(&Presentation::new(&vc_id, "n1"))
        .expect("verify failed");
    assert!(verified.verified);
    let vc = verified.vc.expect("verified outcome must carry the vc");
    assert_eq!(vc.issuer, "did:example:i1");
    assert_eq!(vc.credential_subject["name"], "Alice");

    // Revoke.
    let revoked = locker.revoke(&cid, None).expect("revoke failed");
    assert!(revoked.revoked);
    assert!(locker.check_revocation(&cid).unwrap().revoked);

    // Re-verify the same presentation.
    let reverified = locker
        .verify(&Presentation::new(&vc_id, "n1"))
        .expect("re-verify failed");
    assert!(!reverified.verified);
    assert_eq!(reverified.reason.as_deref(), Some("revoked"));
}

#[test]
fn test_identity_then_issue_with_created_issuer() {
    let dir = tempfile::tempdir().unwrap();
    let locker = open_locker(dir.path());

    let issuer = locker.create_identity().expect("create_identity failed");
    let holder = locker.create_identity().expect("create_identity failed");
    assert_ne!(issuer.did, holder.did);

    let outcome = locker
        .issue(&IssueRequest {
            holder_did: holder.did.to_string(),
            issuer_did: issuer.did.to_string(),
            credential_subject: json!({"member": true}),
            expires_in_days: Some(7),
        })
        .expect("issue failed");
    assert_eq!(outcome.vc.issuer, issuer.did.to_string());
}

#[test]
fn test_lifecycle_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let (cid, vc_id) = {
        let locker = open_locker(dir.path());
        let outcome = locker
            .issue(&IssueRequest {
                holder_did: "did:example:h1".to_string(),
                issuer_did: "did:example:i1".to_string(),
                credential_subject: json!({"name": "Bob"}),
                expires_in_days: None,
            })
            .unwrap();
        locker.revoke(&outcome.cid, Some("compromised")).unwrap();
        (outcome.cid.clone(), outcome.vc.id.clone().unwrap())
    };

    // A fresh locker over the same directory sees the same state.
    let locker = open_locker(dir.path());
    assert!(locker.check_revocation(&cid).unwrap().revoked);
    let verified = locker.verify(&Presentation::new(&vc_id, "n2")).unwrap();
    assert!(!verified.verified);
}

#[test]
fn test_verify_failure_kinds_are_distinguishable() {
    let dir = tempfile::tempdir().unwrap();
    let locker = open_locker(dir.path());

    // Missing nonce: invalid request, regardless of vc_id validity.
    let mut missing_nonce = Presentation::new(&format!("urn:vc:{}", "0".repeat(64)), "n1");
    missing_nonce.nonce = None;
    assert!(matches!(
        locker.verify(&missing_nonce),
        Err(LockerError::InvalidRequest(_))
    ));

    // Well-formed but unknown: not found.
    let unknown = Presentation::new(&format!("urn:vc:{}", "0".repeat(64)), "n1");
    assert!(matches!(
        locker.verify(&unknown),
        Err(LockerError::NotFound(_))
    ));
}
