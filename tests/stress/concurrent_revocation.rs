//! Concurrency: parallel revokes must not lose ledger entries, and
//! parallel puts of different content must not corrupt each other.

use std::sync::Arc;

use serde_json::json;

use identity_locker::{Cid, IssueRequest, Locker, LockerConfig, Presentation};

const THREADS: usize = 8;
const REVOKES_PER_THREAD: usize = 25;

#[test]
fn test_concurrent_revocations_lose_no_entries() {
    let dir = tempfile::tempdir().unwrap();
    let locker = Arc::new(Locker::open(&LockerConfig::new(dir.path())).unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let locker = Arc::clone(&locker);
            std::thread::spawn(move || {
                for i in 0..REVOKES_PER_THREAD {
                    let cid = Cid(format!("{:064}", t * REVOKES_PER_THREAD + i));
                    locker.revoke(&cid, Some("stress")).expect("revoke failed");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("revoker thread panicked");
    }

    // Every entry must be present despite the write contention.
    for t in 0..THREADS {
        for i in 0..REVOKES_PER_THREAD {
            let cid = Cid(format!("{:064}", t * REVOKES_PER_THREAD + i));
            assert!(
                locker.check_revocation(&cid).unwrap().revoked,
                "lost revocation for {cid}"
            );
        }
    }
}

#[test]
fn test_concurrent_issues_do_not_corrupt_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let locker = Arc::new(Locker::open(&LockerConfig::new(dir.path())).unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let locker = Arc::clone(&locker);
            std::thread::spawn(move || {
                let outcome = locker
                    .issue(&IssueRequest {
                        holder_did: format!("did:example:h{t}"),
                        issuer_did: "did:example:i1".to_string(),
                        credential_subject: json!({"thread": t}),
                        expires_in_days: None,
                    })
                    .expect("issue failed");
                (t, outcome.vc.id.unwrap())
            })
        })
        .collect();

    let issued: Vec<(usize, String)> = handles
        .into_iter()
        .map(|h| h.join().expect("issuer thread panicked"))
        .collect();

    // All distinct, all readable with intact content.
    for (t, vc_id) in &issued {
        let verified = locker.verify(&Presentation::new(vc_id, "n1")).unwrap();
        assert!(verified.verified);
        assert_eq!(
            verified.vc.unwrap().credential_subject["thread"],
            json!(*t)
        );
    }
    let mut ids: Vec<_> = issued.iter().map(|(_, id)| id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), THREADS);
}

#[test]
fn test_revoking_one_cid_concurrently_with_puts_keeps_flag() {
    let dir = tempfile::tempdir().unwrap();
    let locker = Arc::new(Locker::open(&LockerConfig::new(dir.path())).unwrap());

    let target = locker
        .issue(&IssueRequest {
            holder_did: "did:example:h1".to_string(),
            issuer_did: "did:example:i1".to_string(),
            credential_subject: json!({"target": true}),
            expires_in_days: None,
        })
        .unwrap()
        .cid;
    locker.revoke(&target, None).unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let locker = Arc::clone(&locker);
            std::thread::spawn(move || {
                for i in 0..10 {
                    locker
                        .issue(&IssueRequest {
                            holder_did: "did:example:h2".to_string(),
                            issuer_did: "did:example:i1".to_string(),
                            credential_subject: json!({"t": t, "i": i}),
                            expires_in_days: None,
                        })
                        .unwrap();
                    locker
                        .revoke(&Cid(format!("{t:032}{i:032}")), Some("other"))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Unrelated activity never clears an existing revocation.
    assert!(locker.check_revocation(&target).unwrap().revoked);
}
