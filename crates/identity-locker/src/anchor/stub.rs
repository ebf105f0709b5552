//! Stub anchoring — offline/demo simulation.

use crate::canonical::Cid;
use crate::time;

use super::{Anchor, AnchorMode, AnchorReceipt};

/// Simulated on-chain anchoring.
///
/// Produces a synthetic transaction id derived from the cid prefix and the
/// current time. Always succeeds.
pub struct StubAnchor;

impl Anchor for StubAnchor {
    fn mode(&self) -> AnchorMode {
        AnchorMode::Stub
    }

    fn anchor(&self, cid: &Cid) -> AnchorReceipt {
        let now = time::unix_seconds();
        let tx_hash = format!("tx_anchor_{}_{now}", cid.short_prefix());
        AnchorReceipt::success(AnchorMode::Stub, tx_hash, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_always_succeeds() {
        let anchor = StubAnchor;
        let cid = Cid("deadbeef00112233".to_string());
        let receipt = anchor.anchor(&cid);

        assert!(receipt.is_success());
        assert_eq!(receipt.mode, AnchorMode::Stub);
        assert!(receipt.error.is_none());
        assert!(receipt.anchored_at.is_some());
        assert!(receipt.tx_hash.unwrap().starts_with("tx_anchor_deadbeef_"));
    }
}
