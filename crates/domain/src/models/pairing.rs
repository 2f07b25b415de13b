//! Pending pairing claim domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A token issued by deferred pairing that is not yet bound to a device.
///
/// One claim per session: a new pairing request overwrites the previous claim,
/// and the first matching heartbeat from that session consumes it. Until then
/// the token is not a valid device identifier anywhere else in the gateway.
/// Claims carry no expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingClaim {
    pub session_id: String,
    pub user_id: Uuid,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl PendingClaim {
    /// Whether a heartbeat for `token` from this claim's session resolves it.
    pub fn matches(&self, token: &str) -> bool {
        self.token == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_matches_own_token() {
        let claim = PendingClaim {
            session_id: "session-1".to_string(),
            user_id: Uuid::new_v4(),
            token: "t".repeat(24),
            created_at: Utc::now(),
        };
        assert!(claim.matches(&"t".repeat(24)));
        assert!(!claim.matches(&"u".repeat(24)));
    }
}
