//! Pairing claim entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the pairing_claims table.
#[derive(Debug, Clone, FromRow)]
pub struct PairingClaimEntity {
    pub session_id: String,
    pub user_id: Uuid,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl From<PairingClaimEntity> for domain::models::PendingClaim {
    fn from(entity: PairingClaimEntity) -> Self {
        Self {
            session_id: entity.session_id,
            user_id: entity.user_id,
            token: entity.token,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairing_claim_entity_to_domain() {
        let entity = PairingClaimEntity {
            session_id: "session-1".to_string(),
            user_id: Uuid::new_v4(),
            token: "b".repeat(24),
            created_at: Utc::now(),
        };
        let claim: domain::models::PendingClaim = entity.clone().into();
        assert_eq!(claim.session_id, "session-1");
        assert_eq!(claim.user_id, entity.user_id);
        assert!(claim.matches(&entity.token));
    }
}
