//! User domain model.
//!
//! Accounts are created by the external identity service; this backend only
//! stores what device ownership and alerting need. Every user gets a profile
//! row carrying its role at registration time, deleted only with the user
//! itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user who can own devices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    /// Alert recipient address; None means motion alerts are silently skipped.
    pub email: Option<String>,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// Role written to a user's profile row at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Viewer,
    Owner,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Viewer => "viewer",
            UserRole::Owner => "owner",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_strings() {
        assert_eq!(UserRole::Admin.as_str(), "admin");
        assert_eq!(UserRole::Viewer.as_str(), "viewer");
        assert_eq!(UserRole::Owner.as_str(), "owner");
    }

    #[test]
    fn test_default_role_is_owner() {
        assert_eq!(UserRole::default(), UserRole::Owner);
    }
}
