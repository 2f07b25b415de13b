//! Motion alert notification contract.
//!
//! Dispatch is strictly best-effort: implementations report an outcome but
//! never return an error, so a transport failure can never surface as an
//! ingestion failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload describing a motion detection worth alerting on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionAlert {
    pub device_name: String,
    pub magnitude: f64,
    pub timestamp: DateTime<Utc>,
}

impl MotionAlert {
    /// Human-readable alert body.
    pub fn message(&self) -> String {
        format!(
            "Motion {:.2} detected on device {} at {}",
            self.magnitude, self.device_name, self.timestamp
        )
    }
}

/// Outcome of a dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationResult {
    /// Alert was handed to the transport.
    Sent,
    /// Owner has no registered contact address; silent no-op.
    NoRecipient,
    /// Transport failed; the error is recorded here and goes no further.
    Failed(String),
    /// Dispatch is disabled by configuration.
    Disabled,
}

/// Sender of motion alerts to a device owner's contact address.
#[async_trait::async_trait]
pub trait MotionNotifier: Send + Sync {
    async fn notify_motion(&self, recipient: Option<&str>, alert: &MotionAlert)
        -> NotificationResult;
}
