//! Email transport for motion alerts.
//!
//! Supported providers:
//! - `console`: Logs emails to console (development)
//! - `sendgrid`: Uses SendGrid API
//!
//! Dispatch is best-effort end to end: every outcome collapses into a
//! `NotificationResult`, so a transport failure is observable in logs and
//! metrics but can never fail motion ingestion.

use crate::config::EmailConfig;
use domain::services::{MotionAlert, MotionNotifier, NotificationResult};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Errors that can occur during email operations.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email service not configured")]
    NotConfigured,

    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

/// Email message to be sent.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// Recipient email address
    pub to: String,
    /// Email subject
    pub subject: String,
    /// Plain text body
    pub body_text: String,
}

/// Email service for motion alert delivery.
#[derive(Clone)]
pub struct EmailService {
    config: Arc<EmailConfig>,
}

impl EmailService {
    /// Creates a new EmailService with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Send an email message through the configured provider.
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        match self.config.provider.as_str() {
            "console" => self.send_console(message).await,
            "sendgrid" => self.send_sendgrid(message).await,
            provider => {
                error!(provider = %provider, "Unknown email provider");
                Err(EmailError::NotConfigured)
            }
        }
    }

    /// Console provider - logs the email (for development).
    async fn send_console(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            from = %self.config.sender_email,
            from_name = %self.config.sender_name,
            "Email (console provider)"
        );

        debug!(
            body_text = %message.body_text,
            "Email body"
        );

        Ok(())
    }

    /// SendGrid provider - sends via SendGrid API.
    async fn send_sendgrid(&self, message: EmailMessage) -> Result<(), EmailError> {
        if self.config.sendgrid_api_key.is_empty() {
            return Err(EmailError::NotConfigured);
        }

        let client = reqwest::Client::new();

        let body = serde_json::json!({
            "personalizations": [{
                "to": [{
                    "email": message.to
                }]
            }],
            "from": {
                "email": self.config.sender_email,
                "name": self.config.sender_name
            },
            "subject": message.subject,
            "content": [{
                "type": "text/plain",
                "value": message.body_text
            }]
        });

        let response = client
            .post("https://api.sendgrid.com/v3/mail/send")
            .header(
                "Authorization",
                format!("Bearer {}", self.config.sendgrid_api_key),
            )
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| EmailError::SendFailed(format!("SendGrid request failed: {}", e)))?;

        if response.status().is_success() {
            info!(
                to = %message.to,
                subject = %message.subject,
                "Email sent via SendGrid"
            );
            Ok(())
        } else {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                error = %error_body,
                "SendGrid API error"
            );
            Err(EmailError::ProviderError(format!(
                "SendGrid returned {}: {}",
                status, error_body
            )))
        }
    }
}

#[async_trait::async_trait]
impl MotionNotifier for EmailService {
    async fn notify_motion(
        &self,
        recipient: Option<&str>,
        alert: &MotionAlert,
    ) -> NotificationResult {
        let recipient = match recipient {
            Some(address) if !address.is_empty() => address,
            _ => {
                debug!(device = %alert.device_name, "Owner has no alert address, skipping");
                return NotificationResult::NoRecipient;
            }
        };

        if !self.config.enabled {
            debug!(
                to = %recipient,
                device = %alert.device_name,
                "Email disabled, motion alert not sent"
            );
            return NotificationResult::Disabled;
        }

        let message = EmailMessage {
            to: recipient.to_string(),
            subject: format!("Motion detected on {}", alert.device_name),
            body_text: alert.message(),
        };

        match self.send(message).await {
            Ok(()) => NotificationResult::Sent,
            Err(e) => NotificationResult::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_config(enabled: bool, provider: &str) -> EmailConfig {
        EmailConfig {
            enabled,
            provider: provider.to_string(),
            sendgrid_api_key: String::new(),
            sender_email: "alerts@example.com".to_string(),
            sender_name: "Test".to_string(),
        }
    }

    fn test_alert() -> MotionAlert {
        MotionAlert {
            device_name: "Garage Cam".to_string(),
            magnitude: 2.5,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_no_recipient_is_silent_noop() {
        let service = EmailService::new(test_config(true, "console"));
        let result = service.notify_motion(None, &test_alert()).await;
        assert_eq!(result, NotificationResult::NoRecipient);
    }

    #[tokio::test]
    async fn test_empty_recipient_is_silent_noop() {
        let service = EmailService::new(test_config(true, "console"));
        let result = service.notify_motion(Some(""), &test_alert()).await;
        assert_eq!(result, NotificationResult::NoRecipient);
    }

    #[tokio::test]
    async fn test_disabled_service_reports_disabled() {
        let service = EmailService::new(test_config(false, "console"));
        let result = service
            .notify_motion(Some("owner@example.com"), &test_alert())
            .await;
        assert_eq!(result, NotificationResult::Disabled);
    }

    #[tokio::test]
    async fn test_console_provider_sends() {
        let service = EmailService::new(test_config(true, "console"));
        let result = service
            .notify_motion(Some("owner@example.com"), &test_alert())
            .await;
        assert_eq!(result, NotificationResult::Sent);
    }

    #[tokio::test]
    async fn test_unknown_provider_reports_failure() {
        let service = EmailService::new(test_config(true, "carrier-pigeon"));
        let result = service
            .notify_motion(Some("owner@example.com"), &test_alert())
            .await;
        assert!(matches!(result, NotificationResult::Failed(_)));
    }

    #[tokio::test]
    async fn test_sendgrid_without_key_reports_failure() {
        let service = EmailService::new(test_config(true, "sendgrid"));
        let result = service
            .notify_motion(Some("owner@example.com"), &test_alert())
            .await;
        assert!(matches!(result, NotificationResult::Failed(_)));
    }
}
