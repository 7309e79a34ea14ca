use serde::Serialize;

use crate::error::EmailError;
use crate::validators::validate_email;

/// HTTP client for the transactional email service.
#[derive(Clone)]
pub struct EmailClient {
    http_client: reqwest::Client,
    base_url: String,
    sender: SenderEmail,
}

/// A validated sender address.
#[derive(Clone)]
pub struct SenderEmail(String);

impl SenderEmail {
    pub fn parse(s: String) -> Result<Self, EmailError> {
        let email = validate_email(&s).map_err(|e| EmailError::InvalidAddress(e.to_string()))?;
        Ok(Self(email))
    }

    pub fn inner(&self) -> &str {
        &self.0
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest {
    from: String,
    to: String,
    subject: String,
    html: String,
}

impl EmailClient {
    pub fn new(base_url: String, sender: SenderEmail, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            base_url,
            sender,
        }
    }

    /// Deliver a single email through the provider's REST endpoint.
    ///
    /// # Errors
    /// Returns `SendFailed` if the request cannot be sent or the service
    /// answers with a non-success status
    pub async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        html_content: &str,
    ) -> Result<(), EmailError> {
        let url = format!("{}/email", self.base_url);
        let request = SendEmailRequest {
            from: self.sender.inner().to_string(),
            to: recipient.to_string(),
            subject: subject.to_string(),
            html: html_content.to_string(),
        };

        self.http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| EmailError::SendFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| EmailError::SendFailed(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_parse_valid_email() {
        let sender = SenderEmail::parse("no-reply@userhub.local".to_string());
        assert!(sender.is_ok());
        assert_eq!(sender.unwrap().inner(), "no-reply@userhub.local");
    }

    #[test]
    fn test_sender_parse_invalid_email() {
        let sender = SenderEmail::parse("invalid-email".to_string());
        assert!(matches!(sender, Err(EmailError::InvalidAddress(_))));
    }
}
