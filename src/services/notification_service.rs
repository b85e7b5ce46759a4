use crate::error::{Error, Result};
use reqwest::Client;
use serde_json::json;

/// Hands messages to the external mailer endpoint. Delivery mechanics live
/// on the other side of the webhook; this side only reports success or
/// failure per message.
#[derive(Clone)]
pub struct NotificationService {
    client: Client,
    mailer_url: String,
    mailer_secret: String,
    from_email: String,
}

impl NotificationService {
    pub fn new(mailer_url: String, mailer_secret: String, from_email: String) -> Self {
        Self {
            client: Client::new(),
            mailer_url,
            mailer_secret,
            from_email,
        }
    }

    pub async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        let payload = json!({
            "from": self.from_email,
            "to": recipient,
            "subject": subject,
            "body": body,
        });

        let response = self
            .client
            .post(&self.mailer_url)
            .header("X-Mailer-Secret", &self.mailer_secret)
            .json(&payload)
            .send()
            .await
            .map_err(|err| Error::Dispatch(err.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Dispatch(format!(
                "Mailer returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_mailer_maps_to_dispatch_error() {
        let service = NotificationService::new(
            "http://127.0.0.1:1/send".to_string(),
            "secret".to_string(),
            "hr@example.com".to_string(),
        );
        let err = tokio_test::block_on(service.send("r1@example.com", "subject", "body"))
            .unwrap_err();
        assert!(matches!(err, Error::Dispatch(_)));
    }
}
