//! Mail-provider client for the magic-link emails. Same posture as the
//! payments client: one fixed endpoint, bearer key, single round trip.

use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Serialize)]
struct SendMailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[derive(Clone)]
pub struct Mailer {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    sender: String,
}

impl Mailer {
    pub fn new(http: reqwest::Client, base_url: String, api_key: String, sender: String) -> Self {
        Self {
            http,
            base_url,
            api_key,
            sender,
        }
    }

    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), AppError> {
        let request = SendMailRequest {
            from: &self.sender,
            to,
            subject,
            html,
        };

        self.http
            .post(format!("{}/send", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
