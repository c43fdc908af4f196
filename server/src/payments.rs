//! Payment-provider client.
//!
//! One fixed endpoint, bearer-authenticated with the configured secret key.
//! The provider's wire format is snake_case; this module owns the reshaping
//! from the camelCase posting model. Single round trips, no retries.

use common::{JobPostForm, checkout_amount};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Checkout always charges in GBP regardless of the salary currency on the
/// posting.
const CHECKOUT_CURRENCY: &str = "gbp";

#[derive(Debug, Serialize)]
struct CreateSessionRequest<'a> {
    client_reference_id: &'a str,
    success_url: &'a str,
    cancel_url: &'a str,
    customer_email: &'a str,
    mode: &'static str,
    product_name: String,
    currency: &'static str,
    unit_amount: i64,
    quantity: i64,
}

/// What the provider tells us about a checkout session.
#[derive(Debug, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    #[serde(default)]
    pub url: String,
    pub payment_status: String,
}

impl CheckoutSession {
    pub fn paid(&self) -> bool {
        self.payment_status == "paid"
    }
}

#[derive(Clone)]
pub struct Payments {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl Payments {
    pub fn new(http: reqwest::Client, base_url: String, secret_key: String) -> Self {
        Self {
            http,
            base_url,
            secret_key,
        }
    }

    /// Creates a hosted checkout session for a new posting. The caller gets
    /// back the session id to store and the URL to redirect the recruiter to.
    pub async fn create_session(
        &self,
        job_id: &str,
        form: &JobPostForm,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, AppError> {
        let request = CreateSessionRequest {
            client_reference_id: job_id,
            success_url,
            cancel_url,
            customer_email: &form.login_email,
            mode: "payment",
            product_name: format!("{} plan for {} days.", form.plan_type, form.plan_duration),
            currency: CHECKOUT_CURRENCY,
            unit_amount: checkout_amount(form.plan_type, form.plan_duration),
            quantity: 1,
        };

        let session = self
            .http
            .post(format!("{}/checkout/sessions", self.base_url))
            .bearer_auth(&self.secret_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<CheckoutSession>()
            .await?;

        Ok(session)
    }

    /// Fetches a session to check whether it has been paid.
    pub async fn get_session(&self, session_id: &str) -> Result<CheckoutSession, AppError> {
        let session = self
            .http
            .get(format!("{}/checkout/sessions/{session_id}", self.base_url))
            .bearer_auth(&self.secret_key)
            .send()
            .await?
            .error_for_status()?
            .json::<CheckoutSession>()
            .await?;

        Ok(session)
    }
}
