//! Job-post data model.
//!
//! Wire names are camelCase to match what the posting form submits and what
//! the listing pages render, so records round-trip through the store file
//! and the API unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency a salary range is quoted in. Checkout itself always charges GBP.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    GBP,
    USD,
    EUR,
    AUD,
    CAD,
    SGD,
    CHF,
    INR,
    JPY,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PlanType {
    Standard,
    Premium,
}

impl PlanType {
    /// Price factor in pounds per 30 days of listing.
    pub fn price_factor(self) -> i64 {
        match self {
            PlanType::Standard => 35,
            PlanType::Premium => 90,
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanType::Standard => write!(f, "Standard"),
            PlanType::Premium => write!(f, "Premium"),
        }
    }
}

/// Checkout amount in minor currency units for a plan of the given duration.
///
/// Integer arithmetic, division before the minor-unit scaling: a 45-day
/// Standard plan is 45 * 35 / 30 = 52 pounds, charged as 5200.
pub fn checkout_amount(plan: PlanType, plan_duration: i64) -> i64 {
    plan_duration * plan.price_factor() / 30 * 100
}

/// Lifecycle of a posting: created pending payment, activated once the
/// checkout session is paid, expired when the plan runs out.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Active,
    Expired,
    PendingPayment,
}

/// The fields a recruiter submits when posting a job.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobPostForm {
    #[serde(rename = "companyLogoURL", skip_serializing_if = "Option::is_none")]
    pub company_logo_url: Option<String>,
    pub company_name: String,
    pub company_website: String,
    pub currency: Currency,
    pub description: String,
    pub how_to_apply: String,
    pub location: String,
    pub max_salary: i64,
    pub min_salary: i64,
    #[serde(rename = "minYOE")]
    pub min_yoe: i64,
    pub title: String,
    pub visa_sponsorship: bool,
    pub login_email: String,
    pub plan_duration: i64,
    pub plan_type: PlanType,
}

/// A stored posting: the submitted form plus everything the checkout flow
/// attaches to it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobPost {
    #[serde(flatten)]
    pub form: JobPostForm,
    #[serde(rename = "jobID")]
    pub job_id: String,
    #[serde(rename = "sessionID")]
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_intent_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub clicked_apply_count: i64,
    pub status: JobStatus,
}
