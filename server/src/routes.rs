//! Route handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
};
use chrono::Utc;
use common::{
    JobPost, JobPostForm, JobStatus, Location,
    salary::{SalaryOption, SalarySelector},
    suggest,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

/// Handler for GET / (root)
pub async fn root_handler() -> &'static str {
    "Job Board API\n\nEndpoints:\n  GET  /jobs?salary=&location=&title=\n  POST /jobs\n  GET  /recruiter-jobs/{email}\n  POST /checkout-session\n  GET  /validate-purchase/{id}\n  POST /start-challenge\n  POST /sign-in\n  GET  /signed-in\n  POST /sign-out\n  GET  /suggest/locations?q=\n  GET  /suggest/skills?q=\n  GET  /salary-bands?min=\n"
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    salary: Option<String>,
    location: Option<String>,
    title: Option<String>,
}

/// Treats absent and empty parameters the same; the search form submits
/// empty strings for untouched fields.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Handler for GET /jobs?salary=&location=&title=
pub async fn search_jobs_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<JobPost>>, AppError> {
    let salary = match present(&params.salary) {
        Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
            AppError::BadRequest("salary provided but could not convert to int".to_string())
        })?),
        None => None,
    };

    let posts = state
        .store
        .search(salary, present(&params.location), present(&params.title));
    Ok(Json(posts))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterJobsResponse {
    pub jobs: Vec<JobPost>,
    pub email: String,
}

/// Handler for GET /recruiter-jobs/{email}
pub async fn recruiter_jobs_handler(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Json<RecruiterJobsResponse> {
    let jobs = state.store.by_email(&email);
    Json(RecruiterJobsResponse { jobs, email })
}

#[derive(Debug, Serialize)]
pub struct CheckoutSessionResponse {
    pub url: String,
}

/// Handler for POST /checkout-session.
///
/// Takes the posting form, opens a checkout session with the payment
/// provider and stores the post pending payment. The recruiter is redirected
/// to the returned URL to pay.
pub async fn checkout_session_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(mut form): Json<JobPostForm>,
) -> Result<(StatusCode, Json<CheckoutSessionResponse>), AppError> {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("missing Origin header".to_string()))?;

    form.company_logo_url = form.company_logo_url.map(|url| url.to_lowercase());
    form.company_website = form.company_website.to_lowercase();
    form.login_email = form.login_email.to_lowercase();

    let success_url = format!("{origin}/success");
    let cancel_url = format!("{origin}/post-job");

    let job_id = Uuid::new_v4().to_string();
    let session = state
        .payments
        .create_session(&job_id, &form, &success_url, &cancel_url)
        .await?;

    info!("created checkout session {} for job {job_id}", session.id);

    let now = Utc::now();
    let post = JobPost {
        form,
        job_id,
        session_id: session.id,
        payment_intent_id: None,
        created_at: now,
        updated_at: now,
        expires_at: None,
        clicked_apply_count: 0,
        status: JobStatus::PendingPayment,
    };
    state.store.insert(post)?;

    Ok((
        StatusCode::CREATED,
        Json(CheckoutSessionResponse { url: session.url }),
    ))
}

/// A posting created directly, already carrying its payment identifiers.
/// The success page submits this after the provider redirects back.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub amount: i64,
    pub values: JobPostForm,
    pub id: String,
    #[serde(default)]
    pub company_logo_url: Option<String>,
    pub status: JobStatus,
    #[serde(default)]
    pub payment_intent_id: Option<String>,
    pub checkout_session_id: String,
}

/// Handler for POST /jobs
pub async fn create_job_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateJobRequest>,
) -> Result<Json<JobPost>, AppError> {
    let mut form = request.values;
    if request.company_logo_url.is_some() {
        form.company_logo_url = request.company_logo_url;
    }

    let now = Utc::now();
    let post = JobPost {
        form,
        job_id: request.id,
        session_id: request.checkout_session_id,
        payment_intent_id: request.payment_intent_id,
        created_at: now,
        updated_at: now,
        expires_at: None,
        clicked_apply_count: 0,
        status: request.status,
    };
    state.store.insert(post.clone())?;

    Ok(Json(post))
}

/// Handler for GET /validate-purchase/{id}.
///
/// Confirms with the payment provider that the post's checkout session was
/// paid, activates the post and provisions the recruiter's account.
pub async fn validate_purchase_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<JobPost>, AppError> {
    let post = state
        .store
        .get(&id)
        .ok_or_else(|| AppError::NotFound("job not found".to_string()))?;

    let session = state.payments.get_session(&post.session_id).await?;
    if !session.paid() {
        warn!("checkout session {} not paid", post.session_id);
        return Err(AppError::PaymentNotCompleted);
    }

    let updated = state
        .store
        .activate(&id)?
        .ok_or_else(|| AppError::NotFound("job not found".to_string()))?;

    state
        .auth
        .ensure_account(&updated.form.login_email.to_lowercase());

    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartChallengeRequest {
    pub email: String,
    pub request_origin: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartChallengeResponse {
    pub challenge_started: bool,
    pub jobs_found: bool,
}

/// Handler for POST /start-challenge.
///
/// Mails a magic link to a recruiter who has posts on the board. The
/// response always says which half failed: no posts, or the mail send.
pub async fn start_challenge_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartChallengeRequest>,
) -> Result<(StatusCode, Json<StartChallengeResponse>), AppError> {
    let jobs = state.store.by_email(&request.email);
    if jobs.is_empty() {
        warn!("no job posts found for {}, not starting challenge", request.email);
        return Ok((
            StatusCode::NOT_FOUND,
            Json(StartChallengeResponse {
                challenge_started: false,
                jobs_found: false,
            }),
        ));
    }
    info!("found {} job posts for {}", jobs.len(), request.email);

    let token = crate::auth::mint_challenge(&request.email, state.config.auth_secret.as_bytes())?;
    state.auth.set_challenge(&request.email, &token)?;

    let magic_link = format!(
        "{}/magic-link?email={}&token={token}",
        request.request_origin, request.email
    );
    let body = format!(
        "<h1>You are nearly there! Please use the link below to log in:</h1><br/><br/>\n\t<a href='{magic_link}'>Log In</a>"
    );

    let sent = state
        .mailer
        .send(&request.email.to_lowercase(), "Your login link", &body)
        .await;

    match sent {
        Ok(()) => Ok((
            StatusCode::CREATED,
            Json(StartChallengeResponse {
                challenge_started: true,
                jobs_found: true,
            }),
        )),
        Err(error) => {
            warn!("error sending magic link email: {error}");
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StartChallengeResponse {
                    challenge_started: false,
                    jobs_found: true,
                }),
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub session_token: String,
}

/// Handler for POST /sign-in
pub async fn sign_in_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, AppError> {
    let session_token = state.auth.sign_in(
        &request.email,
        &request.answer,
        state.config.auth_secret.as_bytes(),
    )?;
    info!("signed in {}", request.email.to_lowercase());
    Ok(Json(SignInResponse { session_token }))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Handler for GET /signed-in. Always a plain boolean, never an error.
pub async fn signed_in_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<bool> {
    let signed_in = bearer_token(&headers)
        .map(|token| state.auth.signed_in(token))
        .unwrap_or(false);
    Json(signed_in)
}

/// Handler for POST /sign-out
pub async fn sign_out_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<bool> {
    let dropped = bearer_token(&headers)
        .map(|token| state.auth.sign_out(token))
        .unwrap_or(false);
    Json(dropped)
}

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    q: Option<String>,
}

/// Handler for GET /suggest/locations?q=
pub async fn suggest_locations_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestParams>,
) -> Json<Vec<Location>> {
    let query = params.q.unwrap_or_default();
    let suggestions = suggest::location_suggestions(&state.locations, &query)
        .into_iter()
        .cloned()
        .collect();
    Json(suggestions)
}

/// Handler for GET /suggest/skills?q=
pub async fn suggest_skills_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestParams>,
) -> Json<Vec<String>> {
    let query = params.q.unwrap_or_default();
    let suggestions = suggest::skill_suggestions(&state.skills, &query)
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(suggestions)
}

#[derive(Debug, Deserialize)]
pub struct SalaryBandsParams {
    min: Option<i64>,
}

/// Handler for GET /salary-bands?min=
///
/// The max-salary options with their enabled flags after applying the given
/// minimum.
pub async fn salary_bands_handler(Query(params): Query<SalaryBandsParams>) -> Json<Vec<SalaryOption>> {
    let mut selector = SalarySelector::new();
    selector.set_min(params.min);
    Json(selector.max_options)
}
