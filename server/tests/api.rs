//! HTTP-level tests over the router, without any upstream services.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::Utc;
use common::{Currency, JobPost, JobPostForm, JobStatus, PlanType};
use http_body_util::BodyExt;
use server::{config::Config, router, state::AppState};
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        data_path: std::env::temp_dir()
            .join(format!("jobs-api-test-{}.json", uuid::Uuid::new_v4()))
            .to_string_lossy()
            .into_owned(),
        payments_url: "http://127.0.0.1:1".to_string(),
        payments_key: "sk_test".to_string(),
        mail_url: "http://127.0.0.1:1".to_string(),
        mail_key: "mk_test".to_string(),
        mail_sender: "no-reply@board.test".to_string(),
        auth_secret: "test-secret".to_string(),
    }
}

fn app() -> (Router, Arc<AppState>) {
    let state = AppState::new(test_config()).unwrap();
    (router(state.clone()), state)
}

fn seed_post(state: &AppState, title: &str, location: &str, max_salary: i64, email: &str) {
    let post = JobPost {
        form: JobPostForm {
            company_logo_url: None,
            company_name: "Acme".to_string(),
            company_website: "https://acme.example".to_string(),
            currency: Currency::GBP,
            description: "desc".to_string(),
            how_to_apply: "https://acme.example/apply".to_string(),
            location: location.to_string(),
            max_salary,
            min_salary: max_salary - 10_000,
            min_yoe: 2,
            title: title.to_string(),
            visa_sponsorship: false,
            login_email: email.to_string(),
            plan_duration: 30,
            plan_type: PlanType::Standard,
        },
        job_id: format!("job-{title}"),
        session_id: "cs_test".to_string(),
        payment_intent_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        expires_at: None,
        clicked_apply_count: 0,
        status: JobStatus::PendingPayment,
    };
    state.store.insert(post).unwrap();
}

async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn location_suggestions_filter_by_substring() {
    let (app, _state) = app();
    let (status, json) = get(app, "/suggest/locations?q=lon").await;
    assert_eq!(status, StatusCode::OK);

    let suggestions = json.as_array().unwrap();
    assert!(!suggestions.is_empty());
    for entry in suggestions {
        let city = entry["city"].as_str().unwrap().to_lowercase();
        let country = entry["country"].as_str().unwrap().to_lowercase();
        assert!(city.contains("lon") || country.contains("lon"));
    }
}

#[tokio::test]
async fn short_queries_suggest_nothing() {
    let (app, _state) = app();
    let (status, json) = get(app.clone(), "/suggest/locations?q=l").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 0);

    let (status, json) = get(app, "/suggest/skills").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn salary_bands_disable_below_min() {
    let (app, _state) = app();
    let (status, json) = get(app, "/salary-bands?min=50000").await;
    assert_eq!(status, StatusCode::OK);

    let options = json.as_array().unwrap();
    assert_eq!(options.len(), 14);
    for option in options {
        let value = option["value"].as_i64().unwrap();
        let enabled = option["enabled"].as_bool().unwrap();
        assert_eq!(enabled, value >= 50_000);
    }
}

#[tokio::test]
async fn job_search_filters_and_rejects_bad_salary() {
    let (app, state) = app();
    seed_post(&state, "Backend Engineer", "London, United Kingdom", 90_000, "a@x.com");
    seed_post(&state, "Frontend Engineer", "Paris, France", 60_000, "a@x.com");

    let (status, json) = get(app.clone(), "/jobs?salary=70000&location=&title=").await;
    assert_eq!(status, StatusCode::OK);
    let posts = json.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["title"], "Backend Engineer");

    let (status, json) = get(app, "/jobs?salary=lots").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["statusCode"], 400);
    assert!(json["message"].as_str().unwrap().contains("salary"));
}

#[tokio::test]
async fn recruiter_jobs_are_scoped_by_email() {
    let (app, state) = app();
    seed_post(&state, "Backend Engineer", "London, United Kingdom", 90_000, "a@x.com");
    seed_post(&state, "Data Engineer", "Berlin, Germany", 70_000, "b@y.com");

    let (status, json) = get(app, "/recruiter-jobs/a@x.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["email"], "a@x.com");
    assert_eq!(json["jobs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn signed_in_defaults_to_false() {
    let (app, _state) = app();
    let (status, json) = get(app, "/signed-in").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!(false));
}

#[tokio::test]
async fn start_challenge_without_posts_reports_no_jobs() {
    let (app, _state) = app();
    let (status, json) = post_json(
        app,
        "/start-challenge",
        r#"{"email":"nobody@x.com","requestOrigin":"http://localhost:3000"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["challengeStarted"], false);
    assert_eq!(json["jobsFound"], false);
}

#[tokio::test]
async fn created_jobs_show_up_in_search() {
    let (app, _state) = app();
    let body = r#"{
        "amount": 3500,
        "id": "job-direct-1",
        "companyLogoUrl": "https://blobs.example/logo.png",
        "status": "Active",
        "checkoutSessionId": "cs_direct",
        "paymentIntentId": "pi_direct",
        "values": {
            "companyName": "Acme",
            "companyWebsite": "https://acme.example",
            "currency": "GBP",
            "description": "desc",
            "howToApply": "https://acme.example/apply",
            "location": "London, United Kingdom",
            "maxSalary": 90000,
            "minSalary": 70000,
            "minYOE": 3,
            "title": "Platform Engineer",
            "visaSponsorship": true,
            "loginEmail": "jobs@acme.example",
            "planDuration": 30,
            "planType": "Standard"
        }
    }"#;

    let (status, json) = post_json(app.clone(), "/jobs", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["jobID"], "job-direct-1");
    assert_eq!(json["sessionID"], "cs_direct");
    assert_eq!(json["companyLogoURL"], "https://blobs.example/logo.png");
    assert_eq!(json["status"], "Active");

    let (status, json) = get(app, "/jobs?title=Platform").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn wrong_method_is_rejected_with_allow() {
    let (app, _state) = app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/salary-bands")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let allow = response.headers().get(header::ALLOW).unwrap();
    assert!(allow.to_str().unwrap().contains("GET"));
}
