use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

/// Runtime configuration, read from the environment once at startup.
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_path: String,
    pub payments_url: String,
    pub payments_key: String,
    pub mail_url: String,
    pub mail_key: String,
    pub mail_sender: String,
    pub auth_secret: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            host: try_load("HOST", "127.0.0.1"),
            port: try_load("PORT", "3000"),
            data_path: try_load("DATA_PATH", "data/jobs.json"),
            payments_url: try_load("PAYMENTS_URL", "https://payments.example.com/v1"),
            payments_key: mandatory("PAYMENTS_SECRET_KEY"),
            mail_url: try_load("MAIL_URL", "https://mail.example.com/v1"),
            mail_key: mandatory("MAIL_API_KEY"),
            mail_sender: try_load("MAIL_SENDER", "no-reply@upfront.example"),
            auth_secret: mandatory("AUTH_SECRET"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

fn mandatory(key: &str) -> String {
    env::var(key)
        .map_err(|_| {
            warn!("Mandatory environment variable {key} not set");
        })
        .expect("Environment misconfigured!")
}
