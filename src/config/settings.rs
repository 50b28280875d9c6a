use std::{env, net::SocketAddr, time::Duration};

use tracing::error;

use crate::error::AppError;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:9000";
const DEFAULT_SESSION_TTL_SECS: u64 = 1800;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: SocketAddr,
    /// Origin of the polls API, e.g. `http://localhost:8000`.
    pub api_base_url: String,
    pub session_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let bind_address = env::var("BIND_ADDRESS")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_owned())
            .parse::<SocketAddr>()
            .map_err(|e| {
                error!("BIND_ADDRESS is not a valid socket address: {}", e);
                AppError::Configuration(format!("invalid BIND_ADDRESS: {e}"))
            })?;

        let api_base_url = env::var("POLLS_API_URL").map_err(|_| {
            error!("POLLS_API_URL not found in environment variables");
            AppError::Configuration(String::from("POLLS_API_URL not found"))
        })?;
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            error!("POLLS_API_URL must be an http(s) url: {}", api_base_url);
            return Err(AppError::Configuration(format!(
                "invalid POLLS_API_URL: {api_base_url}"
            )));
        }

        let session_ttl = match env::var("SESSION_TTL_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                error!("SESSION_TTL_SECS is not a number: {}", e);
                AppError::Configuration(format!("invalid SESSION_TTL_SECS: {e}"))
            })?,
            Err(_) => DEFAULT_SESSION_TTL_SECS,
        };

        Ok(Self {
            bind_address,
            api_base_url,
            session_ttl: Duration::from_secs(session_ttl),
        })
    }
}
