use std::sync::Arc;

use crate::{
    config::settings::AppConfig,
    repositories::{poll_repository::HttpPollRepository, session_repository::PageSessionRepository},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub http: reqwest::Client,
    pub sessions: Arc<PageSessionRepository>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let sessions = Arc::new(PageSessionRepository::new(config.session_ttl));
        Self {
            config: Arc::new(config),
            http: reqwest::Client::new(),
            sessions,
        }
    }

    /// A repository that talks to the polls API on behalf of a browser with `cookie`.
    pub fn poll_repository(&self, cookie: Option<String>) -> HttpPollRepository {
        HttpPollRepository::new(self.http.clone(), &self.config.api_base_url, cookie)
    }
}
