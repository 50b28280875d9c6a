use async_trait::async_trait;
use reqwest::{header::COOKIE, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    dtos::{
        requests::CreatePollRequest,
        responses::{ApiOutcome, ErrorPayload, PollListResponse, VoteResponse},
    },
    error::ApiError,
    models::poll::Poll,
    utils::request_helper::CSRF_HEADER_NAME,
};

/// Access to the remote polls API.
#[async_trait]
pub trait PollRepository: Send + Sync {
    async fn list_polls(&self) -> Result<ApiOutcome<Vec<Poll>>, ApiError>;

    async fn get_poll(&self, poll_id: u64) -> Result<ApiOutcome<Poll>, ApiError>;

    async fn create_poll(
        &self,
        request: &CreatePollRequest,
        csrf_token: &str,
    ) -> Result<ApiOutcome<Value>, ApiError>;

    async fn cast_vote(
        &self,
        poll_id: u64,
        choice_id: u64,
        csrf_token: &str,
    ) -> Result<ApiOutcome<VoteResponse>, ApiError>;
}

/// `PollRepository` over HTTP. The page's cookie string is forwarded on every request, the
/// way a same-origin `fetch` would send it.
pub struct HttpPollRepository {
    client: Client,
    base_url: String,
    cookie: Option<String>,
}

impl HttpPollRepository {
    pub fn new(client: Client, base_url: &str, cookie: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            cookie: cookie.filter(|c| !c.trim().is_empty()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and reads a JSON body whatever the status.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiOutcome<T>, ApiError> {
        let request = match &self.cookie {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        let payload: Value = serde_json::from_slice(&body)?;

        if status.is_success() {
            debug!(%status, "polls api request succeeded");
            Ok(ApiOutcome::Success(serde_json::from_value(payload)?))
        } else {
            warn!(%status, "polls api request failed");
            Ok(ApiOutcome::Failure(ErrorPayload::from_value(
                status.as_u16(),
                payload,
            )))
        }
    }
}

#[async_trait]
impl PollRepository for HttpPollRepository {
    async fn list_polls(&self) -> Result<ApiOutcome<Vec<Poll>>, ApiError> {
        let request = self.client.get(self.url("/api/polls/"));
        Ok(match self.send::<PollListResponse>(request).await? {
            ApiOutcome::Success(list) => ApiOutcome::Success(list.results),
            ApiOutcome::Failure(payload) => ApiOutcome::Failure(payload),
        })
    }

    async fn get_poll(&self, poll_id: u64) -> Result<ApiOutcome<Poll>, ApiError> {
        let request = self.client.get(self.url(&format!("/api/polls/{poll_id}/")));
        self.send(request).await
    }

    async fn create_poll(
        &self,
        request: &CreatePollRequest,
        csrf_token: &str,
    ) -> Result<ApiOutcome<Value>, ApiError> {
        let request = self
            .client
            .post(self.url("/api/polls/"))
            .header(CSRF_HEADER_NAME, csrf_token)
            .json(request);
        self.send(request).await
    }

    async fn cast_vote(
        &self,
        poll_id: u64,
        choice_id: u64,
        csrf_token: &str,
    ) -> Result<ApiOutcome<VoteResponse>, ApiError> {
        let request = self
            .client
            .post(self.url(&format!("/api/polls/{poll_id}/vote/{choice_id}/")))
            .header(CSRF_HEADER_NAME, csrf_token)
            .json(&serde_json::json!({}));
        self.send(request).await
    }
}
