use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{models::poll::Poll, page::document::Patch};

/// Body of `GET /api/polls/`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PollListResponse {
    #[serde(default)]
    pub results: Vec<Poll>,
}

/// Body of a successful `POST /api/polls/{id}/vote/{choice}/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of a request that reached the server and returned a JSON body.
#[derive(Debug)]
pub enum ApiOutcome<T> {
    Success(T),
    Failure(ErrorPayload),
}

/// The JSON body of a non-success response, with the two fields the views know about pulled out.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPayload {
    pub status: u16,
    pub error: Option<String>,
    pub detail: Option<String>,
    pub raw: Value,
}

impl ErrorPayload {
    pub fn from_value(status: u16, raw: Value) -> Self {
        let field = |name: &str| {
            raw.get(name)
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
                .map(str::to_owned)
        };
        Self {
            status,
            error: field("error"),
            detail: field("detail"),
            raw,
        }
    }

    /// `detail`, else the whole payload serialized.
    pub fn detail_or_raw(&self) -> String {
        self.detail
            .clone()
            .unwrap_or_else(|| self.raw.to_string())
    }

    /// `error`, else `detail`, else `default`.
    pub fn error_or_detail(&self, default: &str) -> String {
        self.error
            .as_deref()
            .or(self.detail.as_deref())
            .unwrap_or(default)
            .to_owned()
    }
}

/// Body returned by the page event endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct EventResponse {
    pub patches: Vec<Patch>,
}
