use std::{
    collections::VecDeque,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::oneshot};

use crate::{
    app,
    config::{settings::AppConfig, startup::AppState},
    controllers::page_session::{ActiveView, PageSession},
    dtos::{
        requests::CreatePollRequest,
        responses::{ApiOutcome, ErrorPayload, VoteResponse},
    },
    error::ApiError,
    models::poll::{Choice, Creator, Poll},
    page::document::Document,
    repositories::poll_repository::PollRepository,
};

/// What a fake endpoint answers with.
#[derive(Clone, Debug)]
pub enum Scripted<T> {
    Ok(T),
    Fail(u16, Value),
    Network(String),
}

impl<T> Scripted<T> {
    fn into_result(self) -> Result<ApiOutcome<T>, ApiError> {
        match self {
            Scripted::Ok(value) => Ok(ApiOutcome::Success(value)),
            Scripted::Fail(status, payload) => Ok(ApiOutcome::Failure(ErrorPayload::from_value(
                status, payload,
            ))),
            Scripted::Network(message) => Err(ApiError::Network(message)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    ListPolls,
    GetPoll(u64),
    CreatePoll {
        request: CreatePollRequest,
        token: String,
    },
    CastVote {
        poll_id: u64,
        choice_id: u64,
        token: String,
    },
}

type GatedList = (Option<oneshot::Receiver<()>>, Scripted<Vec<Poll>>);

/// In-memory `PollRepository` that records every call.
pub struct FakePollRepository {
    list: Mutex<VecDeque<GatedList>>,
    poll: Mutex<Scripted<Poll>>,
    create: Mutex<Scripted<Value>>,
    vote: Mutex<Scripted<VoteResponse>>,
    calls: Mutex<Vec<Call>>,
}

impl FakePollRepository {
    pub fn new() -> Self {
        Self {
            list: Mutex::new(VecDeque::new()),
            poll: Mutex::new(Scripted::Ok(sample_poll())),
            create: Mutex::new(Scripted::Ok(json!({"question": "q", "choices": []}))),
            vote: Mutex::new(Scripted::Ok(VoteResponse::default())),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queues one `list_polls` answer. A gated answer waits until the sender fires.
    pub fn queue_list(&self, gate: Option<oneshot::Receiver<()>>, answer: Scripted<Vec<Poll>>) {
        self.list.lock().unwrap().push_back((gate, answer));
    }

    pub fn answer_poll(&self, answer: Scripted<Poll>) {
        *self.poll.lock().unwrap() = answer;
    }

    pub fn answer_create(&self, answer: Scripted<Value>) {
        *self.create.lock().unwrap() = answer;
    }

    pub fn answer_vote(&self, answer: Scripted<VoteResponse>) {
        *self.vote.lock().unwrap() = answer;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PollRepository for FakePollRepository {
    async fn list_polls(&self) -> Result<ApiOutcome<Vec<Poll>>, ApiError> {
        self.record(Call::ListPolls);
        let next = self.list.lock().unwrap().pop_front();
        let (gate, answer) = next.unwrap_or((None, Scripted::Ok(Vec::new())));
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        answer.into_result()
    }

    async fn get_poll(&self, poll_id: u64) -> Result<ApiOutcome<Poll>, ApiError> {
        self.record(Call::GetPoll(poll_id));
        let answer = self.poll.lock().unwrap().clone();
        answer.into_result()
    }

    async fn create_poll(
        &self,
        request: &CreatePollRequest,
        csrf_token: &str,
    ) -> Result<ApiOutcome<Value>, ApiError> {
        self.record(Call::CreatePoll {
            request: request.clone(),
            token: csrf_token.to_owned(),
        });
        let answer = self.create.lock().unwrap().clone();
        answer.into_result()
    }

    async fn cast_vote(
        &self,
        poll_id: u64,
        choice_id: u64,
        csrf_token: &str,
    ) -> Result<ApiOutcome<VoteResponse>, ApiError> {
        self.record(Call::CastVote {
            poll_id,
            choice_id,
            token: csrf_token.to_owned(),
        });
        let answer = self.vote.lock().unwrap().clone();
        answer.into_result()
    }
}

pub fn choice(id: u64, text: &str, votes: u64, percentage: f64) -> Choice {
    Choice {
        id,
        choice_text: text.to_owned(),
        votes,
        percentage,
    }
}

/// Poll 42, active, with choices 7 (3 votes, 60%) and 8 (2 votes, 40%).
pub fn sample_poll() -> Poll {
    Poll {
        id: 42,
        question: String::from("Tabs or spaces?"),
        created_by: Creator {
            id: Some(1),
            username: String::from("alice"),
            email: None,
        },
        pub_date: String::from("2024-03-05T12:00:00"),
        active: true,
        choices: vec![choice(7, "Tabs", 3, 60.0), choice(8, "Spaces", 2, 40.0)],
        total_votes: 5,
        user_has_voted: false,
    }
}

pub fn poll_with_question(id: u64, question: &str) -> Poll {
    Poll {
        id,
        question: question.to_owned(),
        ..sample_poll()
    }
}

pub fn session_for(path: &str, cookie: &str, repository: Arc<FakePollRepository>) -> PageSession {
    PageSession::bootstrap(Document::new(path, cookie), repository).unwrap()
}

pub fn inner_html(session: &PageSession, id: &str) -> String {
    session
        .page()
        .with(|doc| doc.inner_html(id).unwrap_or_default().to_owned())
}

pub fn is_disabled(session: &PageSession, id: &str) -> bool {
    session
        .page()
        .with(|doc| doc.element(id).map(|el| el.disabled).unwrap_or(false))
}

pub fn message(session: &PageSession) -> (String, String, bool) {
    session.page().with(|doc| {
        let el = doc.element("message").cloned().unwrap_or_default();
        (el.inner_html, el.class_name, el.hidden)
    })
}

pub fn vote_controller(session: &PageSession) -> &crate::controllers::vote_controller::VoteController {
    match session.view() {
        Some(ActiveView::Vote(vote)) => vote,
        _ => panic!("expected a vote view"),
    }
}

pub fn create_controller(
    session: &PageSession,
) -> &crate::controllers::create_poll_controller::CreatePollController {
    match session.view() {
        Some(ActiveView::CreatePoll(create)) => create,
        _ => panic!("expected a create view"),
    }
}

/// Headers seen by the mock polls API, one entry per mutating request.
#[derive(Clone, Default)]
pub struct MockApiState {
    pub seen: Arc<Mutex<Vec<(String, Option<String>, Option<String>)>>>,
}

const MOCK_TOKEN: &str = "tok123";

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

async fn mock_list() -> Json<Value> {
    Json(json!({
        "count": 1,
        "results": [sample_poll()]
    }))
}

async fn mock_detail(Path(poll_id): Path<u64>) -> (StatusCode, Json<Value>) {
    if poll_id == 42 {
        (StatusCode::OK, Json(json!(sample_poll())))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "No Poll matches the given query."})),
        )
    }
}

async fn mock_create(
    State(state): State<MockApiState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let token = header(&headers, "x-csrftoken");
    state.seen.lock().unwrap().push((
        String::from("create"),
        token.clone(),
        header(&headers, "cookie"),
    ));
    if token.as_deref() != Some(MOCK_TOKEN) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"detail": "CSRF Failed: CSRF token missing."})),
        );
    }
    (StatusCode::CREATED, Json(body))
}

async fn mock_vote(
    State(state): State<MockApiState>,
    Path((poll_id, choice_id)): Path<(u64, u64)>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let token = header(&headers, "x-csrftoken");
    state.seen.lock().unwrap().push((
        format!("vote {poll_id}/{choice_id}"),
        token.clone(),
        header(&headers, "cookie"),
    ));
    if token.as_deref() != Some(MOCK_TOKEN) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"detail": "CSRF Failed: CSRF token missing."})),
        );
    }
    if choice_id == 99 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid choice for this poll"})),
        );
    }
    (StatusCode::CREATED, Json(json!({"message": "Vote recorded"})))
}

async fn mock_broken() -> &'static str {
    "<html>Server Error</html>"
}

/// Serves a stand-in for the polls API on an ephemeral port.
pub async fn spawn_mock_api() -> (SocketAddr, MockApiState) {
    let state = MockApiState::default();
    let router = Router::new()
        .route("/api/polls/", get(mock_list).post(mock_create))
        .route("/api/polls/{poll_id}/", get(mock_detail))
        .route("/api/polls/{poll_id}/vote/{choice_id}/", post(mock_vote))
        .route("/broken/api/polls/", get(mock_broken))
        .with_state(state.clone());
    (serve(router).await, state)
}

/// Runs the page host against the polls API at `api`.
pub async fn spawn_app(api: SocketAddr) -> (SocketAddr, AppState) {
    let state = AppState::new(AppConfig {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        api_base_url: format!("http://{api}"),
        session_ttl: Duration::from_secs(60),
    });
    (serve(app::create_app(state.clone())).await, state)
}

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Pulls the session id out of a rendered page.
pub fn session_id_of(html: &str) -> String {
    let marker = "data-session=\"";
    let start = html.find(marker).expect("page has a session") + marker.len();
    html[start..start + 36].to_owned()
}
