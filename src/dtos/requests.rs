use serde::{Deserialize, Serialize};

/// Body of `POST /api/polls/`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CreatePollRequest {
    pub question: String,
    pub choices: Vec<String>,
}

/// The values of `createPollForm` at submit time, in field order.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct PollSubmission {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub choices: Vec<String>,
}

/// An event forwarded by the browser shim from a `data-action` binding.
#[derive(Deserialize, Clone, Debug)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PageEvent {
    LoadPolls,
    AddChoice,
    SubmitPoll(PollSubmission),
    LoadPoll,
    SelectChoice { choice_id: u64 },
    SubmitVote,
}

impl PageEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PageEvent::LoadPolls => "load_polls",
            PageEvent::AddChoice => "add_choice",
            PageEvent::SubmitPoll(_) => "submit_poll",
            PageEvent::LoadPoll => "load_poll",
            PageEvent::SelectChoice { .. } => "select_choice",
            PageEvent::SubmitVote => "submit_vote",
        }
    }
}
