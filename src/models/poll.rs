use serde::{Deserialize, Serialize};

/// A poll as returned by `GET /api/polls/` and `GET /api/polls/{id}/`.
///
/// `total_votes` and every `Choice::percentage` are computed by the server and rendered as-is;
/// they are never recomputed or cross-checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: u64,
    pub question: String,
    #[serde(default)]
    pub created_by: Creator,
    #[serde(default)]
    pub pub_date: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub total_votes: u64,
    /// Only meaningful on the detail endpoint.
    #[serde(default)]
    pub user_has_voted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub id: u64,
    pub choice_text: String,
    #[serde(default)]
    pub votes: u64,
    #[serde(default)]
    pub percentage: f64,
}
