use askama::Template;

use crate::{
    models::poll::{Choice, Poll},
    utils::request_helper::format_date,
};

pub const SUBMIT_VOTE_ID: &str = "submitVote";
pub const SUBMIT_VOTE_LABEL: &str = "Submit Vote";

pub fn choice_option_id(choice_id: u64) -> String {
    format!("choice-option-{choice_id}")
}

#[derive(Template)]
#[template(path = "vote/already_voted.html")]
struct AlreadyVotedTemplate<'a> {
    poll: &'a Poll,
}

#[derive(Template)]
#[template(path = "vote/inactive.html")]
struct InactiveTemplate<'a> {
    poll: &'a Poll,
}

struct BallotOption<'a> {
    option_id: String,
    choice: &'a Choice,
}

#[derive(Template)]
#[template(path = "vote/ballot.html")]
struct BallotTemplate<'a> {
    poll: &'a Poll,
    created: String,
    options: Vec<BallotOption<'a>>,
    submit_id: &'a str,
    submit_label: &'a str,
}

#[derive(Template)]
#[template(path = "vote/load_error.html")]
struct LoadErrorTemplate<'a> {
    message: &'a str,
}

pub fn already_voted(poll: &Poll) -> askama::Result<String> {
    AlreadyVotedTemplate { poll }.render()
}

pub fn inactive(poll: &Poll) -> askama::Result<String> {
    InactiveTemplate { poll }.render()
}

/// One radio option per choice and a disabled submit button.
pub fn ballot(poll: &Poll) -> askama::Result<String> {
    let options = poll
        .choices
        .iter()
        .map(|choice| BallotOption {
            option_id: choice_option_id(choice.id),
            choice,
        })
        .collect();
    BallotTemplate {
        poll,
        created: format_date(&poll.pub_date),
        options,
        submit_id: SUBMIT_VOTE_ID,
        submit_label: SUBMIT_VOTE_LABEL,
    }
    .render()
}

pub fn load_error(message: &str) -> askama::Result<String> {
    LoadErrorTemplate { message }.render()
}
