use askama::Template;

use crate::{models::poll::Poll, utils::request_helper::format_date};

#[derive(Template)]
#[template(path = "polls/empty.html")]
struct EmptyPollsTemplate;

struct PollCard<'a> {
    poll: &'a Poll,
    created: String,
}

#[derive(Template)]
#[template(path = "polls/list.html")]
struct PollListTemplate<'a> {
    cards: Vec<PollCard<'a>>,
}

#[derive(Template)]
#[template(path = "polls/error_panel.html")]
struct ErrorPanelTemplate<'a> {
    message: &'a str,
    action: &'a str,
}

pub fn empty_polls() -> askama::Result<String> {
    EmptyPollsTemplate.render()
}

pub fn poll_list(polls: &[Poll]) -> askama::Result<String> {
    let cards = polls
        .iter()
        .map(|poll| PollCard {
            poll,
            created: format_date(&poll.pub_date),
        })
        .collect();
    PollListTemplate { cards }.render()
}

/// Error panel with a retry bound to `action`.
pub fn error_panel(message: &str, action: &str) -> askama::Result<String> {
    ErrorPanelTemplate { message, action }.render()
}
