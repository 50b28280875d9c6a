use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, PoisonError,
    },
    time::Duration,
};

use tracing::{debug, info, warn};

use crate::{
    dtos::responses::ApiOutcome,
    models::{poll::Poll, view::poll_id_from_path},
    page::{document::Element, handle::PageHandle},
    repositories::poll_repository::PollRepository,
    templates::{
        layout::{MESSAGE_ID, POLL_CONTAINER_ID},
        rendered_or_log,
        vote::{self, SUBMIT_VOTE_ID, SUBMIT_VOTE_LABEL},
    },
    utils::request_helper::{csrf_token, show_message, MessageKind},
};

const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

pub struct VoteController {
    page: PageHandle,
    repository: Arc<dyn PollRepository>,
    poll_id: Option<u64>,
    selected_choice: Mutex<Option<u64>>,
    generation: AtomicU64,
}

impl VoteController {
    pub fn new(page: PageHandle, repository: Arc<dyn PollRepository>) -> Self {
        let poll_id = page.with(|doc| poll_id_from_path(doc.path()));
        Self {
            page,
            repository,
            poll_id,
            selected_choice: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    pub fn poll_id(&self) -> Option<u64> {
        self.poll_id
    }

    pub fn selected_choice(&self) -> Option<u64> {
        *self.selection()
    }

    fn selection(&self) -> std::sync::MutexGuard<'_, Option<u64>> {
        self.selected_choice
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn load_poll(&self) {
        let Some(poll_id) = self.poll_id else {
            debug!("no poll id in path, nothing to load");
            return;
        };
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.repository.get_poll(poll_id).await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!(poll_id, ticket, "dropping stale poll response");
            return;
        }

        match result {
            Ok(ApiOutcome::Success(poll)) => self.display_poll(&poll),
            Ok(ApiOutcome::Failure(payload)) => {
                warn!(poll_id, status = payload.status, "failed to load poll");
                self.show_load_error("Failed to load poll");
            }
            Err(e) => {
                warn!(poll_id, error = %e, "network error loading poll");
                self.show_load_error(&format!("Network error: {e}"));
            }
        }
    }

    fn display_poll(&self, poll: &Poll) {
        // A fresh render has nothing selected.
        *self.selection() = None;

        let is_ballot = poll.active && !poll.user_has_voted;
        let rendered = if poll.user_has_voted {
            vote::already_voted(poll)
        } else if !poll.active {
            vote::inactive(poll)
        } else {
            vote::ballot(poll)
        };
        let Some(html) = rendered_or_log(rendered, "poll") else {
            return;
        };

        self.page.with(|doc| {
            doc.set_inner_html(POLL_CONTAINER_ID, html);
            if !is_ballot {
                return;
            }
            for choice in &poll.choices {
                doc.register(
                    Element::new(vote::choice_option_id(choice.id))
                        .with_class("choice-option")
                        .child_of(POLL_CONTAINER_ID),
                );
            }
            doc.register(
                Element::new(SUBMIT_VOTE_ID)
                    .with_class("btn btn-success")
                    .with_html(SUBMIT_VOTE_LABEL)
                    .disabled(true)
                    .child_of(POLL_CONTAINER_ID),
            );
        });
    }

    fn show_load_error(&self, message: &str) {
        if let Some(html) = rendered_or_log(vote::load_error(message), "poll load error") {
            self.page
                .with(|doc| doc.set_inner_html(POLL_CONTAINER_ID, html));
        }
    }

    /// Marks `choice_id` as the only selected option and enables the submit button.
    pub fn select_choice(&self, choice_id: u64) {
        let option_id = vote::choice_option_id(choice_id);
        let found = self.page.with(|doc| {
            if doc.element(&option_id).is_none() {
                return false;
            }
            for id in doc.ids_by_class("choice-option") {
                doc.remove_class(&id, "selected");
            }
            doc.add_class(&option_id, "selected");
            doc.set_disabled(SUBMIT_VOTE_ID, false);
            true
        });

        if found {
            *self.selection() = Some(choice_id);
        } else {
            warn!(choice_id, "ignoring selection of a choice that is not rendered");
        }
    }

    pub async fn submit_vote(&self) {
        let (Some(poll_id), Some(choice_id)) = (self.poll_id, self.selected_choice()) else {
            self.message("Please select a choice", MessageKind::Error);
            return;
        };

        let Some(token) = self.page.with(|doc| csrf_token(doc.cookie())) else {
            warn!(poll_id, "csrf token missing on vote");
            self.message(
                "❌ Security token missing. Please refresh the page.",
                MessageKind::Error,
            );
            return;
        };

        let original_label = self.page.with(|doc| {
            let label = doc
                .inner_html(SUBMIT_VOTE_ID)
                .unwrap_or(SUBMIT_VOTE_LABEL)
                .to_owned();
            doc.set_disabled(SUBMIT_VOTE_ID, true);
            doc.set_text(SUBMIT_VOTE_ID, "Voting...");
            label
        });

        match self.repository.cast_vote(poll_id, choice_id, &token).await {
            Ok(ApiOutcome::Success(response)) => {
                info!(poll_id, choice_id, "vote submitted");
                let text = response
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| String::from("Vote submitted successfully!"));
                self.message(&format!("✓ {text}"), MessageKind::Success);
                self.page.navigate_after("/polls/", REDIRECT_DELAY);
                return;
            }
            Ok(ApiOutcome::Failure(payload)) => {
                warn!(poll_id, choice_id, status = payload.status, "vote rejected");
                let reason = payload.error_or_detail("Failed to submit vote");
                self.message(&format!("❌ {reason}"), MessageKind::Error);
            }
            Err(e) => {
                warn!(poll_id, choice_id, error = %e, "network error submitting vote");
                self.message(&format!("❌ Network error: {e}"), MessageKind::Error);
            }
        }

        self.page.with(|doc| {
            doc.set_disabled(SUBMIT_VOTE_ID, false);
            doc.set_inner_html(SUBMIT_VOTE_ID, original_label);
        });
    }

    fn message(&self, text: &str, kind: MessageKind) {
        show_message(&self.page, MESSAGE_ID, text, kind);
    }
}
