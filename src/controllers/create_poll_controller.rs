use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use tracing::{info, warn};

use crate::{
    dtos::{
        requests::{CreatePollRequest, PollSubmission},
        responses::ApiOutcome,
    },
    page::handle::PageHandle,
    repositories::poll_repository::PollRepository,
    templates::{create, layout::MESSAGE_ID, rendered_or_log},
    utils::request_helper::{csrf_token, show_message, MessageKind},
};

pub const MIN_CHOICES: usize = 2;
const REDIRECT_DELAY: Duration = Duration::from_secs(2);

pub struct CreatePollController {
    page: PageHandle,
    repository: Arc<dyn PollRepository>,
    choice_count: AtomicUsize,
}

impl CreatePollController {
    pub fn new(page: PageHandle, repository: Arc<dyn PollRepository>) -> Self {
        Self {
            page,
            repository,
            choice_count: AtomicUsize::new(MIN_CHOICES),
        }
    }

    pub fn choice_count(&self) -> usize {
        self.choice_count.load(Ordering::SeqCst)
    }

    /// Appends one more removable choice field.
    pub fn add_choice(&self) {
        let number = self.choice_count.fetch_add(1, Ordering::SeqCst) + 1;
        let Some(field) = rendered_or_log(create::added_choice_field(number), "choice field") else {
            return;
        };
        self.page
            .with(|doc| doc.append_html(create::CHOICES_CONTAINER_ID, field));
    }

    pub async fn handle_submit(&self, form: PollSubmission) {
        let choices: Vec<String> = form
            .choices
            .into_iter()
            .filter(|choice| !choice.trim().is_empty())
            .collect();

        if choices.len() < MIN_CHOICES {
            self.error("Please add at least 2 choices");
            return;
        }

        let Some(token) = self.page.with(|doc| csrf_token(doc.cookie())) else {
            warn!("csrf token missing on poll creation");
            self.error("Security token missing. Please refresh the page.");
            return;
        };

        let original_label = self.page.with(|doc| {
            let label = doc
                .inner_html(create::SUBMIT_BUTTON_ID)
                .unwrap_or(create::SUBMIT_BUTTON_LABEL)
                .to_owned();
            doc.set_disabled(create::SUBMIT_BUTTON_ID, true);
            doc.set_text(create::SUBMIT_BUTTON_ID, "Creating...");
            label
        });

        let request = CreatePollRequest {
            question: form.question,
            choices,
        };

        match self.repository.create_poll(&request, &token).await {
            Ok(ApiOutcome::Success(_)) => {
                info!(question = %request.question, "poll created");
                show_message(
                    &self.page,
                    MESSAGE_ID,
                    "Poll created successfully! Redirecting...",
                    MessageKind::Success,
                );
                self.page.navigate_after("/polls/", REDIRECT_DELAY);
                // The button stays disabled while the page navigates away.
                return;
            }
            Ok(ApiOutcome::Failure(payload)) => {
                warn!(status = payload.status, "poll creation rejected");
                self.error(&format!("Error: {}", payload.detail_or_raw()));
            }
            Err(e) => {
                warn!(error = %e, "network error creating poll");
                self.error(&format!("Network error: {e}"));
            }
        }

        self.page.with(|doc| {
            doc.set_disabled(create::SUBMIT_BUTTON_ID, false);
            doc.set_inner_html(create::SUBMIT_BUTTON_ID, original_label);
        });
    }

    fn error(&self, text: &str) {
        show_message(&self.page, MESSAGE_ID, text, MessageKind::Error);
    }
}
