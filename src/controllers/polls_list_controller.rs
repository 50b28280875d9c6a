use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tracing::{debug, info, warn};

use crate::{
    dtos::responses::ApiOutcome,
    page::handle::PageHandle,
    repositories::poll_repository::PollRepository,
    templates::{layout::POLLS_CONTAINER_ID, polls, rendered_or_log},
};

pub struct PollsListController {
    page: PageHandle,
    repository: Arc<dyn PollRepository>,
    generation: AtomicU64,
}

impl PollsListController {
    pub fn new(page: PageHandle, repository: Arc<dyn PollRepository>) -> Self {
        Self {
            page,
            repository,
            generation: AtomicU64::new(0),
        }
    }

    /// Fetches the poll collection and replaces the container with it. A response that lands
    /// after a newer call was issued is dropped.
    pub async fn load_polls(&self) {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.repository.list_polls().await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "dropping stale poll list response");
            return;
        }

        let rendered = match result {
            Ok(ApiOutcome::Success(list)) if list.is_empty() => polls::empty_polls(),
            Ok(ApiOutcome::Success(list)) => {
                info!(count = list.len(), "polls loaded");
                polls::poll_list(&list)
            }
            Ok(ApiOutcome::Failure(payload)) => {
                warn!(status = payload.status, "failed to load polls");
                polls::error_panel("Failed to load polls", "load_polls")
            }
            Err(e) => {
                warn!(error = %e, "network error loading polls");
                polls::error_panel(&format!("Network error: {e}"), "load_polls")
            }
        };

        if let Some(html) = rendered_or_log(rendered, "poll list") {
            self.page
                .with(|doc| doc.set_inner_html(POLLS_CONTAINER_ID, html));
        }
    }
}
