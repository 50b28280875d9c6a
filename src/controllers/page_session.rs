use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use super::{
    create_poll_controller::CreatePollController, home_controller::HomeController,
    polls_list_controller::PollsListController, vote_controller::VoteController,
};
use crate::{
    dtos::requests::PageEvent,
    error::AppError,
    models::view::ViewSelection,
    page::{
        document::{Document, Patch},
        handle::PageHandle,
        shell,
    },
    repositories::poll_repository::PollRepository,
    templates::layout,
};

/// The one controller a page load instantiates.
pub enum ActiveView {
    Home(HomeController),
    PollsList(PollsListController),
    CreatePoll(CreatePollController),
    Vote(VoteController),
}

/// A bootstrapped page: its surface, its view selection and the controller that owns it.
pub struct PageSession {
    id: Uuid,
    selection: Option<ViewSelection>,
    page: PageHandle,
    view: Option<ActiveView>,
}

impl PageSession {
    /// Reads the document's path once and wires up the matching controller. A path that
    /// matches no view gets no controller and renders nothing.
    pub fn bootstrap(
        mut document: Document,
        repository: Arc<dyn PollRepository>,
    ) -> Result<Self, AppError> {
        let selection = ViewSelection::from_path(document.path());
        if let Some(selection) = selection {
            shell::install(selection, &mut document)?;
        } else {
            warn!(path = document.path(), "no view matches path");
        }

        let page = PageHandle::new(document);
        let view = selection.map(|selection| match selection {
            ViewSelection::Home => ActiveView::Home(HomeController::new(page.clone())),
            ViewSelection::List => {
                ActiveView::PollsList(PollsListController::new(page.clone(), repository))
            }
            ViewSelection::Create => {
                ActiveView::CreatePoll(CreatePollController::new(page.clone(), repository))
            }
            ViewSelection::Vote => ActiveView::Vote(VoteController::new(page.clone(), repository)),
        });

        Ok(Self {
            id: Uuid::new_v4(),
            selection,
            page,
            view,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn selection(&self) -> Option<ViewSelection> {
        self.selection
    }

    pub fn page(&self) -> &PageHandle {
        &self.page
    }

    pub fn view(&self) -> Option<&ActiveView> {
        self.view.as_ref()
    }

    /// Runs the controller's page-ready work.
    pub async fn start(&self) {
        info!(session_id = %self.id, selection = ?self.selection, "starting page");
        match &self.view {
            Some(ActiveView::Home(home)) => home.animate_cards(),
            Some(ActiveView::PollsList(list)) => list.load_polls().await,
            Some(ActiveView::Vote(vote)) => vote.load_poll().await,
            Some(ActiveView::CreatePoll(_)) | None => {}
        }
    }

    /// Routes a browser event to the owning controller and returns the resulting patches.
    pub async fn dispatch(&self, event: PageEvent) -> Result<Vec<Patch>, AppError> {
        match (&self.view, event) {
            (Some(ActiveView::PollsList(list)), PageEvent::LoadPolls) => list.load_polls().await,
            (Some(ActiveView::CreatePoll(create)), PageEvent::AddChoice) => create.add_choice(),
            (Some(ActiveView::CreatePoll(create)), PageEvent::SubmitPoll(form)) => {
                create.handle_submit(form).await
            }
            (Some(ActiveView::Vote(vote)), PageEvent::LoadPoll) => vote.load_poll().await,
            (Some(ActiveView::Vote(vote)), PageEvent::SelectChoice { choice_id }) => {
                vote.select_choice(choice_id)
            }
            (Some(ActiveView::Vote(vote)), PageEvent::SubmitVote) => vote.submit_vote().await,
            (_, event) => {
                warn!(session_id = %self.id, event = event.name(), "unsupported page event");
                return Err(AppError::UnsupportedEvent(event.name().to_owned()));
            }
        }
        Ok(self.page.drain_patches())
    }

    /// The full html document in its current state. Pending patches are consumed, since the
    /// markup already reflects them.
    pub fn render(&self) -> Result<String, AppError> {
        let html = self.page.with(|doc| {
            doc.drain_patches();
            layout::document(doc, self.selection, self.id)
        })?;
        Ok(html)
    }
}
