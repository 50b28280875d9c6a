use std::sync::Arc;

use axum::{
    extract::{Path, Request},
    http::header::COOKIE,
    response::Html,
    Extension, Json,
};
use tracing::info;
use uuid::Uuid;

use super::page_session::PageSession;
use crate::{
    config::startup::AppState,
    dtos::{requests::PageEvent, responses::EventResponse},
    error::AppError,
    page::document::Document,
};

//*GET:: <any page path>
pub async fn render_page(
    Extension(state): Extension<AppState>,
    request: Request,
) -> Result<Html<String>, AppError> {
    let path = request.uri().path().to_owned();
    let cookie = request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");

    let repository = state.poll_repository(Some(cookie.clone()));
    let session = Arc::new(PageSession::bootstrap(
        Document::new(path.clone(), cookie),
        Arc::new(repository),
    )?);
    session.start().await;

    let html = session.render()?;
    if session.view().is_some() {
        state.sessions.save(session.clone());
    }
    info!(
        %path,
        session_id = %session.id(),
        selection = ?session.selection(),
        live_sessions = state.sessions.len(),
        "page rendered"
    );
    Ok(Html(html))
}

//?POST:: _page/{session_id}/events
pub async fn dispatch_event(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<Uuid>,
    Json(event): Json<PageEvent>,
) -> Result<Json<EventResponse>, AppError> {
    let session = state
        .sessions
        .get(&session_id)
        .ok_or(AppError::SessionNotFound)?;
    info!(%session_id, event = event.name(), "dispatching page event");
    let patches = session.dispatch(event).await?;
    Ok(Json(EventResponse { patches }))
}
