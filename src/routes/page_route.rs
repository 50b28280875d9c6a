use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::page_controller::{dispatch_event, render_page};

pub fn page_router() -> Router {
    Router::new()
        .route("/_page/{session_id}/events", post(dispatch_event))
        .fallback_service(get(render_page))
}
