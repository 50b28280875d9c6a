use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::{config::startup::AppState, routes::page_route::page_router};

pub fn create_app(app_state: AppState) -> Router {
    page_router()
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
}
