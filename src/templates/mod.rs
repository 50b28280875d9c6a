pub mod create;
pub mod layout;
pub mod polls;
pub mod vote;

/// Unwraps a rendered fragment, logging a failed render.
pub fn rendered_or_log(rendered: askama::Result<String>, fragment: &str) -> Option<String> {
    rendered
        .map_err(|e| tracing::error!(fragment, error = %e, "failed to render fragment"))
        .ok()
}
