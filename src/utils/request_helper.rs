use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

use crate::page::handle::PageHandle;

/// Name of the cookie holding the anti-forgery token.
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Header the token is echoed back in on mutating requests.
pub const CSRF_HEADER_NAME: &str = "X-CSRFToken";

pub const MESSAGE_HIDE_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

/// Escapes `&`, `<`, `>`, `"` and `'`, in that order.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Looks up the anti-forgery token in a raw `Cookie` header value. Only the first `csrftoken`
/// pair counts, and an empty value counts as absent.
pub fn csrf_token(cookie: &str) -> Option<String> {
    cookie
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == CSRF_COOKIE_NAME)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Writes `text` (as plain text) into `target`, styles it as `kind`, shows it, and hides it
/// again after `MESSAGE_HIDE_DELAY` unless another message replaces it first.
pub fn show_message(page: &PageHandle, target: &str, text: &str, kind: MessageKind) {
    let found = page.with(|doc| {
        if doc.element(target).is_none() {
            return false;
        }
        doc.set_text(target, text);
        doc.set_class_name(target, &format!("message {}", kind.as_str()));
        doc.set_hidden(target, false);
        true
    });
    if !found {
        tracing::error!(target_id = target, "message element not found");
        return;
    }
    page.hide_after(target, MESSAGE_HIDE_DELAY);
}

/// Local calendar date in `M/D/YYYY` form, or `Invalid Date`.
pub fn format_date(iso: &str) -> String {
    let local = DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.with_timezone(&Local))
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(iso, fmt).ok())
                .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        });

    match local {
        Some(dt) => dt.format("%-m/%-d/%Y").to_string(),
        None => String::from("Invalid Date"),
    }
}
