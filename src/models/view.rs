use serde::Serialize;

/// Which page view a path selects. Decided once per page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewSelection {
    Home,
    List,
    Create,
    Vote,
}

impl ViewSelection {
    /// First matching rule wins. Paths matching none of them select nothing.
    pub fn from_path(path: &str) -> Option<Self> {
        if path == "/" || path.is_empty() {
            Some(ViewSelection::Home)
        } else if path == "/polls/"
            || (path.starts_with("/polls") && !path.contains("/vote") && !path.contains("/create"))
        {
            Some(ViewSelection::List)
        } else if path.contains("/polls/create") {
            Some(ViewSelection::Create)
        } else if path.contains("/polls/") && path.contains("/vote") {
            Some(ViewSelection::Vote)
        } else {
            None
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ViewSelection::Home => "Polls",
            ViewSelection::List => "All Polls",
            ViewSelection::Create => "Create a Poll",
            ViewSelection::Vote => "Vote",
        }
    }
}

/// Extracts the numeric poll id from the first `/polls/{digits}/vote` in `path`.
pub fn poll_id_from_path(path: &str) -> Option<u64> {
    path.match_indices("/polls/").find_map(|(start, marker)| {
        let rest = &path[start + marker.len()..];
        let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits_len == 0 || !rest[digits_len..].starts_with("/vote") {
            return None;
        }
        rest[..digits_len].parse().ok()
    })
}
