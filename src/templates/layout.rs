use askama::Template;
use uuid::Uuid;

use super::create;
use crate::{
    models::view::ViewSelection,
    page::document::{Document, Element},
};

pub const POLLS_CONTAINER_ID: &str = "polls-container";
pub const POLL_CONTAINER_ID: &str = "poll-container";
pub const MESSAGE_ID: &str = "message";

const PAGE_SHIM: &str = include_str!("page.js");

/// The landing page cards, as `(id, title, body, link)`.
pub const HOME_CARDS: [(&str, &str, &str, &str); 3] = [
    (
        "card-browse",
        "Browse Polls",
        "See every poll and how the votes are split.",
        "/polls/",
    ),
    (
        "card-create",
        "Create a Poll",
        "Ask a question and offer two or more choices.",
        "/polls/create/",
    ),
    (
        "card-vote",
        "Cast Your Vote",
        "Pick an active poll and make your choice count.",
        "/polls/",
    ),
];

#[derive(Template)]
#[template(path = "layout.html")]
struct PageTemplate<'a> {
    title: &'a str,
    session_id: Uuid,
    main: String,
    shim: &'a str,
}

/// An element of the document rendered with its current attributes.
#[derive(Template)]
#[template(path = "region.html")]
struct RegionTemplate<'a> {
    id: &'a str,
    class_name: &'a str,
    style: String,
    disabled: bool,
    html: &'a str,
}

#[derive(Template)]
#[template(path = "home/card.html")]
struct CardTemplate<'a> {
    title: &'a str,
    body: &'a str,
    link: &'a str,
}

#[derive(Template)]
#[template(path = "home/cards.html")]
struct CardsTemplate {
    cards: Vec<String>,
}

/// Renders the whole page from the current document state.
pub fn document(
    doc: &Document,
    selection: Option<ViewSelection>,
    session_id: Uuid,
) -> askama::Result<String> {
    let main = match selection {
        Some(ViewSelection::Home) => home(doc)?,
        Some(ViewSelection::List) => region(doc, POLLS_CONTAINER_ID)?,
        Some(ViewSelection::Create) => create_page(doc)?,
        Some(ViewSelection::Vote) => format!(
            "{}\n{}",
            region(doc, POLL_CONTAINER_ID)?,
            region(doc, MESSAGE_ID)?
        ),
        None => String::new(),
    };

    PageTemplate {
        title: selection.map(|s| s.title()).unwrap_or("Polls"),
        session_id,
        main,
        shim: PAGE_SHIM,
    }
    .render()
}

fn home(doc: &Document) -> askama::Result<String> {
    let mut cards = Vec::with_capacity(HOME_CARDS.len());
    for (id, title, body, link) in HOME_CARDS {
        let Some(el) = doc.element(id) else {
            continue;
        };
        let inner = CardTemplate { title, body, link }.render()?;
        cards.push(render_element(el, &inner)?);
    }
    CardsTemplate { cards }.render()
}

fn create_page(doc: &Document) -> askama::Result<String> {
    let choices = doc
        .inner_html(create::CHOICES_CONTAINER_ID)
        .unwrap_or_default();
    let (label, disabled) = doc
        .element(create::SUBMIT_BUTTON_ID)
        .map(|btn| (btn.inner_html.as_str(), btn.disabled))
        .unwrap_or((create::SUBMIT_BUTTON_LABEL, false));
    Ok(format!(
        "{}\n{}",
        create::form(choices, label, disabled)?,
        region(doc, MESSAGE_ID)?
    ))
}

fn region(doc: &Document, id: &str) -> askama::Result<String> {
    match doc.element(id) {
        Some(el) => render_element(el, &el.inner_html),
        None => Ok(String::new()),
    }
}

fn render_element(el: &Element, html: &str) -> askama::Result<String> {
    let mut style = el.style_attr();
    if el.hidden {
        if !style.is_empty() {
            style.push_str("; ");
        }
        style.push_str("display: none");
    }
    RegionTemplate {
        id: &el.id,
        class_name: &el.class_name,
        style,
        disabled: el.disabled,
        html,
    }
    .render()
}
