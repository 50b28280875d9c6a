use serde::{Deserialize, Serialize};

use crate::utils::request_helper::escape_html;

/// A DOM mutation replayed by the browser shim, in the order it was made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Patch {
    InnerHtml { id: String, html: String },
    AppendHtml { id: String, html: String },
    Text { id: String, text: String },
    ClassName { id: String, class_name: String },
    AddClass { id: String, class: String },
    RemoveClass { id: String, class: String },
    Disabled { id: String, disabled: bool },
    Hidden { id: String, hidden: bool },
    Style { id: String, property: String, value: String },
    ScheduleHide { id: String, delay_ms: u64 },
    Navigate { url: String, delay_ms: u64 },
}

/// An addressable element of the page surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub id: String,
    pub class_name: String,
    pub inner_html: String,
    pub disabled: bool,
    pub hidden: bool,
    pub style: Vec<(String, String)>,
    /// Set for elements that live inside another element's rendered html.
    pub parent: Option<String>,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.inner_html = html.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn child_of(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_name.split_whitespace().any(|c| c == class)
    }

    /// The `style` attribute value, e.g. `animation-delay: 100ms`.
    pub fn style_attr(&self) -> String {
        self.style
            .iter()
            .map(|(property, value)| format!("{property}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// In-memory page surface for one page load.
///
/// Every mutation updates the element state and is journaled as a `Patch`; the journal is drained
/// after each dispatched event and shipped to the browser.
#[derive(Debug, Default)]
pub struct Document {
    path: String,
    cookie: String,
    elements: Vec<Element>,
    location: Option<String>,
    journal: Vec<Patch>,
}

impl Document {
    pub fn new(path: impl Into<String>, cookie: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            cookie: cookie.into(),
            ..Default::default()
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn cookie(&self) -> &str {
        &self.cookie
    }

    /// Where the page has navigated to, if anywhere.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    /// Ids of elements carrying `class`, in document order.
    pub fn ids_by_class(&self, class: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|el| el.has_class(class))
            .map(|el| el.id.clone())
            .collect()
    }

    /// Adds an element without journaling it. Used for markup that is already part of the
    /// rendered html (page shells and freshly rendered containers).
    pub fn register(&mut self, element: Element) {
        match self.element_mut(&element.id) {
            Some(existing) => *existing = element,
            None => self.elements.push(element),
        }
    }

    pub fn inner_html(&self, id: &str) -> Option<&str> {
        self.element(id).map(|el| el.inner_html.as_str())
    }

    /// Replaces the element's content. Elements registered under it are dropped with it.
    pub fn set_inner_html(&mut self, id: &str, html: String) {
        let Some(el) = self.element_mut(id) else {
            return;
        };
        el.inner_html = html.clone();
        self.remove_descendants(id);
        self.journal.push(Patch::InnerHtml {
            id: id.to_owned(),
            html,
        });
    }

    pub fn append_html(&mut self, id: &str, html: String) {
        let Some(el) = self.element_mut(id) else {
            return;
        };
        el.inner_html.push_str(&html);
        self.journal.push(Patch::AppendHtml {
            id: id.to_owned(),
            html,
        });
    }

    /// Sets plain text content; the stored markup is the escaped text.
    pub fn set_text(&mut self, id: &str, text: &str) {
        let Some(el) = self.element_mut(id) else {
            return;
        };
        el.inner_html = escape_html(text);
        self.remove_descendants(id);
        self.journal.push(Patch::Text {
            id: id.to_owned(),
            text: text.to_owned(),
        });
    }

    pub fn set_class_name(&mut self, id: &str, class_name: &str) {
        let Some(el) = self.element_mut(id) else {
            return;
        };
        el.class_name = class_name.to_owned();
        self.journal.push(Patch::ClassName {
            id: id.to_owned(),
            class_name: class_name.to_owned(),
        });
    }

    pub fn add_class(&mut self, id: &str, class: &str) {
        let Some(el) = self.element_mut(id) else {
            return;
        };
        if !el.has_class(class) {
            if !el.class_name.is_empty() {
                el.class_name.push(' ');
            }
            el.class_name.push_str(class);
        }
        self.journal.push(Patch::AddClass {
            id: id.to_owned(),
            class: class.to_owned(),
        });
    }

    pub fn remove_class(&mut self, id: &str, class: &str) {
        let Some(el) = self.element_mut(id) else {
            return;
        };
        el.class_name = el
            .class_name
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.journal.push(Patch::RemoveClass {
            id: id.to_owned(),
            class: class.to_owned(),
        });
    }

    pub fn set_disabled(&mut self, id: &str, disabled: bool) {
        let Some(el) = self.element_mut(id) else {
            return;
        };
        el.disabled = disabled;
        self.journal.push(Patch::Disabled {
            id: id.to_owned(),
            disabled,
        });
    }

    pub fn set_hidden(&mut self, id: &str, hidden: bool) {
        let Some(el) = self.element_mut(id) else {
            return;
        };
        el.hidden = hidden;
        self.journal.push(Patch::Hidden {
            id: id.to_owned(),
            hidden,
        });
    }

    pub fn set_style(&mut self, id: &str, property: &str, value: &str) {
        let Some(el) = self.element_mut(id) else {
            return;
        };
        match el.style.iter_mut().find(|(p, _)| p == property) {
            Some((_, v)) => *v = value.to_owned(),
            None => el.style.push((property.to_owned(), value.to_owned())),
        }
        self.journal.push(Patch::Style {
            id: id.to_owned(),
            property: property.to_owned(),
            value: value.to_owned(),
        });
    }

    /// Marks a pending client-side hide. The element state itself flips when the page's own
    /// timer fires.
    pub fn schedule_hide(&mut self, id: &str, delay_ms: u64) {
        self.journal.push(Patch::ScheduleHide {
            id: id.to_owned(),
            delay_ms,
        });
    }

    /// Hides an element without journaling; the browser runs the same timer on its side.
    pub(crate) fn hide_silently(&mut self, id: &str) {
        if let Some(el) = self.element_mut(id) {
            el.hidden = true;
        }
    }

    pub fn announce_navigation(&mut self, url: &str, delay_ms: u64) {
        self.journal.push(Patch::Navigate {
            url: url.to_owned(),
            delay_ms,
        });
    }

    pub(crate) fn navigate_silently(&mut self, url: &str) {
        self.location = Some(url.to_owned());
    }

    pub fn drain_patches(&mut self) -> Vec<Patch> {
        std::mem::take(&mut self.journal)
    }

    fn remove_descendants(&mut self, id: &str) {
        let mut doomed = vec![id.to_owned()];
        let mut i = 0;
        while i < doomed.len() {
            let parent = doomed[i].clone();
            doomed.extend(
                self.elements
                    .iter()
                    .filter(|el| el.parent.as_deref() == Some(parent.as_str()))
                    .map(|el| el.id.clone()),
            );
            i += 1;
        }
        self.elements
            .retain(|el| el.id == id || !doomed.contains(&el.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_container() -> Document {
        let mut doc = Document::new("/polls/", "");
        doc.register(Element::new("poll-container"));
        doc
    }

    #[test]
    fn replacing_content_drops_registered_children() {
        let mut doc = doc_with_container();
        doc.register(Element::new("submitVote").child_of("poll-container"));
        doc.register(Element::new("nested").child_of("submitVote"));

        doc.set_inner_html("poll-container", "<p>gone</p>".into());

        assert!(doc.element("poll-container").is_some());
        assert!(doc.element("submitVote").is_none());
        assert!(doc.element("nested").is_none());
    }

    #[test]
    fn class_edits_are_journaled_and_deduplicated() {
        let mut doc = doc_with_container();
        doc.set_class_name("poll-container", "choice-option");
        doc.add_class("poll-container", "selected");
        doc.add_class("poll-container", "selected");
        assert_eq!(
            doc.element("poll-container").unwrap().class_name,
            "choice-option selected"
        );

        doc.remove_class("poll-container", "selected");
        assert_eq!(
            doc.element("poll-container").unwrap().class_name,
            "choice-option"
        );
        assert_eq!(doc.drain_patches().len(), 4);
        assert!(doc.drain_patches().is_empty());
    }

    #[test]
    fn text_is_stored_escaped() {
        let mut doc = doc_with_container();
        doc.set_text("poll-container", "<b>hi</b>");
        assert_eq!(
            doc.inner_html("poll-container"),
            Some("&lt;b&gt;hi&lt;/b&gt;")
        );
    }

    #[test]
    fn missing_elements_are_ignored() {
        let mut doc = doc_with_container();
        doc.set_disabled("nope", true);
        doc.set_inner_html("nope", "x".into());
        assert!(doc.drain_patches().is_empty());
    }
}
