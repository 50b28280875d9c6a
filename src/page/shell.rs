use super::document::{Document, Element};
use crate::{
    controllers::create_poll_controller::MIN_CHOICES,
    models::view::ViewSelection,
    templates::{
        create,
        layout::{HOME_CARDS, MESSAGE_ID, POLLS_CONTAINER_ID, POLL_CONTAINER_ID},
    },
};

/// Registers the static elements of a view's page template.
pub fn install(selection: ViewSelection, doc: &mut Document) -> askama::Result<()> {
    match selection {
        ViewSelection::Home => {
            for (id, ..) in HOME_CARDS {
                doc.register(Element::new(id).with_class("card"));
            }
        }
        ViewSelection::List => {
            doc.register(
                Element::new(POLLS_CONTAINER_ID)
                    .with_html(r#"<div class="loading">Loading polls...</div>"#),
            );
        }
        ViewSelection::Create => {
            let initial_fields = (1..=MIN_CHOICES)
                .map(create::initial_choice_field)
                .collect::<askama::Result<String>>()?;
            doc.register(Element::new(create::FORM_ID));
            doc.register(
                Element::new(create::CHOICES_CONTAINER_ID)
                    .with_html(initial_fields)
                    .child_of(create::FORM_ID),
            );
            doc.register(
                Element::new(create::SUBMIT_BUTTON_ID)
                    .with_class("btn btn-primary")
                    .with_html(create::SUBMIT_BUTTON_LABEL)
                    .child_of(create::FORM_ID),
            );
            doc.register(message_element());
        }
        ViewSelection::Vote => {
            doc.register(
                Element::new(POLL_CONTAINER_ID)
                    .with_html(r#"<div class="loading">Loading poll...</div>"#),
            );
            doc.register(message_element());
        }
    }
    Ok(())
}

fn message_element() -> Element {
    Element::new(MESSAGE_ID).with_class("message").hidden(true)
}
