use askama::Template;

pub const FORM_ID: &str = "createPollForm";
pub const CHOICES_CONTAINER_ID: &str = "choices-container";
pub const SUBMIT_BUTTON_ID: &str = "submitBtn";
pub const SUBMIT_BUTTON_LABEL: &str = "Create Poll";

#[derive(Template)]
#[template(path = "create/choice_field.html")]
struct ChoiceFieldTemplate {
    number: usize,
    removable: bool,
}

#[derive(Template)]
#[template(path = "create/form.html")]
struct FormTemplate<'a> {
    form_id: &'a str,
    choices_id: &'a str,
    submit_id: &'a str,
    choices_html: &'a str,
    label_html: &'a str,
    disabled: bool,
}

/// One of the fields the form starts with; these cannot be removed.
pub fn initial_choice_field(number: usize) -> askama::Result<String> {
    ChoiceFieldTemplate {
        number,
        removable: false,
    }
    .render()
}

/// A field added by the user. The remove button is handled by the browser alone.
pub fn added_choice_field(number: usize) -> askama::Result<String> {
    ChoiceFieldTemplate {
        number,
        removable: true,
    }
    .render()
}

/// `choices_html` and `label_html` are inserted as-is.
pub fn form(choices_html: &str, label_html: &str, disabled: bool) -> askama::Result<String> {
    FormTemplate {
        form_id: FORM_ID,
        choices_id: CHOICES_CONTAINER_ID,
        submit_id: SUBMIT_BUTTON_ID,
        choices_html,
        label_html,
        disabled,
    }
    .render()
}
