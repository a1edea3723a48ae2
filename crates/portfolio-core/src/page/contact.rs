use super::{Page, PageEffect, PageEvent};
use crate::document::{ElementId, PageDocument, escape_html};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

/// Simulated round trip for a contact submission.
pub const SUBMIT_DELAY: Duration = Duration::from_millis(2000);
pub const FORM_MESSAGE_HIDE_DELAY: Duration = Duration::from_millis(5000);

const FORM_ID: &str = "contact-form";
const SUBMIT_BUTTON_ID: &str = "submit-btn";
const FORM_MESSAGE_ID: &str = "form-message";

impl Page {
    pub(super) fn handle_contact_submitted(
        &self,
        doc: &mut PageDocument,
        effects: &mut Vec<PageEffect>,
    ) {
        let Some(form) = doc.element_by_id(FORM_ID) else {
            return;
        };
        effects.push(PageEffect::PreventDefault);

        let data = read_form_data(doc, form);
        let name = data.get("name").cloned().unwrap_or_default();
        debug!(
            fields = data.len(),
            has_email = data.get("email").is_some_and(|email| !email.is_empty()),
            "Contact form submitted"
        );

        if let Some(button) = doc.element_by_id(SUBMIT_BUTTON_ID) {
            doc.set_attr(button, "disabled", "");
            set_child_display(doc, button, "btn-text", "none");
            set_child_display(doc, button, "btn-loading", "flex");
        }
        if let Some(message) = doc.element_by_id(FORM_MESSAGE_ID) {
            doc.set_style(message, "display", "none");
        }

        effects.push(PageEffect::Schedule {
            delay: SUBMIT_DELAY,
            event: PageEvent::ContactSettled { name },
        });
    }

    pub(super) fn handle_contact_settled(
        &self,
        doc: &mut PageDocument,
        name: &str,
        effects: &mut Vec<PageEffect>,
    ) {
        if let Some(button) = doc.element_by_id(SUBMIT_BUTTON_ID) {
            doc.remove_attr(button, "disabled");
            set_child_display(doc, button, "btn-text", "block");
            set_child_display(doc, button, "btn-loading", "none");
        }

        if let Some(message) = doc.element_by_id(FORM_MESSAGE_ID) {
            doc.set_style(message, "display", "block");
            doc.set_class_name(message, "form-message success");
            let markup = format!(
                "<strong>Message sent successfully!</strong><br>Thank you {}, I'll get back to you within 24 hours.",
                escape_html(name)
            );
            doc.replace_inner_html(message, &markup);
            effects.push(PageEffect::Schedule {
                delay: FORM_MESSAGE_HIDE_DELAY,
                event: PageEvent::HideFormMessage,
            });
        }

        if let Some(form) = doc.element_by_id(FORM_ID) {
            self.form_defaults.restore(doc);
            effects.push(PageEffect::ResetForm { form });
        }
        info!("Contact submission acknowledged");
    }

    pub(super) fn handle_hide_form_message(&self, doc: &mut PageDocument) {
        if let Some(message) = doc.element_by_id(FORM_MESSAGE_ID) {
            doc.set_style(message, "display", "none");
        }
    }
}

/// Named controls of `form` and their current values.
pub(crate) fn read_form_data(doc: &PageDocument, form: ElementId) -> BTreeMap<String, String> {
    let mut data = BTreeMap::new();
    for (id, element) in doc.iter() {
        if !is_within(doc, id, form) {
            continue;
        }
        let Some(name) = element.attr("name") else {
            continue;
        };
        let value = match element.tag.as_str() {
            "textarea" => element
                .attr("value")
                .map(str::to_string)
                .unwrap_or_else(|| element.text.clone()),
            "input" | "select" => element.attr("value").unwrap_or_default().to_string(),
            _ => continue,
        };
        data.insert(name.to_string(), value);
    }
    data
}

/// Values the form's controls carry in the page markup, restored on reset.
#[derive(Debug, Clone, Default)]
pub(super) struct FormDefaults {
    controls: Vec<(ElementId, Option<String>)>,
}

impl FormDefaults {
    pub(super) fn capture(doc: &PageDocument) -> Self {
        let Some(form) = doc.element_by_id(FORM_ID) else {
            return Self::default();
        };
        let controls = doc
            .iter()
            .filter(|(id, _)| is_within(doc, *id, form))
            .filter_map(|(id, element)| match element.tag.as_str() {
                "input" => Some((id, element.attr("value").map(str::to_string))),
                // A textarea's default is its text content.
                "textarea" => Some((id, None)),
                _ => None,
            })
            .collect();
        Self { controls }
    }

    fn restore(&self, doc: &mut PageDocument) {
        for (control, default) in &self.controls {
            match default {
                Some(value) => doc.set_attr(*control, "value", value),
                None => doc.remove_attr(*control, "value"),
            }
        }
    }
}

fn set_child_display(doc: &mut PageDocument, parent: ElementId, class: &str, display: &str) {
    for child in doc.descendants_with_class(parent, class) {
        doc.set_style(child, "display", display);
    }
}

fn is_within(doc: &PageDocument, id: ElementId, ancestor: ElementId) -> bool {
    let mut current = doc.parent(id);
    while let Some(node) = current {
        if node == ancestor {
            return true;
        }
        current = doc.parent(node);
    }
    false
}
