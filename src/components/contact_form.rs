//! Contact form: inline validation on blur and input, modal feedback on
//! submit.
//!
//! ARCHITECTURE
//! ============
//! Rules live in [`crate::state::contact`]; this widget maps each
//! [`Field`] to its element and renders the outcome:
//!
//! ```text
//!   blur   -> validate field -> mark / unmark
//!   input  -> rule passes?   -> unmark (never marks)
//!   submit -> validate all   -> error dialog | success dialog -> reset
//! ```
//!
//! The inline error is a `<p class="field-error">` directly after the field,
//! created on first failure and reused afterwards.

#[cfg(test)]
#[path = "contact_form_test.rs"]
mod contact_form_test;

use std::rc::Rc;

use crate::config::ContactConfig;
use crate::dialog::{DialogOptions, Dialogs, Icon, notify};
use crate::dom::{DomEvent, EventKind, Page, Target, report, require};
use crate::error::Result;
use crate::state::contact::{Field, success_html};

pub const ERROR_CLASS: &str = "field-error";
const INVALID_BORDER: &str = "2px solid #ef4444";
const VALID_BORDER: &str = "2px solid var(--accent)";

const ERROR_TITLE: &str = "Please fix the errors";
const ERROR_TEXT: &str = "Some fields require your attention. Errors are shown inline.";
const ERROR_FALLBACK: &str = "Please fix the errors. (SweetAlert2 not loaded)";
const ERROR_COLOR: &str = "#ef4444";

const SUCCESS_TITLE: &str = "Message Sent! 🎉";
const SUCCESS_FALLBACK: &str = "Message sent (SweetAlert2 not loaded).";
const SUCCESS_COLOR: &str = "#2563eb";
const SUCCESS_BACKGROUND: &str = "#0b0b12";
const SUCCESS_TEXT_COLOR: &str = "#f1f5f9";

pub struct ContactForm<P: Page, D: Dialogs> {
    page: P,
    dialogs: D,
    form: P::Node,
    fields: [(Field, P::Node); 4],
}

impl<P: Page, D: Dialogs> ContactForm<P, D> {
    /// Resolve the form and all four fields, then attach listeners.
    ///
    /// Any missing element fails the whole install; nothing is attached.
    pub fn install(page: &P, dialogs: &D, config: &ContactConfig) -> Result<Rc<Self>> {
        let lookup = |id: &str| require(page.by_id(id), &format!("#{id}"));
        let form = lookup(&config.form_id)?;
        let fields = [
            (Field::Name, lookup(&config.name_id)?),
            (Field::Email, lookup(&config.email_id)?),
            (Field::Subject, lookup(&config.subject_id)?),
            (Field::Message, lookup(&config.message_id)?),
        ];

        let contact = Rc::new(Self { page: page.clone(), dialogs: dialogs.clone(), form: form.clone(), fields });

        for (field, node) in &contact.fields {
            let field = *field;
            let this = Rc::clone(&contact);
            page.listen(
                Target::Node(node.clone()),
                EventKind::Blur,
                Rc::new(move |_: &DomEvent<P::Node>| {
                    this.validate(field);
                }),
            );
            let this = Rc::clone(&contact);
            page.listen(
                Target::Node(node.clone()),
                EventKind::Input,
                Rc::new(move |_: &DomEvent<P::Node>| this.clear_if_valid(field)),
            );
        }
        let this = Rc::clone(&contact);
        page.listen(
            Target::Node(form),
            EventKind::Submit,
            Rc::new(move |ev: &DomEvent<P::Node>| {
                ev.prevent_default();
                this.submit();
            }),
        );
        Ok(contact)
    }

    /// Check one field and mark or unmark it. Returns whether it passed.
    pub fn validate(&self, field: Field) -> bool {
        let node = self.node(field);
        match field.check(&self.page.value(node)) {
            Ok(()) => {
                self.clear_error(node);
                true
            }
            Err(message) => {
                self.show_error(node, message);
                false
            }
        }
    }

    /// Validate every field, then open the matching dialog.
    ///
    /// All four fields are checked even after the first failure so every
    /// error shows at once. Returns whether the form was valid.
    pub fn submit(self: &Rc<Self>) -> bool {
        let valid = Field::ALL.iter().fold(true, |ok, field| self.validate(*field) && ok);
        if !valid {
            log::debug!("contact: submission blocked by validation");
            let options = DialogOptions::new(ERROR_TITLE, Icon::Error, ERROR_COLOR).text(ERROR_TEXT);
            notify(&self.dialogs, &options, ERROR_FALLBACK, Box::new(|| {}));
            return false;
        }

        let name = self.page.value(self.node(Field::Name));
        let options = DialogOptions::new(SUCCESS_TITLE, Icon::Success, SUCCESS_COLOR)
            .html(success_html(&name))
            .colors(SUCCESS_BACKGROUND, SUCCESS_TEXT_COLOR)
            .with_close_button();
        let this = Rc::clone(self);
        notify(&self.dialogs, &options, SUCCESS_FALLBACK, Box::new(move || this.reset()));
        true
    }

    /// Reset the form's controls and clear every inline error.
    pub fn reset(&self) {
        report(self.page.reset_form(&self.form), "contact: reset form");
        self.clear_all();
    }

    pub fn clear_all(&self) {
        for (_, node) in &self.fields {
            self.clear_error(node);
        }
    }

    fn clear_if_valid(&self, field: Field) {
        let node = self.node(field);
        if field.is_valid(&self.page.value(node)) {
            self.clear_error(node);
        }
    }

    fn node(&self, field: Field) -> &P::Node {
        // `fields` is built in `Field::ALL` order, which is declaration order.
        &self.fields[field as usize].1
    }

    fn error_slot(&self, node: &P::Node) -> Option<P::Node> {
        self.page.next_sibling(node).filter(|sibling| self.page.has_class(sibling, ERROR_CLASS))
    }

    fn show_error(&self, node: &P::Node, message: &str) {
        let slot = match self.error_slot(node) {
            Some(slot) => Some(slot),
            None => match self.create_error_slot(node) {
                Ok(slot) => Some(slot),
                Err(err) => {
                    log::warn!("contact: cannot create inline error: {err}");
                    None
                }
            },
        };
        if let Some(slot) = slot {
            self.page.set_text(&slot, message);
        }
        report(self.page.set_attribute(node, "aria-invalid", "true"), "contact: set aria-invalid");
        report(self.page.set_style(node, "border-bottom", INVALID_BORDER), "contact: set border");
    }

    fn create_error_slot(&self, node: &P::Node) -> Result<P::Node> {
        let slot = self.page.insert_after(node, "p")?;
        self.page.add_class(&slot, ERROR_CLASS)?;
        self.page.set_attribute(&slot, "aria-live", "polite")?;
        Ok(slot)
    }

    fn clear_error(&self, node: &P::Node) {
        if let Some(slot) = self.error_slot(node) {
            self.page.set_text(&slot, "");
        }
        report(self.page.remove_attribute(node, "aria-invalid"), "contact: remove aria-invalid");
        report(self.page.set_style(node, "border-bottom", VALID_BORDER), "contact: set border");
    }
}
