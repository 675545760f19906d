use super::*;
use crate::dialog::memory::MemoryDialogs;
use crate::dom::memory::{MemoryPage, NodeId};

struct Fixture {
    page: MemoryPage,
    dialogs: MemoryDialogs,
    form: NodeId,
    name: NodeId,
    email: NodeId,
    subject: NodeId,
    message: NodeId,
    contact: Rc<ContactForm<MemoryPage, MemoryDialogs>>,
}

fn build(dialogs: MemoryDialogs) -> Fixture {
    let page = MemoryPage::new();
    let form = page.append(page.body(), "form", &[("id", "contactForm")]);
    let field = |tag: &str, id: &str| {
        let row = page.append(form, "div", &[("class", "row")]);
        page.append(row, "label", &[("for", id)]);
        page.append(row, tag, &[("id", id)])
    };
    let name = field("input", "fullName");
    let email = field("input", "email");
    let subject = field("input", "subject");
    let message = field("textarea", "message");
    let contact = ContactForm::install(&page, &dialogs, &ContactConfig::default()).unwrap();
    Fixture { page, dialogs, form, name, email, subject, message, contact }
}

fn fixture() -> Fixture {
    build(MemoryDialogs::new())
}

fn fill_valid(f: &Fixture) {
    f.page.set_value(&f.name, "Ada Lovelace");
    f.page.set_value(&f.email, "ada@example.com");
    f.page.set_value(&f.subject, "Engines");
    f.page.set_value(&f.message, "Let us talk about the analytical engine.");
}

fn error_text(f: &Fixture, field: NodeId) -> Option<String> {
    let slot = f.page.next_sibling(&field)?;
    f.page.has_class(&slot, ERROR_CLASS).then(|| f.page.text(&slot))
}

fn is_marked(f: &Fixture, field: NodeId) -> bool {
    f.page.attribute(&field, "aria-invalid").as_deref() == Some("true")
}

// =============================================================
// Inline validation
// =============================================================

#[test]
fn blur_on_empty_field_inserts_error_after_it() {
    let f = fixture();
    f.page.blur(f.name);
    assert_eq!(error_text(&f, f.name).as_deref(), Some("Full name is required."));
    assert!(is_marked(&f, f.name));
    assert_eq!(f.page.style(f.name, "border-bottom").as_deref(), Some("2px solid #ef4444"));

    let slot = f.page.next_sibling(&f.name).unwrap();
    assert_eq!(f.page.tag(slot), "p");
    assert_eq!(f.page.attribute(&slot, "aria-live").as_deref(), Some("polite"));
}

#[test]
fn repeated_failures_reuse_one_error_element() {
    let f = fixture();
    let row = f.page.children(f.form)[1];
    let before = f.page.children(row).len();
    f.page.blur(f.email);
    f.page.set_value(&f.email, "not-an-email");
    f.page.blur(f.email);
    assert_eq!(f.page.children(row).len(), before + 1);
    assert_eq!(error_text(&f, f.email).as_deref(), Some("Please enter a valid email (name@example.com)."));
}

#[test]
fn existing_error_sibling_in_markup_is_reused() {
    let page = MemoryPage::new();
    let form = page.append(page.body(), "form", &[("id", "contactForm")]);
    for id in ["fullName", "email", "subject"] {
        page.append(form, "input", &[("id", id)]);
    }
    let message = page.append(form, "textarea", &[("id", "message")]);
    let slot = page.append(form, "p", &[("class", "field-error hint")]);
    let contact = ContactForm::install(&page, &MemoryDialogs::new(), &ContactConfig::default()).unwrap();

    page.set_value(&message, "short");
    assert!(!contact.validate(Field::Message));
    assert_eq!(page.text(&slot), "Message must be at least 10 characters.");
    assert_eq!(page.children(form).len(), 5);
}

#[test]
fn blur_on_valid_field_unmarks_it() {
    let f = fixture();
    f.page.blur(f.subject);
    f.page.set_value(&f.subject, "Hello");
    f.page.blur(f.subject);
    assert_eq!(error_text(&f, f.subject).as_deref(), Some(""));
    assert!(!is_marked(&f, f.subject));
    assert_eq!(f.page.style(f.subject, "border-bottom").as_deref(), Some("2px solid var(--accent)"));
}

#[test]
fn typing_clears_error_only_once_rule_passes() {
    let f = fixture();
    f.page.blur(f.message);
    f.page.type_into(f.message, "too short");
    assert!(is_marked(&f, f.message));
    f.page.type_into(f.message, "long enough now");
    assert!(!is_marked(&f, f.message));
    assert_eq!(error_text(&f, f.message).as_deref(), Some(""));
}

#[test]
fn typing_never_raises_an_error() {
    let f = fixture();
    f.page.type_into(f.email, "half@");
    assert!(!is_marked(&f, f.email));
    assert_eq!(error_text(&f, f.email), None);
}

#[test]
fn whitespace_only_values_are_rejected() {
    let f = fixture();
    f.page.set_value(&f.name, "   ");
    assert!(!f.contact.validate(Field::Name));
    f.page.set_value(&f.message, "    abc      ");
    assert!(!f.contact.validate(Field::Message));
}

// =============================================================
// Submission
// =============================================================

#[test]
fn submit_is_always_prevented() {
    let f = fixture();
    assert!(f.page.submit(f.form));
    fill_valid(&f);
    assert!(f.page.submit(f.form));
}

#[test]
fn invalid_submit_marks_every_bad_field_and_fires_one_error() {
    let f = fixture();
    f.page.set_value(&f.name, "Ada");
    f.page.set_value(&f.email, "ada@nowhere");
    f.page.submit(f.form);

    assert!(!is_marked(&f, f.name));
    assert!(is_marked(&f, f.email));
    assert!(is_marked(&f, f.subject));
    assert!(is_marked(&f, f.message));

    let fired = f.dialogs.fired();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].title, "Please fix the errors");
    assert_eq!(fired[0].icon, Icon::Error);
    assert_eq!(fired[0].confirm_button_color, "#ef4444");
    assert_eq!(fired[0].text.as_deref(), Some("Some fields require your attention. Errors are shown inline."));
}

#[test]
fn valid_submit_fires_success_and_resets_after_dismiss() {
    let f = fixture();
    f.page.blur(f.name);
    fill_valid(&f);
    assert!(f.contact.submit());

    let fired = f.dialogs.fired();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].title, "Message Sent! 🎉");
    assert_eq!(fired[0].icon, Icon::Success);
    assert_eq!(fired[0].background.as_deref(), Some("#0b0b12"));
    assert!(fired[0].show_close_button);
    assert!(fired[0].html.as_deref().unwrap().contains("<strong>Ada Lovelace</strong>"));

    // Still filled while the dialog is open.
    assert_eq!(f.page.value(&f.subject), "Engines");
    assert!(f.dialogs.dismiss());
    for field in [f.name, f.email, f.subject, f.message] {
        assert_eq!(f.page.value(&field), "");
        assert!(!is_marked(&f, field));
    }
    assert_eq!(error_text(&f, f.name).as_deref(), Some(""));
}

#[test]
fn name_is_escaped_in_success_body() {
    let f = fixture();
    fill_valid(&f);
    f.page.set_value(&f.name, "  <script>alert(1)</script> ");
    f.contact.submit();
    let html = f.dialogs.fired()[0].html.clone().unwrap();
    assert!(html.contains("<strong>&lt;script&gt;alert(1)&lt;/script&gt;</strong>"));
    assert!(!html.contains("<script>"));
}

#[test]
fn fallback_alerts_when_library_missing() {
    let f = build(MemoryDialogs::unavailable());
    f.page.submit(f.form);
    assert_eq!(f.dialogs.alerts(), vec!["Please fix the errors. (SweetAlert2 not loaded)"]);

    fill_valid(&f);
    f.page.submit(f.form);
    assert_eq!(f.dialogs.alerts()[1], "Message sent (SweetAlert2 not loaded).");
    assert!(f.dialogs.fired().is_empty());
    assert_eq!(f.page.value(&f.email), "");
    assert!(!is_marked(&f, f.message));
}

#[test]
fn broken_library_falls_back_and_still_resets() {
    let f = build(MemoryDialogs::broken());
    fill_valid(&f);
    f.page.submit(f.form);
    assert_eq!(f.dialogs.alerts(), vec!["Message sent (SweetAlert2 not loaded)."]);
    assert_eq!(f.page.value(&f.name), "");
}

#[test]
fn missing_field_fails_install_without_listeners() {
    let page = MemoryPage::new();
    let form = page.append(page.body(), "form", &[("id", "contactForm")]);
    for id in ["fullName", "email", "message"] {
        page.append(form, "input", &[("id", id)]);
    }
    let err = ContactForm::install(&page, &MemoryDialogs::new(), &ContactConfig::default()).err().unwrap();
    assert_eq!(err.to_string(), "missing element: #subject");
    assert_eq!(page.listener_count(), 0);
}
