use std::cell::Cell;
use std::rc::Rc;

use super::memory::MemoryDialogs;
use super::*;

fn counter() -> (Rc<Cell<u32>>, OnDismiss) {
    let count = Rc::new(Cell::new(0));
    let sink = Rc::clone(&count);
    (count, Box::new(move || sink.set(sink.get() + 1)))
}

#[test]
fn options_serialize_with_library_key_names() {
    let opts = DialogOptions::new("Done", Icon::Success, "#2563eb")
        .html("<p>hi</p>")
        .colors("#0b0b12", "#f1f5f9")
        .with_close_button();
    let json = serde_json::to_value(&opts).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "title": "Done",
            "html": "<p>hi</p>",
            "icon": "success",
            "confirmButtonColor": "#2563eb",
            "background": "#0b0b12",
            "color": "#f1f5f9",
            "showCloseButton": true,
        })
    );
}

#[test]
fn options_omit_unset_fields() {
    let opts = DialogOptions::new("Oops", Icon::Error, "#ef4444").text("body");
    let json = serde_json::to_value(&opts).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "title": "Oops",
            "text": "body",
            "icon": "error",
            "confirmButtonColor": "#ef4444",
        })
    );
}

#[test]
fn notify_defers_callback_until_dismissed() {
    let dialogs = MemoryDialogs::new();
    let (count, on_dismiss) = counter();
    notify(&dialogs, &DialogOptions::new("t", Icon::Info, "#000"), "fallback", on_dismiss);
    assert_eq!(dialogs.fired().len(), 1);
    assert!(dialogs.alerts().is_empty());
    assert_eq!(count.get(), 0);
    assert!(dialogs.dismiss());
    assert_eq!(count.get(), 1);
    assert!(!dialogs.dismiss());
}

#[test]
fn notify_falls_back_to_alert_when_library_missing() {
    let dialogs = MemoryDialogs::unavailable();
    let (count, on_dismiss) = counter();
    notify(&dialogs, &DialogOptions::new("t", Icon::Info, "#000"), "plain text", on_dismiss);
    assert!(dialogs.fired().is_empty());
    assert_eq!(dialogs.alerts(), vec!["plain text".to_owned()]);
    assert_eq!(count.get(), 1);
}

#[test]
fn notify_falls_back_when_library_rejects_call() {
    let dialogs = MemoryDialogs::broken();
    let (count, on_dismiss) = counter();
    notify(&dialogs, &DialogOptions::new("t", Icon::Warning, "#000"), "plain text", on_dismiss);
    assert_eq!(dialogs.alerts(), vec!["plain text".to_owned()]);
    assert_eq!(count.get(), 1);
    assert_eq!(dialogs.open_count(), 0);
}
