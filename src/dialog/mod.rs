//! Modal dialog boundary.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page may or may not load SweetAlert2. Availability is checked at the
//! moment a dialog is needed, and a plain `alert` stands in when the library
//! is absent. [`notify`] owns that decision so widgets only describe what to
//! show.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

pub mod memory;
#[cfg(feature = "hydrate")]
pub mod sweetalert;

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::error::Result;

/// Severity icon shown in the dialog header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Success,
    Error,
    Warning,
    Info,
}

/// Configuration object handed to the dialog library.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogOptions {
    pub title: String,
    /// Plain-text body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Markup body. Callers must escape any user-supplied content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    pub icon: Icon,
    pub confirm_button_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub show_close_button: bool,
}

impl DialogOptions {
    #[must_use]
    pub fn new(title: impl Into<String>, icon: Icon, confirm_button_color: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: None,
            html: None,
            icon,
            confirm_button_color: confirm_button_color.into(),
            background: None,
            color: None,
            show_close_button: false,
        }
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    #[must_use]
    pub fn colors(mut self, background: impl Into<String>, color: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_close_button(mut self) -> Self {
        self.show_close_button = true;
        self
    }
}

/// Callback run once the user dismisses a dialog.
pub type OnDismiss = Box<dyn FnOnce()>;

/// A modal dialog library plus its blocking fallback.
pub trait Dialogs: Clone + 'static {
    /// Whether the rich dialog library is loaded right now.
    fn available(&self) -> bool;
    /// Show a rich dialog; `on_dismiss` runs after the user closes it.
    fn fire(&self, options: &DialogOptions, on_dismiss: OnDismiss) -> Result<()>;
    /// Blocking `window.alert`.
    fn alert(&self, text: &str);
}

/// Show `options`, or `fallback` through `alert` when the library is absent.
///
/// `on_dismiss` runs exactly once either way: after the dialog closes, right
/// after the blocking alert returns, or immediately if the library fails.
pub fn notify<D: Dialogs>(dialogs: &D, options: &DialogOptions, fallback: &str, on_dismiss: OnDismiss) {
    if !dialogs.available() {
        dialogs.alert(fallback);
        on_dismiss();
        return;
    }
    // The library takes ownership of the callback; keep a shared slot so a
    // failed `fire` can still run it here.
    let slot = Rc::new(RefCell::new(Some(on_dismiss)));
    let deferred = Rc::clone(&slot);
    let result = dialogs.fire(
        options,
        Box::new(move || {
            let pending = deferred.borrow_mut().take();
            if let Some(f) = pending {
                f();
            }
        }),
    );
    if let Err(err) = result {
        log::warn!("dialog library failed, falling back to alert: {err}");
        dialogs.alert(fallback);
        let pending = slot.borrow_mut().take();
        if let Some(f) = pending {
            f();
        }
    }
}
