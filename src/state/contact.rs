//! Contact form fields and their validation rules.
//!
//! Every rule runs on the trimmed value. A failing rule yields the inline
//! message for that field; nothing here touches the page.

#[cfg(test)]
#[path = "contact_test.rs"]
mod contact_test;

use std::sync::LazyLock;

use regex::Regex;

use crate::util::html::escape_html;

/// Minimum trimmed message length, in characters.
pub const MIN_MESSAGE_CHARS: usize = 10;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$").expect("valid email regex"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    /// Submission order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// Inline error shown under the field when its rule fails.
    #[must_use]
    pub fn error_message(self) -> &'static str {
        match self {
            Self::Name => "Full name is required.",
            Self::Email => "Please enter a valid email (name@example.com).",
            Self::Subject => "Subject is required.",
            Self::Message => "Message must be at least 10 characters.",
        }
    }

    /// Apply this field's rule to `raw`.
    pub fn check(self, raw: &str) -> Result<(), &'static str> {
        let value = trim(raw);
        let ok = match self {
            Self::Name | Self::Subject => !value.is_empty(),
            Self::Email => is_valid_email(value),
            Self::Message => value.chars().count() >= MIN_MESSAGE_CHARS,
        };
        if ok { Ok(()) } else { Err(self.error_message()) }
    }

    #[must_use]
    pub fn is_valid(self, raw: &str) -> bool {
        self.check(raw).is_ok()
    }
}

/// Strip leading and trailing whitespace, counting U+FEFF as whitespace the
/// way the browser's `String.prototype.trim` does.
#[must_use]
pub fn trim(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// One `@` with non-whitespace on both sides and a `.` in the domain part.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Body of the success dialog. `name` is escaped before interpolation.
#[must_use]
pub fn success_html(name: &str) -> String {
    format!(
        "<p>Thanks, <strong>{}</strong> — your message has been submitted.</p>\
         <p class=\"swal-sub\">I'll review and get back to you shortly.</p>",
        escape_html(trim(name))
    )
}
