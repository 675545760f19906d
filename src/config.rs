//! Host page selectors and timing constants.
//!
//! SYSTEM CONTEXT
//! ==============
//! The widgets enhance markup they do not own. Every lookup goes through a
//! selector named here so a page with different ids can ship a JSON override
//! instead of a rebuild.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::dom::Page;
use crate::error::Result;

/// Id of the optional `<script type="application/json">` override element.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

/// Top-level configuration for all widgets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub contact: ContactConfig,
    pub clock: ClockConfig,
    pub avatar: AvatarConfig,
    pub menu: MenuConfig,
}

impl Config {
    /// Parse an override document. Missing keys keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read the override embedded in the page, if any.
    ///
    /// A malformed document is logged and ignored.
    pub fn from_page<P: Page>(page: &P) -> Self {
        let Some(node) = page.by_id(CONFIG_ELEMENT_ID) else {
            return Self::default();
        };
        match Self::from_json(&page.text(&node)) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
                Self::default()
            }
        }
    }
}

/// Contact form element ids.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    pub form_id: String,
    pub name_id: String,
    pub email_id: String,
    pub subject_id: String,
    pub message_id: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            form_id: "contactForm".to_owned(),
            name_id: "fullName".to_owned(),
            email_id: "email".to_owned(),
            subject_id: "subject".to_owned(),
            message_id: "message".to_owned(),
        }
    }
}

/// Live clock display and refresh period.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    pub display_selector: String,
    pub period_ms: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            display_selector: r#"[data-testid="test-user-time"]"#.to_owned(),
            period_ms: 100,
        }
    }
}

/// Avatar picker popover and its controls.
///
/// `url_input`, `file_input`, `close_button`, `apply_button` and
/// `reset_button` are resolved inside the popover; `trigger` inside `wrap`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AvatarConfig {
    pub image_selector: String,
    pub wrap_selector: String,
    pub trigger_selector: String,
    pub popover_id: String,
    pub close_selector: String,
    pub url_input_selector: String,
    pub file_input_selectors: Vec<String>,
    pub apply_selector: String,
    pub reset_selector: String,
    pub focus_delay_ms: u32,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            image_selector: r#"[data-testid="test-user-avatar"]"#.to_owned(),
            wrap_selector: ".upload-wrap".to_owned(),
            trigger_selector: ".upload-trigger".to_owned(),
            popover_id: "upload-popover".to_owned(),
            close_selector: ".popover-close".to_owned(),
            url_input_selector: "#avatar-url".to_owned(),
            file_input_selectors: vec!["#avatar-file".to_owned(), "#avatar-upload".to_owned()],
            apply_selector: "#apply-avatar".to_owned(),
            reset_selector: "#reset-avatar".to_owned(),
            focus_delay_ms: 10,
        }
    }
}

/// Dropdown menu trigger and panel.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuConfig {
    pub trigger_selector: String,
    pub panel_selector: String,
    pub shown_class: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            trigger_selector: ".menu-trigger".to_owned(),
            panel_selector: ".menu-links".to_owned(),
            shown_class: "show".to_owned(),
        }
    }
}
